//! HTTP tests for the QR endpoint

use actix_web::{http::StatusCode, test, web, App};
use fps_qr_core::{checksum, PayloadBuilder};
use fps_qr_gateway::handlers;
use serde_json::{json, Value};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(PayloadBuilder::default()))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_static_email_qr() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "test@example.com",
            "merchant_name": "ABC Shop",
            "city": "Hong Kong",
            "dynamic": false,
            "currency": "HKD"
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["qr_string"],
        "00020101021126360012hk.com.hkicl0416test@example.com\
         520400005802HK5908ABC Shop6009Hong Kong63041BFD"
    );
}

#[actix_web::test]
async fn test_dynamic_phone_qr_with_amount() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "+852-91234567",
            "merchant_name": "ABC Shop",
            "city": "Hong Kong",
            "dynamic": true,
            "amount": "100.00",
            "currency": "USD",
            "bill_number": "INV-1",
            "payment_operator": {
                "global_unique_identifier": "com.example.operator",
                "extra_fields": { "05": "x", "01": "y" }
            }
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    let qr = body["qr_string"].as_str().unwrap();
    assert!(qr.contains("0313+852-91234567"));
    assert!(qr.contains("5303840"));
    assert!(qr.contains("5406100.00"));
    assert!(qr.contains("62090105INV-1"));
    assert!(qr.contains("32340020com.example.operator0101y0501x6304"));
    checksum::verify(qr).unwrap();
}

#[actix_web::test]
async fn test_validation_failure() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "test@example.com",
            "city": "A city name that is far too long",
            "currency": "HKD"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "validation_error");
}

#[actix_web::test]
async fn test_missing_required_field() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "test@example.com",
            "city": "Hong Kong"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_bad_extra_field_tag_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "test@example.com",
            "city": "Hong Kong",
            "currency": "HKD",
            "payment_operator": { "extra_fields": { "ABC": "value" } }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "invalid_tag");
}

#[actix_web::test]
async fn test_oversized_timeout_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/fps/qr")
        .set_json(json!({
            "fps_id": "test@example.com",
            "city": "Hong Kong",
            "currency": "HKD",
            "merchant_timeout": "9".repeat(100)
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "value_too_long");
}

#[actix_web::test]
async fn test_health_and_metrics() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/v1/fps/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fps-qr-gateway");

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
