use crate::errors::GatewayError;
use crate::metrics;
use crate::models::{HealthResponse, QrRequest, QrResponse};
use actix_web::{web, HttpRequest, HttpResponse};
use fps_qr_core::{PaymentRequest, PayloadBuilder};
use tracing::{error, info};
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "fps-qr-gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Encode a payment request into an FPS QR payload
pub async fn generate_qr(
    builder: web::Data<PayloadBuilder>,
    request: web::Json<QrRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();
    if let Err(e) = request.validate() {
        metrics::PAYLOAD_FAILURES
            .with_label_values(&["validation_error"])
            .inc();
        return Err(GatewayError::Validation(e.to_string()));
    }

    info!(
        dynamic = request.dynamic,
        has_amount = request.amount.as_deref().map_or(false, |a| !a.is_empty()),
        currency = %request.currency,
        "Generating FPS QR payload"
    );

    let payment: PaymentRequest = request.into();
    let timer = metrics::ENCODE_DURATION.start_timer();
    let result = builder.build(&payment);
    timer.observe_duration();

    match result {
        Ok(payload) => {
            metrics::PAYLOADS_GENERATED.inc();
            Ok(HttpResponse::Ok().json(QrResponse {
                qr_string: payload.into_string(),
            }))
        }
        Err(e) => {
            let err = GatewayError::from(e);
            error!(error = %err, "QR payload encoding failed");
            metrics::PAYLOAD_FAILURES
                .with_label_values(&[err.error_type()])
                .inc();
            Err(err)
        }
    }
}

/// Prometheus metrics endpoint
pub async fn metrics_endpoint() -> Result<HttpResponse, GatewayError> {
    let body = metrics::gather()
        .map_err(|e| GatewayError::Internal(format!("Failed to export metrics: {}", e)))?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    metrics::PAYLOAD_FAILURES
        .with_label_values(&["validation_error"])
        .inc();
    GatewayError::Validation(err.to_string()).into()
}

/// Configure routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fps")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health", web::get().to(health_check))
            .route("/qr", web::post().to(generate_qr)),
    )
    .route("/metrics", web::get().to(metrics_endpoint));
}
