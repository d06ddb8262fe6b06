use fps_qr_core::{PaymentOperator, PaymentRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// QR generation request
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QrRequest {
    #[validate(length(min = 1))]
    pub fps_id: String,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub merchant_name: String,
    #[validate(length(min = 1, max = 15))]
    pub city: String,
    /// true for dynamic QR, false for static
    #[serde(default)]
    pub dynamic: bool,
    #[validate(length(max = 13))]
    pub amount: Option<String>,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub merchant_timeout: Option<String>,
    #[validate(length(max = 25))]
    pub reference_label: Option<String>,
    #[validate(length(max = 25))]
    pub bill_number: Option<String>,
    #[validate]
    pub payment_operator: Option<PaymentOperatorRequest>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct PaymentOperatorRequest {
    #[validate(length(max = 32))]
    pub global_unique_identifier: Option<String>,
    #[serde(default)]
    pub extra_fields: BTreeMap<String, String>,
}

impl From<QrRequest> for PaymentRequest {
    fn from(request: QrRequest) -> Self {
        PaymentRequest {
            payee_identifier: request.fps_id,
            merchant_name: request.merchant_name,
            city: request.city,
            is_dynamic: request.dynamic,
            amount: request.amount,
            currency: request.currency,
            merchant_timeout: request.merchant_timeout,
            reference_label: request.reference_label,
            bill_number: request.bill_number,
            payment_operator: request.payment_operator.map(|op| PaymentOperator {
                global_unique_identifier: op.global_unique_identifier,
                extra_fields: op.extra_fields,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QrResponse {
    pub qr_string: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
