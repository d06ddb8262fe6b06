use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] fps_qr_core::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(json!({
            "error": {
                "code": status_code.as_u16(),
                "message": self.to_string(),
                "type": self.error_type()
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        use fps_qr_core::Error as CoreError;

        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Encoding(CoreError::ValueTooLong { .. })
            | GatewayError::Encoding(CoreError::InvalidTag(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl GatewayError {
    pub fn error_type(&self) -> &'static str {
        use fps_qr_core::Error as CoreError;

        match self {
            GatewayError::Validation(_) => "validation_error",
            GatewayError::Encoding(CoreError::ValueTooLong { .. }) => "value_too_long",
            GatewayError::Encoding(CoreError::InvalidTag(_)) => "invalid_tag",
            GatewayError::Encoding(CoreError::Checksum(_)) => "checksum_error",
            GatewayError::Encoding(_) => "encoding_error",
            GatewayError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let too_long = GatewayError::from(fps_qr_core::Error::ValueTooLong {
            tag: "59".to_string(),
            len: 120,
            max: 99,
        });
        assert_eq!(too_long.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(too_long.error_type(), "value_too_long");

        let bad_tag = GatewayError::from(fps_qr_core::Error::InvalidTag("ABC".to_string()));
        assert_eq!(bad_tag.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(bad_tag.error_type(), "invalid_tag");

        let checksum = GatewayError::from(fps_qr_core::Error::Checksum("bad".to_string()));
        assert_eq!(checksum.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(checksum.error_type(), "checksum_error");

        let malformed = GatewayError::from(fps_qr_core::Error::Malformed {
            offset: 4,
            reason: "truncated field header".to_string(),
        });
        assert_eq!(malformed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(malformed.error_type(), "encoding_error");

        let invalid = GatewayError::Validation("city: length".to_string());
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
