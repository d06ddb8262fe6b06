//! Payload assembly
//!
//! Builds the complete QR payload in the order scanners expect:
//!
//! ```text
//! 00 format indicator   "01"
//! 01 initiation method  "11" static / "12" dynamic
//! 26 merchant account   { 00 acquirer, 02|03|04 payee, [05 timeout] }
//! 52 category code      "0000"
//! 58 country            "HK"
//! 59 merchant name
//! 60 city
//! 53 currency           } only with an amount
//! 54 amount             }
//! 62 additional data    { [01 bill number], [05 reference label] }
//! 32 payment operator   { [00 guid], [extra fields in tag order] }
//! 63 checksum           "6304" + 4 hex digits
//! ```

use crate::checksum::{self, CHECKSUM_PLACEHOLDER};
use crate::config::Config;
use crate::currency::resolve_numeric;
use crate::payee::classify;
use crate::tlv::{encode_container, encode_field, join_fields};
use crate::types::{PaymentOperator, PaymentRequest, PointOfInitiation, QrPayload};
use crate::Result;

/// Top-level and nested tags
pub mod tags {
    /// Payload format indicator
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    /// Point-of-initiation method
    pub const POINT_OF_INITIATION: &str = "01";
    /// FPS merchant account information template
    pub const MERCHANT_ACCOUNT: &str = "26";
    /// Payment operator template
    pub const PAYMENT_OPERATOR: &str = "32";
    /// Merchant category code
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    /// Transaction currency
    pub const TRANSACTION_CURRENCY: &str = "53";
    /// Transaction amount
    pub const TRANSACTION_AMOUNT: &str = "54";
    /// Country code
    pub const COUNTRY_CODE: &str = "58";
    /// Merchant name
    pub const MERCHANT_NAME: &str = "59";
    /// Merchant city
    pub const MERCHANT_CITY: &str = "60";
    /// Additional data field template
    pub const ADDITIONAL_DATA: &str = "62";

    /// Acquirer identifier inside 26, GUID inside 32
    pub const GLOBAL_UNIQUE_IDENTIFIER: &str = "00";
    /// Merchant timeout inside 26
    pub const MERCHANT_TIMEOUT: &str = "05";
    /// Bill number inside 62
    pub const BILL_NUMBER: &str = "01";
    /// Reference label inside 62
    pub const REFERENCE_LABEL: &str = "05";
}

/// Payload format version carried in field 00
pub const PAYLOAD_FORMAT_VERSION: &str = "01";

/// Assembles payloads with a fixed encoder configuration
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    config: Config,
}

impl PayloadBuilder {
    /// Create builder
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Encoder configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the finalized payload for one request
    pub fn build(&self, request: &PaymentRequest) -> Result<QrPayload> {
        let raw = self.build_unsigned(request)?;
        let payload = checksum::finalize(raw)?;

        tracing::debug!(
            len = payload.len(),
            checksum = %checksum::format_checksum(payload.checksum()),
            "payload built"
        );
        Ok(payload)
    }

    /// Everything up to and including the `6304` placeholder
    pub fn build_unsigned(&self, request: &PaymentRequest) -> Result<String> {
        let initiation = PointOfInitiation::from_dynamic(request.is_dynamic);

        let mut fields = vec![
            encode_field(tags::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_VERSION)?,
            encode_field(tags::POINT_OF_INITIATION, initiation.code())?,
            self.merchant_account(request)?,
            encode_field(
                tags::MERCHANT_CATEGORY_CODE,
                &self.config.merchant_category_code,
            )?,
            encode_field(tags::COUNTRY_CODE, &self.config.country_code)?,
            encode_field(tags::MERCHANT_NAME, &request.merchant_name)?,
            encode_field(tags::MERCHANT_CITY, &request.city)?,
        ];

        // Currency only travels with an amount
        if let Some(amount) = non_empty(&request.amount) {
            fields.push(encode_field(
                tags::TRANSACTION_CURRENCY,
                resolve_numeric(&request.currency),
            )?);
            fields.push(encode_field(tags::TRANSACTION_AMOUNT, amount)?);
        }

        if let Some(additional) = additional_data(request)? {
            fields.push(additional);
        }

        if let Some(operator) = request.payment_operator.as_ref() {
            if let Some(field) = payment_operator(operator)? {
                fields.push(field);
            }
        }

        fields.push(CHECKSUM_PLACEHOLDER.to_string());

        tracing::debug!(field_count = fields.len(), "fields assembled");
        Ok(join_fields(&fields))
    }

    fn merchant_account(&self, request: &PaymentRequest) -> Result<String> {
        let id_type = classify(&request.payee_identifier);
        tracing::debug!(id_type = %id_type, "payee identifier classified");

        let mut children = vec![
            encode_field(tags::GLOBAL_UNIQUE_IDENTIFIER, &self.config.acquirer_id)?,
            encode_field(id_type.tag(), &request.payee_identifier)?,
        ];
        if let Some(timeout) = non_empty(&request.merchant_timeout) {
            children.push(encode_field(tags::MERCHANT_TIMEOUT, timeout)?);
        }

        encode_container(tags::MERCHANT_ACCOUNT, &children)
    }
}

/// Build a payload with the default configuration
pub fn build_payload(request: &PaymentRequest) -> Result<QrPayload> {
    PayloadBuilder::default().build(request)
}

fn additional_data(request: &PaymentRequest) -> Result<Option<String>> {
    let mut children = Vec::new();
    if let Some(bill) = non_empty(&request.bill_number) {
        children.push(encode_field(tags::BILL_NUMBER, bill)?);
    }
    if let Some(label) = non_empty(&request.reference_label) {
        children.push(encode_field(tags::REFERENCE_LABEL, label)?);
    }

    if children.is_empty() {
        return Ok(None);
    }
    encode_container(tags::ADDITIONAL_DATA, &children).map(Some)
}

fn payment_operator(operator: &PaymentOperator) -> Result<Option<String>> {
    let mut children = Vec::new();
    if let Some(guid) = non_empty(&operator.global_unique_identifier) {
        children.push(encode_field(tags::GLOBAL_UNIQUE_IDENTIFIER, guid)?);
    }
    // BTreeMap iteration keeps this in ascending tag order
    for (tag, value) in &operator.extra_fields {
        if !value.is_empty() {
            children.push(encode_field(tag, value)?);
        }
    }

    if children.is_empty() {
        return Ok(None);
    }
    encode_container(tags::PAYMENT_OPERATOR, &children).map(Some)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::parse_fields;
    use crate::Error;
    use std::collections::BTreeMap;

    fn shop_request() -> PaymentRequest {
        PaymentRequest {
            payee_identifier: "test@example.com".to_string(),
            merchant_name: "ABC Shop".to_string(),
            city: "Hong Kong".to_string(),
            currency: "HKD".to_string(),
            ..Default::default()
        }
    }

    fn top_level_tags(payload: &QrPayload) -> Vec<String> {
        parse_fields(payload.as_str())
            .unwrap()
            .into_iter()
            .map(|f| f.tag)
            .collect()
    }

    #[test]
    fn test_static_email_payload() {
        let payload = build_payload(&shop_request()).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021126360012hk.com.hkicl0416test@example.com\
             520400005802HK5908ABC Shop6009Hong Kong63041BFD"
        );
    }

    #[test]
    fn test_dynamic_phone_payload_with_amount() {
        let request = PaymentRequest {
            payee_identifier: "+852-91234567".to_string(),
            is_dynamic: true,
            amount: Some("100.00".to_string()),
            currency: "USD".to_string(),
            ..shop_request()
        };
        let payload = build_payload(&request).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021226330012hk.com.hkicl0313+852-91234567\
             520400005802HK5908ABC Shop6009Hong Kong53038405406100.006304DA6D"
        );
    }

    #[test]
    fn test_all_optional_fields() {
        let mut extra_fields = BTreeMap::new();
        extra_fields.insert("05".to_string(), "b".to_string());
        extra_fields.insert("01".to_string(), "a".to_string());
        extra_fields.insert("02".to_string(), String::new());

        let request = PaymentRequest {
            payee_identifier: "123456789".to_string(),
            merchant_name: "Tea House".to_string(),
            city: "Kowloon".to_string(),
            is_dynamic: true,
            amount: Some("88.50".to_string()),
            currency: "hkd".to_string(),
            merchant_timeout: Some("300".to_string()),
            reference_label: Some("ORDER-42".to_string()),
            bill_number: Some("INV-2024-001".to_string()),
            payment_operator: Some(PaymentOperator {
                global_unique_identifier: Some("com.example.operator".to_string()),
                extra_fields,
            }),
        };

        let payload = build_payload(&request).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021226360012hk.com.hkicl02091234567890503300\
             520400005802HK5909Tea House6007Kowloon5303344540588.50\
             62280112INV-2024-0010508ORDER-42\
             32340020com.example.operator0101a0501b63046139"
        );
        assert_eq!(
            top_level_tags(&payload),
            vec!["00", "01", "26", "52", "58", "59", "60", "53", "54", "62", "32", "63"]
        );
    }

    #[test]
    fn test_empty_optionals_are_omitted() {
        let request = PaymentRequest {
            amount: Some(String::new()),
            merchant_timeout: Some(String::new()),
            bill_number: Some(String::new()),
            reference_label: None,
            payment_operator: Some(PaymentOperator::default()),
            ..shop_request()
        };
        let payload = build_payload(&request).unwrap();
        assert_eq!(payload, build_payload(&shop_request()).unwrap());
        assert_eq!(
            top_level_tags(&payload),
            vec!["00", "01", "26", "52", "58", "59", "60", "63"]
        );
    }

    #[test]
    fn test_reference_label_only() {
        let request = PaymentRequest {
            reference_label: Some("REF".to_string()),
            ..shop_request()
        };
        let payload = build_payload(&request).unwrap();
        assert!(payload.as_str().contains("62070503REF6304"));
    }

    #[test]
    fn test_merchant_name_at_limit() {
        let name = "N".repeat(25);
        let request = PaymentRequest {
            merchant_name: name.clone(),
            ..shop_request()
        };
        let payload = build_payload(&request).unwrap();
        assert!(payload.as_str().contains(&format!("5925{}6009", name)));
    }

    #[test]
    fn test_oversized_value_is_rejected() {
        let request = PaymentRequest {
            bill_number: Some("B".repeat(100)),
            ..shop_request()
        };
        assert!(matches!(
            build_payload(&request),
            Err(Error::ValueTooLong { ref tag, len: 100, .. }) if tag == "01"
        ));
    }

    #[test]
    fn test_oversized_container_is_rejected() {
        let request = PaymentRequest {
            bill_number: Some("B".repeat(60)),
            reference_label: Some("R".repeat(60)),
            ..shop_request()
        };
        assert!(matches!(
            build_payload(&request),
            Err(Error::ValueTooLong { ref tag, .. }) if tag == "62"
        ));
    }

    #[test]
    fn test_invalid_extra_field_tag() {
        let mut extra_fields = BTreeMap::new();
        extra_fields.insert("X1".to_string(), "value".to_string());
        let request = PaymentRequest {
            payment_operator: Some(PaymentOperator {
                global_unique_identifier: None,
                extra_fields,
            }),
            ..shop_request()
        };
        assert!(matches!(build_payload(&request), Err(Error::InvalidTag(_))));
    }

    #[test]
    fn test_custom_config() {
        let builder = PayloadBuilder::new(Config {
            acquirer_id: "hk.com.test".to_string(),
            ..Config::default()
        });
        let payload = builder.build(&shop_request()).unwrap();
        assert!(payload.as_str().contains("26350011hk.com.test0416test@example.com"));
        checksum::verify(payload.as_str()).unwrap();
    }

    #[test]
    fn test_unsigned_ends_with_placeholder() {
        let raw = PayloadBuilder::default()
            .build_unsigned(&shop_request())
            .unwrap();
        assert!(raw.ends_with("6304"));
        let payload = build_payload(&shop_request()).unwrap();
        assert_eq!(&payload.as_str()[..raw.len()], raw);
    }
}
