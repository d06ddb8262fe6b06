//! Core types for payload encoding
//!
//! Everything here lives for one encoding call: built from an inbound
//! request, consumed once, then dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Merchant payment request, already validated by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    /// FPS identifier of the receiving account (email, phone or other)
    pub payee_identifier: String,

    /// Merchant name (up to 25 characters)
    pub merchant_name: String,

    /// Merchant city (up to 15 characters)
    pub city: String,

    /// Dynamic (single use) rather than static QR
    pub is_dynamic: bool,

    /// Transaction amount as entered, e.g. `100.00`
    pub amount: Option<String>,

    /// Alphabetic ISO 4217 code
    pub currency: String,

    /// Merchant timeout in seconds
    pub merchant_timeout: Option<String>,

    /// Reference label
    pub reference_label: Option<String>,

    /// Bill number
    pub bill_number: Option<String>,

    /// Payment operator information
    pub payment_operator: Option<PaymentOperator>,
}

/// Payment operator template (field 32)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOperator {
    /// Globally unique identifier of the operator (up to 32 characters)
    pub global_unique_identifier: Option<String>,

    /// Additional sub-fields keyed by 2-digit tag, emitted in tag order
    pub extra_fields: BTreeMap<String, String>,
}

/// How the payee identifier is interpreted by scanners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayeeIdType {
    /// FPS ID or anything unrecognised
    Generic,
    /// `+852-` mobile number
    Phone,
    /// Email address
    Email,
}

impl PayeeIdType {
    /// Sub-tag used inside the merchant account template
    pub fn tag(&self) -> &'static str {
        match self {
            PayeeIdType::Generic => "02",
            PayeeIdType::Phone => "03",
            PayeeIdType::Email => "04",
        }
    }
}

impl fmt::Display for PayeeIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Point-of-initiation method (field 01)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointOfInitiation {
    /// Reusable code
    Static,
    /// Single-use code
    Dynamic,
}

impl PointOfInitiation {
    /// Select from the request flag
    pub fn from_dynamic(is_dynamic: bool) -> Self {
        if is_dynamic {
            PointOfInitiation::Dynamic
        } else {
            PointOfInitiation::Static
        }
    }

    /// Field value
    pub fn code(&self) -> &'static str {
        match self {
            PointOfInitiation::Static => "11",
            PointOfInitiation::Dynamic => "12",
        }
    }
}

/// A finalized payload with a verified CRC trailer
///
/// Only produced by [`crate::checksum::finalize`], so it is never empty
/// and always ends in `6304` followed by four uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QrPayload(String);

impl QrPayload {
    pub(crate) fn new(payload: String) -> Self {
        Self(payload)
    }

    /// Payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the payload text
    pub fn into_string(self) -> String {
        self.0
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checksum carried in the trailer
    pub fn checksum(&self) -> u16 {
        let trailer = &self.0[self.0.len() - crate::checksum::CHECKSUM_HEX_LEN..];
        // finalize() wrote these digits, they always parse
        u16::from_str_radix(trailer, 16).unwrap_or_default()
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QrPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<QrPayload> for String {
    fn from(payload: QrPayload) -> Self {
        payload.0
    }
}
