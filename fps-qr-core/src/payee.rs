//! Payee identifier classification
//!
//! The merchant account template (field 26) stores the payee under a
//! sub-tag that tells scanners how to read it: `04` email, `03` Hong Kong
//! mobile with `+852-` prefix, `02` everything else.

use crate::mailbox::parse_mailbox;
use crate::types::PayeeIdType;
use once_cell::sync::Lazy;
use regex::Regex;

/// `+852-` followed by an 8-digit mobile number starting 5, 6, 8 or 9
static HK_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+852-[5689][0-9]{7}$").expect("valid HK mobile regex"));

/// Classify a payee identifier
pub fn classify(identifier: &str) -> PayeeIdType {
    if is_email(identifier) {
        PayeeIdType::Email
    } else if is_hk_mobile(identifier) {
        PayeeIdType::Phone
    } else {
        PayeeIdType::Generic
    }
}

/// Single RFC 5322 mailbox, with `@` required on top
pub fn is_email(identifier: &str) -> bool {
    parse_mailbox(identifier).is_ok() && identifier.contains('@')
}

/// `+852-XXXXXXXX` mobile number
pub fn is_hk_mobile(identifier: &str) -> bool {
    HK_MOBILE_REGEX.is_match(identifier)
}
