//! ISO 4217 currency resolution
//!
//! Field 53 carries the numeric currency code. Anything not in the table,
//! including an empty code, resolves to HKD.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies with a known numeric code
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Hong Kong Dollar
    #[default]
    HKD,
    /// Chinese Yuan
    CNY,
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Japanese Yen
    JPY,
    /// British Pound
    GBP,
    /// Singapore Dollar
    SGD,
}

impl Currency {
    /// Alphabetic ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::HKD => "HKD",
            Currency::CNY => "CNY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
            Currency::GBP => "GBP",
            Currency::SGD => "SGD",
        }
    }

    /// Numeric ISO 4217 code
    pub fn numeric(&self) -> &'static str {
        match self {
            Currency::HKD => "344",
            Currency::CNY => "156",
            Currency::USD => "840",
            Currency::EUR => "978",
            Currency::JPY => "392",
            Currency::GBP => "826",
            Currency::SGD => "702",
        }
    }

    /// Parse an alphabetic code, ignoring case
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "HKD" => Some(Currency::HKD),
            "CNY" => Some(Currency::CNY),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "JPY" => Some(Currency::JPY),
            "GBP" => Some(Currency::GBP),
            "SGD" => Some(Currency::SGD),
            _ => None,
        }
    }

    /// Resolve a code, falling back to HKD
    pub fn resolve(code: &str) -> Self {
        match Self::from_code(code) {
            Some(currency) => currency,
            None => {
                if !code.is_empty() {
                    tracing::debug!(code, "unrecognised currency, using HKD");
                }
                Currency::HKD
            }
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Numeric code for an alphabetic code; unknown and empty give `344`
pub fn resolve_numeric(code: &str) -> &'static str {
    Currency::resolve(code).numeric()
}
