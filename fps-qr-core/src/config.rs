//! Configuration for the payload encoder

use serde::{Deserialize, Serialize};

/// Encoder configuration
///
/// Defaults are the values FPS scanners expect; overriding them is only
/// useful against test acquirers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Globally unique identifier of the merchant account template (26/00)
    pub acquirer_id: String,

    /// Country code (58)
    pub country_code: String,

    /// Merchant category code (52)
    pub merchant_category_code: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            acquirer_id: "hk.com.hkicl".to_string(),
            country_code: "HK".to_string(),
            merchant_category_code: "0000".to_string(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML; missing keys keep their defaults
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(acquirer_id) = std::env::var("FPS_QR_ACQUIRER_ID") {
            config.acquirer_id = acquirer_id;
        }

        if let Ok(country_code) = std::env::var("FPS_QR_COUNTRY_CODE") {
            config.country_code = country_code;
        }

        if let Ok(mcc) = std::env::var("FPS_QR_MERCHANT_CATEGORY_CODE") {
            config.merchant_category_code = mcc;
        }

        Ok(config)
    }
}
