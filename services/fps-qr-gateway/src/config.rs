use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub encoder: fps_qr_core::Config,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let encoder = fps_qr_core::Config::default();

        let mut builder = config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", 4)?
            // Encoder defaults
            .set_default("encoder.acquirer_id", encoder.acquirer_id)?
            .set_default("encoder.country_code", encoder.country_code)?
            .set_default("encoder.merchant_category_code", encoder.merchant_category_code)?;

        // Add environment-specific config file if it exists
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            builder = builder.add_source(File::with_name(&config_file).required(false));
        } else {
            builder = builder.add_source(
                File::with_name(&format!("config/{}", environment)).required(false),
            );
        }

        // Override with environment variables
        builder = builder.add_source(Environment::with_prefix("FPS_QR_GATEWAY").separator("__"));

        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }

        if self.server.workers == 0 {
            return Err("At least one worker is required".to_string());
        }

        if self.encoder.acquirer_id.is_empty() {
            return Err("Acquirer identifier is required".to_string());
        }

        if self.encoder.country_code.len() != 2 {
            return Err("Country code must be 2 characters".to_string());
        }

        if self.encoder.merchant_category_code.len() != 4 {
            return Err("Merchant category code must be 4 digits".to_string());
        }

        Ok(())
    }
}
