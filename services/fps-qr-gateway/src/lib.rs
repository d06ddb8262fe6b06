//! FPS QR Gateway
//!
//! HTTP front for `fps-qr-core`: validates inbound JSON requests and returns
//! the encoded QR payload string.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;

pub use config::Config;
pub use errors::{GatewayError, Result};
