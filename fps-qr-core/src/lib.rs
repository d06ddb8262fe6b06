//! FPS QR Core
//!
//! Encodes a merchant payment request into an EMV merchant-presented QR
//! payload for Hong Kong's Faster Payment System.
//!
//! # Architecture
//!
//! - **TLV encoding**: every field is `tag + 2-digit length + value`
//! - **Fixed field order**: scanners key on tag positions, nothing is sorted
//! - **Single nesting level**: containers (26, 32, 62) hold plain TLV fields
//! - **CRC trailer**: CRC-16/CCITT-FALSE over the payload including `6304`
//!
//! # Example
//!
//! ```
//! use fps_qr_core::{build_payload, PaymentRequest};
//!
//! let request = PaymentRequest {
//!     payee_identifier: "test@example.com".to_string(),
//!     merchant_name: "ABC Shop".to_string(),
//!     city: "Hong Kong".to_string(),
//!     currency: "HKD".to_string(),
//!     ..Default::default()
//! };
//!
//! let payload = build_payload(&request).unwrap();
//! assert!(payload.as_str().starts_with("000201010211"));
//! fps_qr_core::checksum::verify(payload.as_str()).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod checksum;
pub mod config;
pub mod currency;
pub mod error;
pub mod mailbox;
pub mod payee;
pub mod payload;
pub mod tlv;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use payload::{build_payload, PayloadBuilder};
pub use types::{PayeeIdType, PaymentOperator, PaymentRequest, PointOfInitiation, QrPayload};
