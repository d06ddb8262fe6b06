//! Error types for payload encoding

use thiserror::Error;

/// Result type for encoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Encoding errors
#[derive(Error, Debug)]
pub enum Error {
    /// Value does not fit the 2-digit length prefix
    #[error("Value for tag {tag} is {len} bytes, limit is {max}")]
    ValueTooLong {
        /// Tag the value was destined for
        tag: String,
        /// UTF-8 byte length of the value
        len: usize,
        /// Largest encodable length
        max: usize,
    },

    /// Tag is not two decimal digits
    #[error("Invalid tag: {0:?}")]
    InvalidTag(String),

    /// Checksum placeholder missing or trailer mismatch
    #[error("Checksum error: {0}")]
    Checksum(String),

    /// Payload could not be read back as TLV
    #[error("Malformed payload at offset {offset}: {reason}")]
    Malformed {
        /// Byte offset where decoding stopped
        offset: usize,
        /// What was wrong
        reason: String,
    },

    /// Text is not a single RFC 5322 mailbox
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Error::Malformed {
            offset,
            reason: reason.into(),
        }
    }
}
