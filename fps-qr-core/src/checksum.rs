//! CRC-16/CCITT-FALSE checksum trailer
//!
//! Polynomial `0x1021`, initial value `0xFFFF`, MSB first, no reflection,
//! no final XOR. The checksummed region is the whole payload up to and
//! including the `6304` placeholder; the four hex digits follow it.

use crate::types::QrPayload;
use crate::{Error, Result};

/// Checksum tag plus its fixed length, appended before computing
pub const CHECKSUM_PLACEHOLDER: &str = "6304";

/// Hex digits in the trailer
pub const CHECKSUM_HEX_LEN: usize = 4;

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Calculate CRC-16/CCITT-FALSE over raw bytes
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    let mut crc = StreamingChecksum::new();
    crc.update(data);
    crc.finalize()
}

/// Checksum for a provisional payload that must end with the placeholder
pub fn compute_checksum(data: &str) -> Result<u16> {
    if !data.ends_with(CHECKSUM_PLACEHOLDER) {
        return Err(Error::Checksum(format!(
            "payload does not end with the {} placeholder",
            CHECKSUM_PLACEHOLDER
        )));
    }
    Ok(crc16_ccitt_false(data.as_bytes()))
}

/// Render a checksum as four uppercase hex digits
pub fn format_checksum(crc: u16) -> String {
    format!("{:04X}", crc)
}

/// Append the checksum to a provisional payload
pub fn finalize(mut raw: String) -> Result<QrPayload> {
    let crc = compute_checksum(&raw)?;
    raw.push_str(&format_checksum(crc));
    Ok(QrPayload::new(raw))
}

/// Recompute and compare the trailer of a finished payload
///
/// Returns the checksum on success.
pub fn verify(payload: &str) -> Result<u16> {
    let split = payload
        .len()
        .checked_sub(CHECKSUM_HEX_LEN)
        .filter(|&at| payload.is_char_boundary(at))
        .ok_or_else(|| Error::Checksum("payload too short for a checksum".to_string()))?;

    let (body, trailer) = payload.split_at(split);
    if !trailer.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Checksum(format!("trailer {:?} is not hex", trailer)));
    }
    let expected = u16::from_str_radix(trailer, 16)
        .map_err(|e| Error::Checksum(format!("trailer {:?}: {}", trailer, e)))?;

    let calculated = compute_checksum(body)?;
    if calculated != expected {
        return Err(Error::Checksum(format!(
            "expected {}, calculated {}",
            format_checksum(expected),
            format_checksum(calculated)
        )));
    }
    Ok(calculated)
}

/// Incremental CRC-16/CCITT-FALSE
#[derive(Debug, Clone)]
pub struct StreamingChecksum {
    crc: u16,
}

impl StreamingChecksum {
    /// Start a new checksum
    pub fn new() -> Self {
        Self { crc: INITIAL }
    }

    /// Feed more bytes
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.crc ^= u16::from(byte) << 8;
            for _ in 0..8 {
                if self.crc & 0x8000 != 0 {
                    self.crc = (self.crc << 1) ^ POLYNOMIAL;
                } else {
                    self.crc <<= 1;
                }
            }
        }
    }

    /// Current checksum value
    pub fn finalize(&self) -> u16 {
        self.crc
    }

    /// Back to the initial register value
    pub fn reset(&mut self) {
        self.crc = INITIAL;
    }
}

impl Default for StreamingChecksum {
    fn default() -> Self {
        Self::new()
    }
}
