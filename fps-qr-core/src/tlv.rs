//! TLV field encoding
//!
//! EMV merchant-presented QR payloads are a flat run of text fields:
//!
//! ```text
//! +-----+-----+-----------------+
//! | tag | len | value           |
//! | 2   | 2   | len bytes       |
//! +-----+-----+-----------------+
//! ```
//!
//! `tag` is two decimal digits and `len` is the decimal byte length of
//! `value`, zero-padded to two digits. Container fields carry a run of
//! nested fields as their value.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest value length representable by the 2-digit length prefix
pub const MAX_VALUE_LEN: usize = 99;

/// Width of the tag and of the length prefix
const TAG_LEN: usize = 2;
const LENGTH_LEN: usize = 2;

/// A single tag/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlvField {
    /// Two-digit tag
    pub tag: String,
    /// Raw value
    pub value: String,
}

impl TlvField {
    /// Create a field, rejecting tags and values the format cannot carry
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let field = Self {
            tag: tag.into(),
            value: value.into(),
        };
        validate_tag(&field.tag)?;
        validate_value(&field.tag, &field.value)?;
        Ok(field)
    }

    /// Render as `tag + len + value`
    pub fn encode(&self) -> String {
        format!("{}{:02}{}", self.tag, self.value.len(), self.value)
    }

    /// Number of bytes the rendered field occupies
    pub fn encoded_len(&self) -> usize {
        TAG_LEN + LENGTH_LEN + self.value.len()
    }
}

/// Render one field as `tag + zero-padded length + value`
pub fn encode_field(tag: &str, value: &str) -> Result<String> {
    validate_tag(tag)?;
    validate_value(tag, value)?;
    Ok(format!("{}{:02}{}", tag, value.len(), value))
}

/// Concatenate already-rendered fields in the order given
pub fn join_fields<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields.into_iter().fold(String::new(), |mut acc, field| {
        acc.push_str(field.as_ref());
        acc
    })
}

/// Render a container whose value is the concatenation of `children`
pub fn encode_container<I, S>(tag: &str, children: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    encode_field(tag, &join_fields(children))
}

/// Check that a tag is exactly two ASCII digits
pub fn validate_tag(tag: &str) -> Result<()> {
    let bytes = tag.as_bytes();
    if bytes.len() != TAG_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidTag(tag.to_string()));
    }
    Ok(())
}

fn validate_value(tag: &str, value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_LEN {
        return Err(Error::ValueTooLong {
            tag: tag.to_string(),
            len: value.len(),
            max: MAX_VALUE_LEN,
        });
    }
    Ok(())
}

/// Read a flat run of TLV fields
///
/// Only one level is decoded. A container's nested fields are obtained by
/// calling this again on its value.
pub fn parse_fields(input: &str) -> Result<Vec<TlvField>> {
    let bytes = input.as_bytes();
    let mut fields = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let header_end = offset + TAG_LEN + LENGTH_LEN;
        let header = input
            .get(offset..header_end)
            .ok_or_else(|| Error::malformed(offset, "truncated field header"))?;

        let (tag, len) = header.split_at(TAG_LEN);
        validate_tag(tag).map_err(|_| Error::malformed(offset, format!("bad tag {:?}", tag)))?;

        if !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed(
                offset + TAG_LEN,
                format!("bad length {:?}", len),
            ));
        }
        let len: usize = len
            .parse()
            .map_err(|_| Error::malformed(offset + TAG_LEN, "bad length"))?;

        let value_end = header_end + len;
        let value = input.get(header_end..value_end).ok_or_else(|| {
            Error::malformed(
                header_end,
                format!("tag {} declares {} bytes, {} left", tag, len, bytes.len() - header_end),
            )
        })?;

        fields.push(TlvField {
            tag: tag.to_string(),
            value: value.to_string(),
        });
        offset = value_end;
    }

    Ok(fields)
}
