//! Canonical hex conventions for key/address text rendering.
//!
//! Output is always uppercase, two digits per byte, no separators; input
//! is accepted in either case. Malformed input surfaces as an error,
//! never as a truncated value.

use crate::error::AddressError;

/// Encodes bytes as canonical uppercase hex.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decodes hex text of either case into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, AddressError> {
    Ok(hex::decode(text)?)
}
