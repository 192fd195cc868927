use serde::{Deserialize, Serialize};

use crate::error::AddressError;
use crate::types::KEY_LEN;

/// Role of a key's 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    Public,
    Secret,
}

/// Fixed 32-byte key value.
///
/// Two keys are equal iff they have the same kind and the same bytes. The
/// value owns its storage; construction from a slice copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    kind: KeyKind,
    bytes: [u8; KEY_LEN],
}

impl Key {
    /// Wraps owned public-key bytes.
    pub fn public(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            kind: KeyKind::Public,
            bytes,
        }
    }

    /// Wraps owned secret-key bytes.
    pub fn secret(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            kind: KeyKind::Secret,
            bytes,
        }
    }

    /// Copies a key out of a slice, validating the exact expected length.
    pub fn from_slice(kind: KeyKind, slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; KEY_LEN] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidFormat("key must be exactly 32 bytes"))?;
        Ok(Self { kind, bytes })
    }

    /// Parses a key from hex text of either case.
    pub fn from_hex(kind: KeyKind, text: &str) -> Result<Self, AddressError> {
        let raw = crate::hex::decode(text)?;
        Self::from_slice(kind, &raw)
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Borrows the key bytes. The value itself is immutable.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Returns an owned copy of the key bytes.
    pub fn to_bytes(&self) -> [u8; KEY_LEN] {
        self.bytes
    }

    /// Renders the key as canonical uppercase hex.
    pub fn to_hex(&self) -> String {
        crate::hex::encode(&self.bytes)
    }
}
