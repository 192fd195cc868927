use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;
use crate::key::{Key, KeyKind};
use crate::types::{ADDRESS_LEN, CHECKSUM_LEN, KEY_LEN, NOSPAM_LEN};

/// Byte offset of the nospam field within a serialized address.
const NOSPAM_OFFSET: usize = KEY_LEN;
/// Byte offset of the checksum trailer within a serialized address.
const CHECKSUM_OFFSET: usize = KEY_LEN + NOSPAM_LEN;

/// Computes the 2-byte XOR-fold checksum over `bytes`.
///
/// Each input byte is XORed into accumulator byte `i % 2`; the final
/// accumulator is read back as a little-endian u16. This is an
/// integrity/typo check, not a cryptographic digest.
pub fn address_checksum(bytes: &[u8]) -> u16 {
    let mut acc = [0_u8; CHECKSUM_LEN];
    for (i, byte) in bytes.iter().enumerate() {
        acc[i % CHECKSUM_LEN] ^= byte;
    }
    u16::from_le_bytes(acc)
}

/// Full 38-byte messenger address: public key, nospam, checksum trailer.
///
/// The checksum invariant is enforced at construction; a value of this
/// type always holds internally consistent bytes, and construction copies
/// its input so later caller-side mutation cannot reach a validated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Copies and validates a full serialized address.
    ///
    /// The input must be exactly 38 bytes and carry a checksum trailer
    /// matching the recomputed fold over the first 36.
    pub fn from_bytes(input: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ADDRESS_LEN] = input
            .try_into()
            .map_err(|_| AddressError::InvalidFormat("address must be exactly 38 bytes"))?;
        let stored = u16::from_le_bytes([bytes[CHECKSUM_OFFSET], bytes[CHECKSUM_OFFSET + 1]]);
        let computed = address_checksum(&bytes[..CHECKSUM_OFFSET]);
        if stored != computed {
            return Err(AddressError::ChecksumMismatch { stored, computed });
        }
        Ok(Self { bytes })
    }

    /// Parses an address from hex text of either case.
    pub fn from_hex(text: &str) -> Result<Self, AddressError> {
        let raw = crate::hex::decode(text)?;
        if raw.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidFormat(
                "address hex must decode to exactly 38 bytes",
            ));
        }
        Self::from_bytes(&raw)
    }

    /// Builds an address from a public key and an owner-chosen nospam,
    /// computing the checksum trailer.
    pub fn from_parts(public_key: &Key, nospam: u32) -> Result<Self, AddressError> {
        if public_key.kind() != KeyKind::Public {
            return Err(AddressError::InvalidFormat("address requires a public key"));
        }
        let mut bytes = [0_u8; ADDRESS_LEN];
        bytes[..KEY_LEN].copy_from_slice(public_key.as_bytes());
        bytes[NOSPAM_OFFSET..CHECKSUM_OFFSET].copy_from_slice(&nospam.to_le_bytes());
        let checksum = address_checksum(&bytes[..CHECKSUM_OFFSET]);
        bytes[CHECKSUM_OFFSET..].copy_from_slice(&checksum.to_le_bytes());
        Ok(Self { bytes })
    }

    /// Checks a candidate buffer without failing loudly.
    ///
    /// Buffers longer than 38 bytes are accepted with only their first 38
    /// bytes validated, while [`Address::from_bytes`] demands an exact
    /// length. The asymmetry is long-standing observed behavior and is
    /// kept deliberately; downstream callers may rely on either side.
    pub fn is_valid(input: &[u8]) -> bool {
        if input.len() < ADDRESS_LEN {
            return false;
        }
        let stored = u16::from_le_bytes([input[CHECKSUM_OFFSET], input[CHECKSUM_OFFSET + 1]]);
        address_checksum(&input[..CHECKSUM_OFFSET]) == stored
    }

    /// Checks candidate hex text without failing loudly.
    ///
    /// Decodes then delegates to [`Address::is_valid`], so over-long hex
    /// carries the same prefix tolerance as over-long byte buffers.
    pub fn is_valid_hex(text: &str) -> bool {
        match crate::hex::decode(text) {
            Ok(raw) => Self::is_valid(&raw),
            Err(_) => false,
        }
    }

    /// Extracts the 32-byte public key.
    pub fn public_key(&self) -> Key {
        let mut key = [0_u8; KEY_LEN];
        key.copy_from_slice(&self.bytes[..KEY_LEN]);
        Key::public(key)
    }

    /// Returns the owner-chosen anti-spam nonce.
    pub fn nospam(&self) -> u32 {
        u32::from_le_bytes([
            self.bytes[NOSPAM_OFFSET],
            self.bytes[NOSPAM_OFFSET + 1],
            self.bytes[NOSPAM_OFFSET + 2],
            self.bytes[NOSPAM_OFFSET + 3],
        ])
    }

    /// Returns the stored checksum trailer.
    pub fn checksum(&self) -> u16 {
        u16::from_le_bytes([self.bytes[CHECKSUM_OFFSET], self.bytes[CHECKSUM_OFFSET + 1]])
    }

    /// Returns a new address carrying the same key under a different
    /// nospam. Stale copies of the old address stop validating against
    /// the owner, which is the point of rotating the nonce.
    pub fn with_nospam(&self, nospam: u32) -> Self {
        let mut bytes = self.bytes;
        bytes[NOSPAM_OFFSET..CHECKSUM_OFFSET].copy_from_slice(&nospam.to_le_bytes());
        let checksum = address_checksum(&bytes[..CHECKSUM_OFFSET]);
        bytes[CHECKSUM_OFFSET..].copy_from_slice(&checksum.to_le_bytes());
        Self { bytes }
    }

    /// Borrows the serialized address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    /// Returns an owned copy of the serialized address bytes.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::hex::encode(&self.bytes))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.bytes)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <Vec<u8>>::deserialize(deserializer)?;
        Self::from_bytes(&raw).map_err(serde::de::Error::custom)
    }
}
