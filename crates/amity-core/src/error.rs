use thiserror::Error;

/// Errors returned by key and address constructors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressError {
    /// Wrong length, wrong key kind, or otherwise malformed input.
    #[error("invalid format: {0}")]
    InvalidFormat(&'static str),
    /// Input text is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// Stored checksum trailer does not match the recomputed value.
    #[error("checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { stored: u16, computed: u16 },
}

#[cfg(test)]
mod tests {
    use super::AddressError;

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            AddressError::InvalidFormat("bad length").to_string(),
            "invalid format: bad length"
        );
        assert_eq!(
            AddressError::ChecksumMismatch {
                stored: 0x0102,
                computed: 0x0304,
            }
            .to_string(),
            "checksum mismatch: stored 0x0102, computed 0x0304"
        );
    }
}
