use thiserror::Error;

/// Errors produced while decoding a save container.
///
/// Parsing is all-or-nothing: any variant means no [`crate::Profile`] was
/// produced and no partial state escaped. The variant payload is
/// diagnostic only; callers need only the success/failure distinction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Magic-cookie or section-cookie validation failed, or a required
    /// section is missing.
    #[error("corrupt container: {0}")]
    CorruptContainer(&'static str),
    /// A section declared more payload bytes than the buffer holds.
    #[error("truncated container: section payload overruns buffer")]
    Truncated,
    /// A section payload failed to decode.
    #[error("decode failure: {0}")]
    DecodeFailure(&'static str),
    /// The buffer carries the encrypted-save marker; decrypt it first.
    #[error("container is encrypted")]
    Encrypted,
}
