use thiserror::Error;

use amity_profile::ENCRYPTED_MAGIC;

/// Errors returned by save-cipher implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Buffer does not carry the encrypted-save marker.
    #[error("buffer is not an encrypted save")]
    NotEncrypted,
    /// Password or key material was rejected.
    #[error("decryption failed")]
    DecryptFailed,
}

/// Password-based encryption contract for save containers.
///
/// Implementations must emit ciphertexts that the profile crate's marker
/// detection classifies as encrypted, i.e. the marker prefix leads the
/// output.
pub trait SaveCipher {
    /// Encrypts a plaintext save under `password`.
    fn encrypt(&self, password: &str, plaintext: &[u8]) -> Vec<u8>;
    /// Decrypts an encrypted save produced by `encrypt`.
    fn decrypt(&self, password: &str, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// Reversible XOR-mask double under real marker framing.
///
/// Not an encryption scheme. Exists so marker classification and
/// decrypt-then-parse flows can be exercised without the native engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct XorMaskCipher;

fn mask_byte(password: &str, index: usize) -> u8 {
    let pw = password.as_bytes();
    if pw.is_empty() {
        0
    } else {
        pw[index % pw.len()]
    }
}

impl SaveCipher for XorMaskCipher {
    fn encrypt(&self, password: &str, plaintext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENCRYPTED_MAGIC.len() + plaintext.len());
        out.extend_from_slice(ENCRYPTED_MAGIC);
        out.extend(
            plaintext
                .iter()
                .enumerate()
                .map(|(i, b)| b ^ mask_byte(password, i)),
        );
        out
    }

    fn decrypt(&self, password: &str, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let body = ciphertext
            .strip_prefix(ENCRYPTED_MAGIC.as_slice())
            .ok_or(CipherError::NotEncrypted)?;
        Ok(body
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ mask_byte(password, i))
            .collect())
    }
}
