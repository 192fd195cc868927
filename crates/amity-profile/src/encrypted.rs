/// Magic prefix marking a password-encrypted save container.
pub const ENCRYPTED_MAGIC: &[u8; 8] = b"toxEsave";

/// Classifies whether a save buffer is encrypted.
///
/// Inspects only the fixed magic prefix, so it is valid on any buffer and
/// independent of (and prior to) section parsing: encrypted blobs carry no
/// plaintext section structure to walk.
pub fn is_encrypted(data: &[u8]) -> bool {
    data.len() >= ENCRYPTED_MAGIC.len() && &data[..ENCRYPTED_MAGIC.len()] == ENCRYPTED_MAGIC
}
