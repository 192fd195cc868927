/// Byte length of a public or secret key (identical for both kinds).
pub const KEY_LEN: usize = 32;
/// Byte length of the owner-chosen anti-spam nonce inside an address.
pub const NOSPAM_LEN: usize = 4;
/// Byte length of the XOR-fold checksum trailer.
pub const CHECKSUM_LEN: usize = 2;
/// Total serialized address length: key + nospam + checksum.
pub const ADDRESS_LEN: usize = KEY_LEN + NOSPAM_LEN + CHECKSUM_LEN;
/// Hex text length of a serialized address.
pub const ADDRESS_HEX_LEN: usize = ADDRESS_LEN * 2;
