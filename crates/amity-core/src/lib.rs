//! Core amity identity primitives shared across crates.
//!
//! Includes the fixed-size key and address value types, the address
//! checksum, and canonical hex helpers.

pub mod address;
pub mod error;
pub mod hex;
pub mod key;
pub mod types;

pub use address::{address_checksum, Address};
pub use error::AddressError;
pub use key::{Key, KeyKind};
pub use types::{ADDRESS_HEX_LEN, ADDRESS_LEN, CHECKSUM_LEN, KEY_LEN, NOSPAM_LEN};
