//! Save-container (profile) codec for amity identities.
//!
//! Decodes the length-prefixed, typed-section save format into a
//! structured [`Profile`], serializes one back, and classifies encrypted
//! save buffers by their marker prefix.

pub mod encrypted;
pub mod error;
pub mod profile;
pub mod section;

pub use encrypted::{is_encrypted, ENCRYPTED_MAGIC};
pub use error::ProfileError;
pub use profile::{Profile, Status};
pub use section::{
    RawSection, SectionKind, SectionReader, SectionWriter, SAVE_COOKIE, SECTION_COOKIE,
    SECTION_EOF_TAG,
};
