use bytes::{Buf, BufMut};

use crate::error::ProfileError;

/// Value of the 32-bit magic cookie at container offset 4.
pub const SAVE_COOKIE: u32 = 0x15ED_1B1F;
/// Required value of the upper 16 bits of every section type word.
pub const SECTION_COOKIE: u16 = 0x01CE;
/// Tag value terminating the section walk.
pub const SECTION_EOF_TAG: u16 = 255;
/// Container header length: 4 reserved bytes + 4-byte magic cookie.
pub const SAVE_HEADER_LEN: usize = 8;
/// Per-section framing length: payload length word + type word.
pub const SECTION_HEADER_LEN: usize = 8;

/// Known content-section tags within the save container.
///
/// The EOF marker is framing, not content; it never surfaces as a
/// section (see [`SECTION_EOF_TAG`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Nospam, public key, and secret key, tightly packed.
    NospamKeys,
    /// DHT state, opaque here.
    Dht,
    /// Friend list, opaque here.
    Friends,
    /// UTF-8 display name.
    Name,
    /// UTF-8 status message.
    StatusMessage,
    /// One-byte user status ordinal.
    Status,
    /// TCP relay list, opaque here.
    TcpRelays,
    /// Onion path node list, opaque here.
    PathNodes,
}

impl SectionKind {
    /// Maps a wire tag to a known section, `None` for tags skipped under
    /// the forward-compatibility policy.
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(Self::NospamKeys),
            2 => Some(Self::Dht),
            3 => Some(Self::Friends),
            4 => Some(Self::Name),
            5 => Some(Self::StatusMessage),
            6 => Some(Self::Status),
            10 => Some(Self::TcpRelays),
            11 => Some(Self::PathNodes),
            _ => None,
        }
    }

    /// The wire tag carried in the low 16 bits of the type word.
    pub fn tag(self) -> u16 {
        match self {
            Self::NospamKeys => 1,
            Self::Dht => 2,
            Self::Friends => 3,
            Self::Name => 4,
            Self::StatusMessage => 5,
            Self::Status => 6,
            Self::TcpRelays => 10,
            Self::PathNodes => 11,
        }
    }
}

/// One framed section: its wire tag and borrowed payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSection<'a> {
    pub tag: u16,
    pub payload: &'a [u8],
}

/// Streaming reader over the section region of a save container.
///
/// Validates the outer header once at construction, then yields framed
/// sections until the EOF tag or until fewer than a length word's worth
/// of bytes remain (both are clean termination).
#[derive(Debug)]
pub struct SectionReader<'a> {
    buf: &'a [u8],
    done: bool,
}

impl<'a> SectionReader<'a> {
    /// Wraps a full save buffer, checking the reserved word and magic
    /// cookie framing.
    pub fn new(data: &'a [u8]) -> Result<Self, ProfileError> {
        if data.len() < SAVE_HEADER_LEN {
            return Err(ProfileError::CorruptContainer(
                "buffer shorter than save header",
            ));
        }
        let mut header = &data[..SAVE_HEADER_LEN];
        let _reserved = header.get_u32_le();
        let cookie = header.get_u32_le();
        if cookie != SAVE_COOKIE {
            return Err(ProfileError::CorruptContainer("bad magic cookie"));
        }
        Ok(Self {
            buf: &data[SAVE_HEADER_LEN..],
            done: false,
        })
    }

    /// Yields the next framed section, `None` on clean termination.
    ///
    /// A tail of 4..8 bytes holds a length word but no complete type
    /// word and is reported as truncation, not termination.
    pub fn next_section(&mut self) -> Result<Option<RawSection<'a>>, ProfileError> {
        if self.done || self.buf.len() < 4 {
            return Ok(None);
        }
        if self.buf.len() < SECTION_HEADER_LEN {
            return Err(ProfileError::Truncated);
        }

        let mut cursor = self.buf;
        let length = cursor.get_u32_le() as usize;
        let type_word = cursor.get_u32_le();
        let cookie = (type_word >> 16) as u16;
        let tag = (type_word & 0xFFFF) as u16;
        if cookie != SECTION_COOKIE {
            return Err(ProfileError::CorruptContainer("bad section cookie"));
        }
        if tag == SECTION_EOF_TAG {
            self.done = true;
            return Ok(None);
        }
        if cursor.len() < length {
            return Err(ProfileError::Truncated);
        }

        let payload = &cursor[..length];
        self.buf = &cursor[length..];
        Ok(Some(RawSection { tag, payload }))
    }
}

/// Incremental writer emitting save-container framing.
#[derive(Debug)]
pub struct SectionWriter {
    out: Vec<u8>,
}

impl SectionWriter {
    /// Starts a container with the reserved word and magic cookie.
    pub fn new() -> Self {
        let mut out = Vec::new();
        out.put_u32_le(0);
        out.put_u32_le(SAVE_COOKIE);
        Self { out }
    }

    /// Appends one framed section.
    pub fn section(&mut self, tag: u16, payload: &[u8]) -> &mut Self {
        self.out.put_u32_le(payload.len() as u32);
        self.out
            .put_u32_le((u32::from(SECTION_COOKIE) << 16) | u32::from(tag));
        self.out.put_slice(payload);
        self
    }

    /// Terminates the container with the EOF marker and returns the
    /// built bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.out.put_u32_le(0);
        self.out
            .put_u32_le((u32::from(SECTION_COOKIE) << 16) | u32::from(SECTION_EOF_TAG));
        self.out
    }
}

impl Default for SectionWriter {
    fn default() -> Self {
        Self::new()
    }
}
