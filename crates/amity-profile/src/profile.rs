use bytes::BufMut;

use amity_core::{Address, Key, KEY_LEN, NOSPAM_LEN};

use crate::encrypted::is_encrypted;
use crate::error::ProfileError;
use crate::section::{SectionKind, SectionReader, SectionWriter};

/// Serialized length of the identity section payload.
const NOSPAM_KEYS_LEN: usize = NOSPAM_LEN + 2 * KEY_LEN;

/// Owner presence status stored in the save container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Online with no particular status; the default when the section is
    /// absent.
    #[default]
    None,
    /// Owner marked away.
    Away,
    /// Owner marked busy.
    Busy,
}

impl Status {
    /// Maps a wire ordinal to a status.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Away),
            2 => Some(Self::Busy),
            _ => None,
        }
    }

    /// The wire ordinal for this status.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Away => 1,
            Self::Busy => 2,
        }
    }
}

/// Read-only projection of one identity's save container.
///
/// Produced whole by [`Profile::parse`] or assembled via [`Profile::new`]
/// and the `with_*` builders for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    address: Address,
    secret_key: Key,
    name: Option<String>,
    status_message: Option<String>,
    status: Status,
}

impl Profile {
    /// Assembles a profile from its identity material.
    pub fn new(address: Address, secret_key: [u8; KEY_LEN]) -> Self {
        Self {
            address,
            secret_key: Key::secret(secret_key),
            name: None,
            status_message: None,
            status: Status::None,
        }
    }

    /// Sets the owner's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the owner's status message.
    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Sets the owner's presence status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Decodes a plaintext save container.
    ///
    /// All-or-nothing: any framing or payload inconsistency anywhere in
    /// the walk fails the whole parse, and no partially populated profile
    /// is observable. Encrypted containers are rejected up front, before
    /// any section walk. Opaque and unknown sections are consumed by
    /// their declared length and skipped; unknown tags are never fatal.
    pub fn parse(data: &[u8]) -> Result<Self, ProfileError> {
        if is_encrypted(data) {
            return Err(ProfileError::Encrypted);
        }

        let mut reader = SectionReader::new(data)?;
        let mut identity: Option<(Address, Key)> = None;
        let mut name = None;
        let mut status_message = None;
        let mut status = Status::None;

        while let Some(section) = reader.next_section()? {
            match SectionKind::from_tag(section.tag) {
                Some(SectionKind::NospamKeys) => {
                    identity = Some(decode_nospam_keys(section.payload)?);
                }
                Some(SectionKind::Name) => {
                    name = Some(decode_text(section.payload, "name is not valid utf-8")?);
                }
                Some(SectionKind::StatusMessage) => {
                    status_message = Some(decode_text(
                        section.payload,
                        "status message is not valid utf-8",
                    )?);
                }
                Some(SectionKind::Status) => {
                    status = decode_status(section.payload)?;
                }
                Some(SectionKind::Dht)
                | Some(SectionKind::Friends)
                | Some(SectionKind::TcpRelays)
                | Some(SectionKind::PathNodes) => {
                    tracing::debug!(
                        tag = section.tag,
                        len = section.payload.len(),
                        "skipping opaque section"
                    );
                }
                None => {
                    tracing::debug!(
                        tag = section.tag,
                        len = section.payload.len(),
                        "skipping unknown section"
                    );
                }
            }
        }

        let (address, secret_key) =
            identity.ok_or(ProfileError::CorruptContainer("missing identity section"))?;
        Ok(Self {
            address,
            secret_key,
            name,
            status_message,
            status,
        })
    }

    /// Serializes the profile back into container framing.
    ///
    /// Sections are emitted in identity, name, status-message, status
    /// order; absent optional text fields emit no section. The result
    /// parses back to an equal profile.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut identity = Vec::with_capacity(NOSPAM_KEYS_LEN);
        identity.put_u32_le(self.address.nospam());
        let public_key = self.address.public_key();
        identity.put_slice(public_key.as_bytes());
        identity.put_slice(self.secret_key.as_bytes());

        let mut writer = SectionWriter::new();
        writer.section(SectionKind::NospamKeys.tag(), &identity);
        if let Some(name) = &self.name {
            writer.section(SectionKind::Name.tag(), name.as_bytes());
        }
        if let Some(message) = &self.status_message {
            writer.section(SectionKind::StatusMessage.tag(), message.as_bytes());
        }
        writer.section(SectionKind::Status.tag(), &[self.status.ordinal()]);
        writer.finish()
    }

    /// The owner's full public address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The owner's secret key.
    pub fn secret_key(&self) -> &Key {
        &self.secret_key
    }

    /// The owner's display name, if ever written.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The owner's status message, if ever written.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The owner's presence status.
    pub fn status(&self) -> Status {
        self.status
    }
}

fn decode_nospam_keys(payload: &[u8]) -> Result<(Address, Key), ProfileError> {
    if payload.len() != NOSPAM_KEYS_LEN {
        return Err(ProfileError::CorruptContainer(
            "identity section length mismatch",
        ));
    }
    let nospam = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let mut public_key = [0_u8; KEY_LEN];
    public_key.copy_from_slice(&payload[NOSPAM_LEN..NOSPAM_LEN + KEY_LEN]);
    let mut secret_key = [0_u8; KEY_LEN];
    secret_key.copy_from_slice(&payload[NOSPAM_LEN + KEY_LEN..]);

    let address = Address::from_parts(&Key::public(public_key), nospam)
        .map_err(|_| ProfileError::DecodeFailure("identity section key rejected"))?;
    Ok((address, Key::secret(secret_key)))
}

fn decode_text(payload: &[u8], context: &'static str) -> Result<String, ProfileError> {
    std::str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|_| ProfileError::DecodeFailure(context))
}

fn decode_status(payload: &[u8]) -> Result<Status, ProfileError> {
    if payload.len() != 1 {
        return Err(ProfileError::DecodeFailure(
            "status section must be exactly one byte",
        ));
    }
    Status::from_ordinal(payload[0]).ok_or(ProfileError::DecodeFailure("unknown status ordinal"))
}

#[cfg(test)]
mod tests {
    use amity_core::{Address, Key};

    use super::{Profile, Status};
    use crate::error::ProfileError;
    use crate::section::{SectionWriter, SAVE_HEADER_LEN};

    const PUBLIC_KEY: [u8; 32] = [0x11; 32];
    const SECRET_KEY: [u8; 32] = [0x22; 32];
    const NOSPAM: u32 = 0x0403_0201;

    fn identity_payload() -> Vec<u8> {
        let mut payload = NOSPAM.to_le_bytes().to_vec();
        payload.extend_from_slice(&PUBLIC_KEY);
        payload.extend_from_slice(&SECRET_KEY);
        payload
    }

    fn fixture_address() -> Address {
        Address::from_parts(&Key::public(PUBLIC_KEY), NOSPAM).expect("public key should build")
    }

    #[test]
    fn parses_fully_populated_container() {
        let mut writer = SectionWriter::new();
        writer
            .section(4, b"Test")
            .section(5, b"Hey")
            .section(6, &[1])
            .section(1, &identity_payload());
        let data = writer.finish();

        let profile = Profile::parse(&data).expect("container should parse");
        assert_eq!(profile.address(), &fixture_address());
        assert_eq!(profile.secret_key(), &Key::secret(SECRET_KEY));
        assert_eq!(profile.name(), Some("Test"));
        assert_eq!(profile.status_message(), Some("Hey"));
        assert_eq!(profile.status(), Status::Away);
    }

    #[test]
    fn optional_sections_default_when_absent() {
        let mut writer = SectionWriter::new();
        writer.section(1, &identity_payload());
        let data = writer.finish();

        let profile = Profile::parse(&data).expect("identity alone should parse");
        assert_eq!(profile.name(), None);
        assert_eq!(profile.status_message(), None);
        assert_eq!(profile.status(), Status::None);
    }

    #[test]
    fn unknown_section_is_skipped_not_fatal() {
        let mut writer = SectionWriter::new();
        writer
            .section(99, &[0xAA; 16])
            .section(1, &identity_payload())
            .section(4, b"Test");
        let data = writer.finish();

        let profile = Profile::parse(&data).expect("unknown tag must not abort");
        assert_eq!(profile.name(), Some("Test"));
    }

    #[test]
    fn opaque_sections_are_consumed_by_length() {
        let mut writer = SectionWriter::new();
        writer
            .section(2, &[0x01; 64])
            .section(3, &[0x02; 128])
            .section(10, &[0x03; 7])
            .section(11, &[0x04; 7])
            .section(1, &identity_payload());
        let data = writer.finish();

        let profile = Profile::parse(&data).expect("opaque sections must be skipped");
        assert_eq!(profile.address(), &fixture_address());
    }

    #[test]
    fn corrupting_any_magic_cookie_bit_fails_the_parse() {
        let mut writer = SectionWriter::new();
        writer.section(1, &identity_payload());
        let data = writer.finish();

        for bit in 0..32 {
            let mut corrupt = data.clone();
            corrupt[4 + bit / 8] ^= 1 << (bit % 8);
            assert!(
                Profile::parse(&corrupt).is_err(),
                "cookie bit {bit} flip must fail"
            );
        }
    }

    #[test]
    fn overlong_declared_length_fails_without_panic() {
        let mut writer = SectionWriter::new();
        writer.section(1, &identity_payload());
        let mut data = writer.finish();
        data[SAVE_HEADER_LEN] = 0xFF;
        data[SAVE_HEADER_LEN + 1] = 0xFF;

        assert_eq!(Profile::parse(&data), Err(ProfileError::Truncated));
    }

    #[test]
    fn missing_identity_section_fails() {
        let mut writer = SectionWriter::new();
        writer.section(4, b"Test");
        let data = writer.finish();

        assert_eq!(
            Profile::parse(&data),
            Err(ProfileError::CorruptContainer("missing identity section"))
        );
    }

    #[test]
    fn wrong_identity_length_fails() {
        let mut writer = SectionWriter::new();
        writer.section(1, &identity_payload()[..67]);
        let data = writer.finish();

        assert_eq!(
            Profile::parse(&data),
            Err(ProfileError::CorruptContainer(
                "identity section length mismatch"
            ))
        );
    }

    #[test]
    fn invalid_utf8_name_collapses_the_parse() {
        let mut writer = SectionWriter::new();
        writer
            .section(1, &identity_payload())
            .section(4, &[0xFF, 0xFE, 0xFD]);
        let data = writer.finish();

        assert_eq!(
            Profile::parse(&data),
            Err(ProfileError::DecodeFailure("name is not valid utf-8"))
        );
    }

    #[test]
    fn out_of_range_status_ordinal_fails() {
        let mut writer = SectionWriter::new();
        writer.section(1, &identity_payload()).section(6, &[9]);
        let data = writer.finish();

        assert_eq!(
            Profile::parse(&data),
            Err(ProfileError::DecodeFailure("unknown status ordinal"))
        );
    }

    #[test]
    fn encrypted_marker_is_rejected_before_the_walk() {
        let mut data = crate::encrypted::ENCRYPTED_MAGIC.to_vec();
        data.extend_from_slice(&[0x00; 32]);
        assert_eq!(Profile::parse(&data), Err(ProfileError::Encrypted));
    }

    #[test]
    fn serializer_round_trips_fully_populated_profile() {
        let profile = Profile::new(fixture_address(), SECRET_KEY)
            .with_name("Test")
            .with_status_message("Hey")
            .with_status(Status::Away);

        let reparsed = Profile::parse(&profile.to_bytes()).expect("own bytes should parse");
        assert_eq!(reparsed, profile);
    }

    #[test]
    fn serializer_round_trips_minimal_profile() {
        let profile = Profile::new(fixture_address(), SECRET_KEY);
        let data = profile.to_bytes();

        let reparsed = Profile::parse(&data).expect("own bytes should parse");
        assert_eq!(reparsed, profile);
        assert_eq!(reparsed.name(), None);
        assert_eq!(reparsed.status_message(), None);
    }

    #[test]
    fn status_ordinals_match_the_wire_values() {
        assert_eq!(Status::from_ordinal(0), Some(Status::None));
        assert_eq!(Status::from_ordinal(1), Some(Status::Away));
        assert_eq!(Status::from_ordinal(2), Some(Status::Busy));
        assert_eq!(Status::from_ordinal(3), None);
        for status in [Status::None, Status::Away, Status::Busy] {
            assert_eq!(Status::from_ordinal(status.ordinal()), Some(status));
        }
    }
}
