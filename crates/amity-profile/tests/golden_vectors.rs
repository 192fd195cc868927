use amity_core::{Address, Key};
use amity_profile::{Profile, Status};

fn read_vector(name: &str) -> String {
    let path = format!("{}/tests/vectors/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path)
        .expect("vector file must exist")
        .trim()
        .to_string()
}

fn sample_profile() -> Profile {
    let address =
        Address::from_parts(&Key::public([0x11_u8; 32]), 0x0403_0201).expect("key is public");
    Profile::new(address, [0x22_u8; 32])
        .with_name("Test")
        .with_status_message("Hey")
        .with_status(Status::Away)
}

#[test]
fn golden_profile_container_vector_matches() {
    let encoded = sample_profile().to_bytes();
    let hex = hex::encode(&encoded);
    let expected = read_vector("profile_v1.hex");
    assert_eq!(
        hex, expected,
        "update tests/vectors/profile_v1.hex to: {hex}"
    );
}

#[test]
fn golden_profile_vector_parses_back_to_the_fixture() {
    let raw = hex::decode(read_vector("profile_v1.hex")).expect("vector must be valid hex");
    let profile = Profile::parse(&raw).expect("vector should parse");

    assert_eq!(profile, sample_profile());
    assert_eq!(profile.name(), Some("Test"));
    assert_eq!(profile.status_message(), Some("Hey"));
    assert_eq!(profile.status(), Status::Away);
    assert_eq!(profile.address().nospam(), 0x0403_0201);
    assert_eq!(profile.secret_key(), &Key::secret([0x22_u8; 32]));
}

#[test]
fn golden_address_vector_matches_display_form() {
    let expected = read_vector("address_v1.hex");
    let address = sample_profile().address().to_owned();

    assert_eq!(
        hex::encode(address.to_bytes()),
        expected,
        "update tests/vectors/address_v1.hex to: {}",
        hex::encode(address.to_bytes())
    );
    // Display renders the canonical uppercase form of the same bytes.
    assert_eq!(address.to_string(), expected.to_uppercase());

    let reparsed = Address::from_hex(&expected).expect("vector should parse as an address");
    assert_eq!(reparsed, address);
}

#[test]
fn profile_round_trip_is_lossless() {
    let profile = sample_profile();
    let reparsed = Profile::parse(&profile.to_bytes()).expect("own bytes should parse");
    assert_eq!(reparsed, profile);
}
