#![no_main]

use amity_profile::{is_encrypted, Profile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = is_encrypted(data);
    let _ = Profile::parse(data);
});
