#![no_main]

use amity_core::Address;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = Address::from_bytes(data);
    let _ = Address::is_valid(data);
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Address::from_hex(text);
        let _ = Address::is_valid_hex(text);
    }
});
