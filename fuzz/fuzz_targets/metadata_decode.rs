#![no_main]

use libfuzzer_sys::fuzz_target;
use idemix_params::metadata::MetadataAttribute;
use num_bigint::BigUint;

fuzz_target!(|data: &[u8]| {
    let value = BigUint::from_bytes_be(data);
    if let Ok(attr) = MetadataAttribute::from_int(&value) {
        // Readers are total on any 24-byte buffer
        let _ = attr.version();
        let _ = attr.expiry();
        let _ = attr.credential_id();
        assert_eq!(attr.to_int(), value);
    }
});
