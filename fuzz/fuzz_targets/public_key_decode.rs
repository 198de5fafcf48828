#![no_main]

use libfuzzer_sys::fuzz_target;
use idemix_params::ser::{decode_public_key, decode_secret_key, encode_public_key};

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else { return };
    let _ = decode_secret_key(xml);
    // Anything that decodes must re-encode to a document that decodes to the same key
    if let Ok(pk) = decode_public_key(xml) {
        let again = encode_public_key(&pk).expect("encode");
        assert_eq!(decode_public_key(&again).expect("re-decode"), pk);
    }
});
