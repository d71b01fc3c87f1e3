#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate melib_charset;

use melib_charset::{decode_utf7_imap, encode_utf7_imap};

fuzz_target!(|data: &str| {
    let encoded = encode_utf7_imap(data.as_bytes()).unwrap();
    assert!(encoded.iter().all(|b| (0x20..0x7f).contains(b)));
    // Astral characters are replaced on encoding.
    if data.chars().all(|c| (c as u32) < 0x10000) {
        assert_eq!(decode_utf7_imap(&encoded).unwrap(), data.as_bytes());
    }
});
