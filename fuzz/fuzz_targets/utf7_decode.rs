#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate melib_charset;

use melib_charset::{decode_utf7_imap, encode_utf7_imap};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes to valid UTF-8 is canonical and must re-encode to
    // the same bytes.
    if let Ok(decoded) = decode_utf7_imap(data) {
        if std::str::from_utf8(&decoded).is_ok() {
            assert_eq!(encode_utf7_imap(&decoded).unwrap(), data);
        }
    }
});
