#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate melib_charset;

use melib_charset::{convert::convert, normalize};

fuzz_target!(|data: (&str, &[u8])| {
    let (label, body) = data;
    if let Some(token) = normalize(label) {
        assert!(!token.contains('$'));
    }
    let _ = convert(body, label, None);
});
