//
// meli
//
// Copyright 2024 Emmanouil Pitsidianakis <manos@pitsidianak.is>
//
// This file is part of meli.
//
// meli is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// meli is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with meli. If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later

use std::borrow::Cow;

use melib_charset::{convert::convert, normalize, Converter, ErrorKind, Transcoder};

#[test]
fn test_convert_message_bodies() {
    // Bodies labelled with the charset names mail clients actually send.
    for (body, label, expected) in [
        (&b"na\xefve caf\xe9"[..], "ISO-8859-1", "naïve café"),
        (b"na\xefve caf\xe9", "\"latin1\"", "naïve café"),
        (b"\x93quoted\x94", "us-ascii", "\u{201c}quoted\u{201d}"),
        (b"\xa4 100", "iso-8859-15", "€ 100"),
        (b"\xa4 100", "x-unknown", "€ 100"),
        (b"\xcf\xf0\xe8\xe2\xe5\xf2", "windows-1251", "Привет"),
        (b"\xcf\xf0\xe8\xe2\xe5\xf2", "204", "Привет"),
        (b"\xc4\xe3\xba\xc3", "gb2312", "你好"),
        (b"\xbe\xc8\xb3\xe7", "ks_c_5601-1987", "안녕"),
        (b"\x1b$B$3$s$K$A$O\x1b(B", "iso-2022-jp", "こんにちは"),
    ] {
        assert_eq!(
            convert(body, label, None),
            expected.as_bytes(),
            "while converting from {:?}",
            label
        );
    }
}

#[test]
fn test_convert_falls_back_to_input() {
    for (body, label, to) in [
        (&b"\x00\x01\xff"[..], "binary", None),
        (b"abc", "x-no-such-charset", None),
        (b"\xff\xfe", "utf-8", Some("iso-8859-2")),
        (b"&Jjo", "UTF7-IMAP", None),
        (b"abc", "utf-8", Some("binary")),
    ] {
        assert!(
            matches!(convert(body, label, to), Cow::Borrowed(b) if b == body),
            "{:?} -> {:?}",
            label,
            to
        );
    }
}

#[derive(Debug)]
struct Ascii;

impl Transcoder for Ascii {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn try_convert(&self, input: &[u8], from: &str, to: &str) -> Option<Vec<u8>> {
        if from != "ASCII-ONLY" || to != "UTF-8" || !input.is_ascii() {
            return None;
        }
        Some(input.to_vec())
    }
}

#[test]
fn test_convert_custom_transcoder() {
    assert_eq!(normalize("ascii-only").as_deref(), Some("ASCII-ONLY"));
    let mut converter = Converter::default();
    assert_eq!(
        converter
            .try_convert(b"INBOX", "ascii-only", None)
            .unwrap_err()
            .kind,
        ErrorKind::NotSupported
    );
    converter.push_transcoder(Box::new(Ascii));
    assert_eq!(
        converter
            .try_convert(b"INBOX", "ascii-only", None)
            .unwrap(),
        b"INBOX"
    );
    // Routed through UTF-8 by the dispatcher.
    assert_eq!(
        converter
            .try_convert(b"INBOX", "ascii-only", Some("utf7-imap"))
            .unwrap(),
        b"INBOX"
    );
    assert!(converter
        .try_convert(b"\xe9", "ascii-only", None)
        .is_err());
}

#[test]
fn test_convert_korean_and_chinese_client_labels() {
    for (body, label, expected) in [
        (&b"\xbe\xc8\xb3\xe7"[..], "windows-949", "안녕"),
        (b"\xbe\xc8\xb3\xe7", "129", "안녕"),
        (b"\xa4\xa4\xa4\xe5", "ms950", "中文"),
    ] {
        assert_eq!(
            convert(body, label, None),
            expected.as_bytes(),
            "while converting from {:?}",
            label
        );
    }
}
