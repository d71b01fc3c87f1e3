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

use melib_charset::{conf::ConversionSettings, convert::Converter, ErrorKind};

#[derive(Debug, serde_derive::Deserialize)]
struct Settings {
    #[serde(default)]
    charset: ConversionSettings,
}

#[test]
fn test_conversion_settings_in_config_file() {
    let s: Settings = toml::from_str(
        r#"
[charset]
default_charset = "koi8-r"
ignore_unmappable = false
    "#,
    )
    .unwrap();
    assert!(s.charset.cache_labels);
    assert!(!s.charset.ignore_unmappable);
    let converter = Converter::new(s.charset).unwrap();
    assert_eq!(converter.default_charset(), "KOI8-R");
    assert_eq!(
        converter
            .try_convert("мир".as_bytes(), "UTF-8", None)
            .unwrap(),
        b"\xcd\xc9\xd2"
    );
    assert_eq!(
        converter
            .try_convert("世界".as_bytes(), "UTF-8", None)
            .unwrap_err()
            .kind,
        ErrorKind::NotSupported
    );

    let s: Settings = toml::from_str("").unwrap();
    assert_eq!(s.charset, ConversionSettings::default());

    let s: Settings = toml::from_str(
        r#"
[charset]
default_charset = "x-binary"
    "#,
    )
    .unwrap();
    let err = Converter::new(s.charset).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
    assert!(err.summary.contains("default_charset"));

    assert!(toml::from_str::<Settings>(
        r#"
[charset]
default-charset = "UTF-8"
    "#,
    )
    .is_err());
}
