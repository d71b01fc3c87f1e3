//
// meli - charset module.
//
// Copyright 2017 Emmanouil Pitsidianakis <manos@pitsidianak.is>
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

//! Static alias tables, keyed by labels stripped down to `[A-Z0-9]`.

/// Known aliases, some of them from the HTML5 standard.
///
/// Bare numbers are the charset ids some mail clients put in place of a name.
pub fn alias(key: &str) -> Option<&'static str> {
    Some(match key {
        "USASCII" | "ANSIX31101983" | "ANSIX341968" => "WINDOWS-1252",
        "UNKNOWN8BIT" | "UNKNOWN" | "USERDEFINED" => "ISO-8859-15",
        "KSC56011987" => "EUC-KR",
        "GB2312" | "GB231280" => "GBK",
        "UNICODE" => "UTF-8",
        "UTF7IMAP" => "UTF7-IMAP",
        "TIS620" => "WINDOWS-874",
        "ISO88599" => "WINDOWS-1254",
        "ISO885911" => "WINDOWS-874",
        "MACROMAN" => "MACINTOSH",
        "77" => "MAC",
        "128" => "SHIFT-JIS",
        "129" => "CP949",
        "130" => "CP1361",
        "134" => "GBK",
        "136" => "BIG5",
        "161" => "WINDOWS-1253",
        "162" => "WINDOWS-1254",
        "163" => "WINDOWS-1258",
        "177" => "WINDOWS-1255",
        "178" => "WINDOWS-1256",
        "186" => "WINDOWS-1257",
        "204" => "WINDOWS-1251",
        "222" => "WINDOWS-874",
        "238" => "WINDOWS-1250",
        "MS950" => "CP950",
        "WINDOWS949" => "UHC",
        _ => return None,
    })
}

/// ISO-8859 part for the suffix of a `LATIN*` label. `LATIN1` is handled by
/// the caller.
pub fn latin_alias(suffix: &str) -> Option<&'static str> {
    Some(match suffix {
        "2" => "ISO-8859-2",
        "3" => "ISO-8859-3",
        "4" => "ISO-8859-4",
        "5" => "ISO-8859-9",
        "6" => "ISO-8859-10",
        "7" => "ISO-8859-13",
        "8" => "ISO-8859-14",
        "9" => "ISO-8859-15",
        "10" => "ISO-8859-16",
        "ARABIC" => "ISO-8859-6",
        "CYRILLIC" => "ISO-8859-5",
        "GREEK" | "GREEK1" => "ISO-8859-7",
        "HEBREW" => "ISO-8859-8",
        _ => return None,
    })
}
