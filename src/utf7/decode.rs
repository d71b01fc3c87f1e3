//
// meli - utf7 module.
//
// Copyright 2021 Emmanouil Pitsidianakis <manos@pitsidianak.is>
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

use super::{base64_value, is_printable_ascii, BitAccumulator, DecodeError};

/// Decode UTF-7 IMAP mailbox name
///
/// <https://datatracker.ietf.org/doc/html/rfc3501#section-5.1.3>
///
/// Each UTF-16 unit of a base64 run is written out as one to three bytes of
/// UTF-8. Surrogate units are written out individually, so a run carrying a
/// surrogate pair does not produce valid UTF-8.
///
/// On error nothing is returned; callers are expected to keep using the
/// original input.
pub fn decode_utf7_imap(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut position = 0;

    while let Some(&byte) = input.get(position) {
        if byte != b'&' {
            if !is_printable_ascii(u32::from(byte)) {
                return Err(DecodeError::InvalidLiteral { position });
            }
            out.push(byte);
            position += 1;
            continue;
        }

        let run_start = position;
        position += 1;
        if input.get(position) == Some(&b'-') {
            out.push(b'&');
            position += 1;
            continue;
        }

        let mut acc = BitAccumulator::new();
        while let Some(sextet) = input.get(position).copied().and_then(base64_value) {
            if let Some(unit) = acc.push_sextet(sextet) {
                push_utf8(unit, &mut out).ok_or(DecodeError::NonCanonical { position })?;
            }
            position += 1;
        }

        if !acc.is_canonical_end() {
            return Err(DecodeError::NonZeroPadding { position });
        }
        if input.get(position) != Some(&b'-') {
            return Err(DecodeError::UnterminatedRun {
                position: run_start,
            });
        }
        position += 1;

        // `&-` right after a run is a literal ampersand, anything else would
        // have to be merged into the previous run.
        if input.get(position) == Some(&b'&')
            && input.get(position + 1).is_some_and(|&next| next != b'-')
        {
            return Err(DecodeError::AdjacentRuns { position });
        }
    }

    Ok(out)
}

/// Returns `None` for printable US-ASCII, which must never be base64 encoded.
fn push_utf8(unit: u16, out: &mut Vec<u8>) -> Option<()> {
    let ch = u32::from(unit);
    if ch < 0x80 {
        if is_printable_ascii(ch) {
            return None;
        }
        out.push(ch as u8);
    } else if ch < 0x800 {
        out.push(0xc0 | (ch >> 6) as u8);
        out.push(0x80 | (ch & 0x3f) as u8);
    } else {
        out.push(0xe0 | (ch >> 12) as u8);
        out.push(0x80 | ((ch >> 6) & 0x3f) as u8);
        out.push(0x80 | (ch & 0x3f) as u8);
    }
    Some(())
}
