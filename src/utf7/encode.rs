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

use super::{is_printable_ascii, BitAccumulator, EncodeError};

/// Stands in for code points outside the Basic Multilingual Plane.
const REPLACEMENT_UNIT: u16 = 0xfffe;

/// Encode UTF-7 IMAP mailbox name
///
/// <https://datatracker.ietf.org/doc/html/rfc3501#section-5.1.3>
///
/// Input is read as UTF-8, accepting the historical 5 and 6 byte forms.
/// Code points above U+FFFF are encoded as U+FFFE.
pub fn encode_utf7_imap(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 2);
    let mut acc = BitAccumulator::new();
    let mut shifted = false;
    let mut position = 0;

    while position < input.len() {
        let (ch, len) = read_code_point(input, position)?;
        position += len;

        if is_printable_ascii(ch) {
            if shifted {
                acc.close_run(&mut out);
                shifted = false;
            }
            out.push(ch as u8);
            if ch == u32::from(b'&') {
                out.push(b'-');
            }
            continue;
        }

        if !shifted {
            out.push(b'&');
            shifted = true;
        }
        let unit = u16::try_from(ch).unwrap_or(REPLACEMENT_UNIT);
        acc.push_unit(unit, &mut out);
    }

    if shifted {
        acc.close_run(&mut out);
    }

    Ok(out)
}

/// Returns the code point starting at `position` and its length in bytes.
fn read_code_point(input: &[u8], position: usize) -> Result<(u32, usize), EncodeError> {
    let lead = input[position];
    let (mut ch, n) = match lead {
        0x00..=0x7f => return Ok((u32::from(lead), 1)),
        0x80..=0xbf | 0xfe | 0xff => return Err(EncodeError::InvalidLeadByte { position }),
        0xc0 | 0xc1 => return Err(EncodeError::Overlong { position }),
        0xc2..=0xdf => (u32::from(lead & 0x1f), 1),
        0xe0..=0xef => (u32::from(lead & 0x0f), 2),
        0xf0..=0xf7 => (u32::from(lead & 0x07), 3),
        0xf8..=0xfb => (u32::from(lead & 0x03), 4),
        0xfc..=0xfd => (u32::from(lead & 0x01), 5),
    };

    let Some(continuation) = input.get(position + 1..=position + n) else {
        return Err(EncodeError::Truncated { position });
    };
    for (i, &byte) in continuation.iter().enumerate() {
        if byte & 0xc0 != 0x80 {
            return Err(EncodeError::InvalidContinuation {
                position: position + 1 + i,
            });
        }
        ch = (ch << 6) | u32::from(byte & 0x3f);
    }

    // A value that fits in fewer bytes.
    if n > 1 && ch >> (n * 5 + 1) == 0 {
        return Err(EncodeError::Overlong { position });
    }

    Ok((ch, n + 1))
}
