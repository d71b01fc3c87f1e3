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

//! Encoding and decoding of IMAP mailbox names in modified [UTF-7].
//!
//! Modified UTF-7 is defined by the [IMAP] standard in [RFC 3501
//! (#5.1.3)]. It differs from plain [UTF-7] in its shift character (`&`
//! instead of `+`), its base64 alphabet (`,` instead of `/`) and in requiring
//! every shifted run to be closed with `-`.
//!
//! [RFC 2060 (#5.1.3)] point 5 intends the encoding to be unique, so the
//! decoder rejects every non-canonical form such as `&ACY-` (instead of `&-`)
//! or `&AMA-&AMA-` (instead of `&AMAAwA-`).
//!
//! [UTF-7]: <https://datatracker.ietf.org/doc/html/rfc2152>
//! [IMAP]: <https://datatracker.ietf.org/doc/html/rfc3501>
//! [RFC 3501 (#5.1.3)]: <https://datatracker.ietf.org/doc/html/rfc3501#section-5.1.3>
//! [RFC 2060 (#5.1.3)]: <https://datatracker.ietf.org/doc/html/rfc2060#section-5.1.3>

use std::{borrow::Cow, fmt};

mod decode;
mod encode;

pub use decode::decode_utf7_imap;
pub use encode::encode_utf7_imap;

/// Charset token of modified UTF-7 as returned by
/// [`normalize`](crate::charset::normalize).
pub const UTF7_IMAP: &str = "UTF7-IMAP";

/// Modified base64 alphabet, `,` replaces `/`.
pub(crate) const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+,";

/// Reverse of [`BASE64_ALPHABET`] over US-ASCII, `-1` marks bytes outside the
/// alphabet.
#[rustfmt::skip]
pub(crate) const BASE64_INDEX: [i8; 128] = [
    -1,-1,-1,-1, -1,-1,-1,-1, -1,-1,-1,-1, -1,-1,-1,-1,
    -1,-1,-1,-1, -1,-1,-1,-1, -1,-1,-1,-1, -1,-1,-1,-1,
    -1,-1,-1,-1, -1,-1,-1,-1, -1,-1,-1,62, 63,-1,-1,-1,
    52,53,54,55, 56,57,58,59, 60,61,-1,-1, -1,-1,-1,-1,
    -1, 0, 1, 2,  3, 4, 5, 6,  7, 8, 9,10, 11,12,13,14,
    15,16,17,18, 19,20,21,22, 23,24,25,-1, -1,-1,-1,-1,
    -1,26,27,28, 29,30,31,32, 33,34,35,36, 37,38,39,40,
    41,42,43,44, 45,46,47,48, 49,50,51,-1, -1,-1,-1,-1,
];

#[inline]
pub(crate) fn base64_value(byte: u8) -> Option<u8> {
    if byte & 0x80 != 0 {
        return None;
    }
    u8::try_from(BASE64_INDEX[usize::from(byte)]).ok()
}

/// Bytes that must always appear literally, never inside a base64 run.
#[inline]
pub(crate) const fn is_printable_ascii(c: u32) -> bool {
    0x20 <= c && c < 0x7f
}

/// Pending bits of a base64 run.
///
/// `cursor_offset` is the left shift the next sextet (decoding) or UTF-16 unit
/// (encoding) needs to line up with `pending_bits`. It starts at 10 for every
/// run and stays within `-4..=16`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BitAccumulator {
    pending_bits: u32,
    cursor_offset: i8,
}

impl Default for BitAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BitAccumulator {
    const RUN_START: i8 = 10;

    pub(crate) const fn new() -> Self {
        Self {
            pending_bits: 0,
            cursor_offset: Self::RUN_START,
        }
    }

    /// Feed one base64 sextet, returning a UTF-16 unit once 16 bits are
    /// complete.
    pub(crate) fn push_sextet(&mut self, sextet: u8) -> Option<u16> {
        let sextet = u32::from(sextet);
        if self.cursor_offset > 0 {
            self.pending_bits |= sextet << self.cursor_offset;
            self.cursor_offset -= 6;
            return None;
        }
        let unit = self.pending_bits | (sextet >> -self.cursor_offset);
        self.pending_bits = (sextet << (16 + self.cursor_offset)) & 0xffff;
        self.cursor_offset += 10;
        Some(unit as u16)
    }

    /// A run may only end on a unit boundary with all leftover bits zero.
    pub(crate) const fn is_canonical_end(&self) -> bool {
        self.pending_bits == 0 && self.cursor_offset >= 6
    }

    /// Pack one UTF-16 unit into base64 symbols appended to `out`.
    pub(crate) fn push_unit(&mut self, unit: u16, out: &mut Vec<u8>) {
        let unit = u32::from(unit);
        let mut k = self.cursor_offset;
        out.push(symbol(self.pending_bits | (unit >> k)));
        k -= 6;
        while k >= 0 {
            out.push(symbol((unit >> k) & 0x3f));
            k -= 6;
        }
        self.pending_bits = (unit << -k) & 0x3f;
        self.cursor_offset = k + 16;
    }

    /// Emit the last partial symbol, if any bits are pending, and the closing
    /// `-`. The accumulator is ready for a new run afterwards.
    pub(crate) fn close_run(&mut self, out: &mut Vec<u8>) {
        if self.cursor_offset > Self::RUN_START {
            out.push(symbol(self.pending_bits));
        }
        out.push(b'-');
        *self = Self::new();
    }
}

#[inline]
fn symbol(sextet: u32) -> u8 {
    BASE64_ALPHABET[(sextet & 0x3f) as usize]
}

/// Reasons a byte sequence is not canonical modified UTF-7.
///
/// `position` is the byte offset in the input where the problem was detected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DecodeError {
    /// A byte outside a base64 run that is not printable US-ASCII.
    InvalidLiteral { position: usize },
    /// Printable US-ASCII encoded inside a base64 run.
    NonCanonical { position: usize },
    /// A base64 run ended with non-zero or superfluous bits.
    NonZeroPadding { position: usize },
    /// A base64 run was not closed with `-`.
    UnterminatedRun { position: usize },
    /// A base64 run directly follows another one.
    AdjacentRuns { position: usize },
}

impl DecodeError {
    pub const fn position(&self) -> usize {
        match *self {
            Self::InvalidLiteral { position }
            | Self::NonCanonical { position }
            | Self::NonZeroPadding { position }
            | Self::UnterminatedRun { position }
            | Self::AdjacentRuns { position } => position,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidLiteral { position } => write!(
                fmt,
                "byte at offset {} is not printable US-ASCII",
                position
            ),
            Self::NonCanonical { position } => write!(
                fmt,
                "printable US-ASCII character encoded in base64 at offset {}",
                position
            ),
            Self::NonZeroPadding { position } => write!(
                fmt,
                "base64 run ending at offset {} has non-zero or superfluous bits",
                position
            ),
            Self::UnterminatedRun { position } => write!(
                fmt,
                "base64 run starting at offset {} is not terminated with `-`",
                position
            ),
            Self::AdjacentRuns { position } => write!(
                fmt,
                "base64 run at offset {} is adjacent to the previous one",
                position
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Reasons a byte sequence is not valid UTF-8.
///
/// `position` is the byte offset in the input where the problem was detected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EncodeError {
    /// Input ends in the middle of a multi-byte sequence.
    Truncated { position: usize },
    /// A value encoded with more bytes than necessary.
    Overlong { position: usize },
    /// A continuation byte not of the form `10xxxxxx`.
    InvalidContinuation { position: usize },
    /// A byte that cannot start a sequence.
    InvalidLeadByte { position: usize },
}

impl EncodeError {
    pub const fn position(&self) -> usize {
        match *self {
            Self::Truncated { position }
            | Self::Overlong { position }
            | Self::InvalidContinuation { position }
            | Self::InvalidLeadByte { position } => position,
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Truncated { position } => {
                write!(fmt, "UTF-8 sequence at offset {} is truncated", position)
            }
            Self::Overlong { position } => {
                write!(fmt, "overlong UTF-8 sequence at offset {}", position)
            }
            Self::InvalidContinuation { position } => {
                write!(fmt, "invalid UTF-8 continuation byte at offset {}", position)
            }
            Self::InvalidLeadByte { position } => {
                write!(fmt, "invalid UTF-8 lead byte at offset {}", position)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Decode a mailbox name received from an IMAP server.
///
/// Names that are not canonical modified UTF-7 are returned unchanged, as are
/// names whose base64 runs carry UTF-16 surrogates (they do not decode to
/// valid UTF-8).
pub fn decode_mailbox_name(name: &str) -> Cow<'_, str> {
    match decode_utf7_imap(name.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(err) => {
                log::debug!(
                    "Mailbox name {:?} does not decode to valid UTF-8: {}",
                    name,
                    err
                );
                Cow::Borrowed(name)
            }
        },
        Err(err) => {
            log::debug!("Mailbox name {:?} is not modified UTF-7: {}", name, err);
            Cow::Borrowed(name)
        }
    }
}

/// Encode a mailbox name for use in IMAP commands.
///
/// Returns an empty string if encoding fails.
pub fn encode_mailbox_name(name: &str) -> String {
    match encode_utf7_imap(name.as_bytes()) {
        // Output is always US-ASCII.
        Ok(bytes) => bytes.into_iter().map(char::from).collect(),
        Err(err) => {
            log::warn!("Could not encode mailbox name {:?}: {}", name, err);
            String::new()
        }
    }
}
