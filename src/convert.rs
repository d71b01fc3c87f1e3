//
// meli - convert module
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

//! Conversion of bytes between two charset labels.
//!
//! Labels are first normalized with [`CharsetNormalizer`]. Conversions from
//! or to [`UTF7_IMAP`] are handled by the [`utf7`](crate::utf7) codec, going
//! through UTF-8 if the other side is something else. Every other pair is
//! handed to each [`Transcoder`] in order until one succeeds.

use std::{borrow::Cow, sync::OnceLock};

use encoding_rs::{EncoderResult, Encoding, REPLACEMENT, UTF_16BE, UTF_16LE, UTF_8};

use crate::{
    charset::CharsetNormalizer,
    conf::ConversionSettings,
    error::{Error, ErrorKind, Result, ResultIntoError},
    utf7::{decode_utf7_imap, encode_utf7_imap, UTF7_IMAP},
};

const UTF8: &str = "UTF-8";

/// A charset conversion capability.
///
/// Implementations receive normalized charset tokens and return `None` for
/// any pair or input they cannot handle, so that the next transcoder can be
/// tried.
pub trait Transcoder: std::fmt::Debug + Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    fn try_convert(&self, input: &[u8], from: &str, to: &str) -> Option<Vec<u8>>;
}

/// [`Transcoder`] backed by `encoding_rs`, covering the WHATWG Encoding
/// Standard charsets.
#[derive(Clone, Copy, Debug)]
pub struct EncodingRsTranscoder {
    ignore_unmappable: bool,
}

impl Default for EncodingRsTranscoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EncodingRsTranscoder {
    pub const fn new(ignore_unmappable: bool) -> Self {
        Self { ignore_unmappable }
    }

    /// Look up a normalized token, translating the iconv names the
    /// normalizer produces that are not WHATWG labels.
    ///
    /// `CP1361` (Johab) has no `encoding_rs` counterpart.
    fn encoding(token: &str) -> Option<&'static Encoding> {
        let label = match token {
            "UHC" | "CP949" => "euc-kr",
            "CP950" => "big5",
            "MAC" => "macintosh",
            other => other,
        };
        Encoding::for_label(label.as_bytes())
    }

    fn decode<'a>(input: &'a [u8], from: &'static Encoding) -> Option<Cow<'a, str>> {
        if from == REPLACEMENT {
            return None;
        }
        from.decode_without_bom_handling_and_without_replacement(input)
    }

    fn encode(&self, text: &str, to: &'static Encoding) -> Option<Vec<u8>> {
        // `encoding_rs` only decodes UTF-16, its encoders output UTF-8.
        if to == UTF_16BE {
            return Some(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
        }
        if to == UTF_16LE {
            return Some(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
        }
        if to == REPLACEMENT {
            return None;
        }
        if to == UTF_8 {
            return Some(text.as_bytes().to_vec());
        }

        let mut encoder = to.new_encoder();
        let mut out =
            Vec::with_capacity(encoder.max_buffer_length_from_utf8_without_replacement(text.len())?);
        let mut rest = text;
        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
            rest = &rest[read..];
            match result {
                EncoderResult::InputEmpty => return Some(out),
                EncoderResult::OutputFull => {
                    out.reserve(encoder.max_buffer_length_from_utf8_without_replacement(rest.len())?);
                }
                EncoderResult::Unmappable(c) if self.ignore_unmappable => {
                    log::trace!("Dropping {:?}, not representable in {}", c, to.name());
                }
                EncoderResult::Unmappable(c) => {
                    log::debug!("{:?} is not representable in {}", c, to.name());
                    return None;
                }
            }
        }
    }
}

impl Transcoder for EncodingRsTranscoder {
    fn name(&self) -> &'static str {
        "encoding_rs"
    }

    fn try_convert(&self, input: &[u8], from: &str, to: &str) -> Option<Vec<u8>> {
        let from = Self::encoding(from)?;
        let to = Self::encoding(to)?;
        let text = Self::decode(input, from)?;
        self.encode(&text, to)
    }
}

/// Charset conversion dispatcher.
#[derive(Debug)]
pub struct Converter {
    settings: ConversionSettings,
    default_charset: String,
    normalizer: CharsetNormalizer,
    transcoders: Vec<Box<dyn Transcoder>>,
}

impl Default for Converter {
    fn default() -> Self {
        let settings = ConversionSettings::default();
        Self {
            default_charset: UTF8.to_string(),
            normalizer: settings.normalizer(),
            transcoders: vec![Box::new(EncodingRsTranscoder::new(
                settings.ignore_unmappable,
            ))],
            settings,
        }
    }
}

impl Converter {
    pub fn new(settings: ConversionSettings) -> Result<Self> {
        let default_charset = settings.validate()?;
        Ok(Self {
            default_charset,
            normalizer: settings.normalizer(),
            transcoders: vec![Box::new(EncodingRsTranscoder::new(
                settings.ignore_unmappable,
            ))],
            settings,
        })
    }

    /// Replace the transcoders, which are tried in the given order.
    pub fn with_transcoders(mut self, transcoders: Vec<Box<dyn Transcoder>>) -> Self {
        self.transcoders = transcoders;
        self
    }

    /// Add a transcoder to be tried after the existing ones.
    pub fn push_transcoder(&mut self, transcoder: Box<dyn Transcoder>) {
        self.transcoders.push(transcoder);
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Normalized token of [`ConversionSettings::default_charset`].
    pub fn default_charset(&self) -> &str {
        &self.default_charset
    }

    pub fn normalizer(&self) -> &CharsetNormalizer {
        &self.normalizer
    }

    /// Convert `input` from charset `from` to charset `to`, or to the default
    /// charset if `to` is `None`.
    ///
    /// Input in an unknown (`BINARY`, empty) charset or already in the target
    /// charset is returned as is.
    pub fn try_convert(&self, input: &[u8], from: &str, to: Option<&str>) -> Result<Vec<u8>> {
        self.convert_inner(input, from, to).map(Cow::into_owned)
    }

    /// Like [`Converter::try_convert`] but returns `input` unchanged on any
    /// failure.
    pub fn convert<'a>(&self, input: &'a [u8], from: &str, to: Option<&str>) -> Cow<'a, [u8]> {
        match self.convert_inner(input, from, to) {
            Ok(output) => output,
            Err(err) => {
                log::debug!("Could not convert from {:?} to {:?}: {}", from, to, err);
                Cow::Borrowed(input)
            }
        }
    }

    fn convert_inner<'a>(
        &self,
        input: &'a [u8],
        from: &str,
        to: Option<&str>,
    ) -> Result<Cow<'a, [u8]>> {
        let to = match to {
            None => self.default_charset.clone(),
            Some(label) => self
                .normalizer
                .normalize(label)
                .filter(|token| !token.is_empty())
                .ok_or("Binary and empty labels cannot be converted to.")
                .chain_err_summary(|| format!("{:?} does not name a target charset", label))
                .chain_err_kind(ErrorKind::ValueError)?,
        };
        let Some(from) = self
            .normalizer
            .normalize(from)
            .filter(|token| !token.is_empty())
        else {
            return Ok(Cow::Borrowed(input));
        };
        if input.is_empty() || from == to {
            return Ok(Cow::Borrowed(input));
        }

        match (from.as_str(), to.as_str()) {
            (UTF7_IMAP, UTF8) => Ok(Cow::Owned(decode_utf7_imap(input)?)),
            (UTF8, UTF7_IMAP) => Ok(Cow::Owned(encode_utf7_imap(input)?)),
            (UTF7_IMAP, to) => {
                let utf8 = decode_utf7_imap(input).chain_err_details(|| {
                    format!("While converting from {} to {} through {}.", UTF7_IMAP, to, UTF8)
                })?;
                self.transcode(&utf8, UTF8, to).map(Cow::Owned)
            }
            (from, UTF7_IMAP) => {
                let utf8 = self.transcode(input, from, UTF8)?;
                let utf7 = encode_utf7_imap(&utf8).chain_err_details(|| {
                    format!("While converting from {} to {} through {}.", from, UTF7_IMAP, UTF8)
                })?;
                Ok(Cow::Owned(utf7))
            }
            (from, to) => self.transcode(input, from, to).map(Cow::Owned),
        }
    }

    fn transcode(&self, input: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        for transcoder in &self.transcoders {
            if let Some(output) = transcoder.try_convert(input, from, to) {
                return Ok(output);
            }
            debug!(
                "{} could not convert {} bytes from {} to {}",
                transcoder.name(),
                input.len(),
                from,
                to
            );
        }
        Err(Error::new(format!("Could not convert from {} to {}", from, to))
            .set_details(format!(
                "None of the {} available transcoders accepted the input.",
                self.transcoders.len()
            ))
            .set_kind(ErrorKind::NotSupported))
    }
}

/// Convert with a process-wide [`Converter`] using the default
/// [`ConversionSettings`].
///
/// ```rust
/// # use melib_charset::convert::convert;
/// assert_eq!(&*convert(b"caf\xe9", "latin1", None), "café".as_bytes());
/// assert_eq!(
///     &*convert("café".as_bytes(), "utf-8", Some("utf7-imap")),
///     b"caf&AOk-"
/// );
/// // Invalid modified UTF-7 is returned unchanged.
/// assert_eq!(&*convert(b"&ACY-", "UTF7-IMAP", None), b"&ACY-");
/// ```
pub fn convert<'a>(input: &'a [u8], from: &str, to: Option<&str>) -> Cow<'a, [u8]> {
    static CONVERTER: OnceLock<Converter> = OnceLock::new();
    CONVERTER.get_or_init(Converter::default).convert(input, from, to)
}
