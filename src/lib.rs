//
// meli - melib-charset crate.
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

#![deny(
    rustdoc::redundant_explicit_links,
    unsafe_op_in_unsafe_fn,
    /* groups */
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::nursery,
    clippy::style,
    /* restriction */
    clippy::dbg_macro,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    /* rustdoc */
    rustdoc::broken_intra_doc_links,
    /* pedantic */
    clippy::doc_markdown,
    clippy::expect_fun_call,
    clippy::or_fun_call,
)]
#![allow(
    clippy::option_if_let_else,
    clippy::missing_const_for_fn,
    clippy::significant_drop_tightening,
    clippy::cognitive_complexity
)]

//! Charset handling for e-mail applications.
//!
//! ## Description
//!
//! A crate that deals with the charset names and encodings mail clients
//! actually encounter:
//! - Normalize malformed or aliased charset labels (`_ISO-8859-JP$SIO`,
//!   `windows-1250http-equivcontent-type`, `latin1`, bare numeric ids sent by
//!   some clients) into a canonical token. (see module [`charset`])
//! - Encode and decode IMAP mailbox names in modified UTF-7 as defined in
//!   [RFC 3501 section 5.1.3](https://datatracker.ietf.org/doc/html/rfc3501#section-5.1.3),
//!   rejecting every non-canonical form. (see module [`utf7`])
//! - Convert bytes between two charset labels through an ordered list of
//!   [`Transcoder`](convert::Transcoder) implementations. (see module
//!   [`convert`])
//!
//! Other exports are
//! - Conversion configuration (see module [`conf`])
//! - A `debug` macro that formats like `log::debug` but only logs when the
//!   `debug-tracing` feature is enabled. (see [`debug` macro](debug!))

#[macro_use]
pub mod dbg {

    #[macro_export]
    macro_rules! debug {
        ($fmt:literal, $($arg:tt)*) => {
            if cfg!(feature="debug-tracing") {
                $crate::log::debug!($fmt, $($arg)*);
            }
        };
    }
}

pub mod charset;
pub use charset::{normalize, CharsetNormalizer};
pub mod conf;
pub use conf::ConversionSettings;
pub mod convert;
pub use convert::{Converter, EncodingRsTranscoder, Transcoder};
pub mod error;
pub use error::*;
pub mod utf7;
pub use utf7::{decode_utf7_imap, encode_utf7_imap, DecodeError, EncodeError};

#[macro_use]
extern crate serde_derive;
pub extern crate encoding_rs;
pub extern crate log;
