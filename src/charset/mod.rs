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

//! Normalization of charset labels found in the wild.
//!
//! Charset labels in e-mail are frequently malformed: garbage prefixes
//! (`_ISO-8859-JP$SIO`), vendor prefixes (`X-ROMAN8`), historical names
//! (`UNICODE-1-1-UTF-7`), trailing junk concatenated by broken software
//! (`windows-1250http-equivcontent-type`) or bare numeric ids. [`normalize`]
//! turns them into an uppercase token that transcoders accept.
//!
//! `ISO-8859-1` and every `LATIN1` spelling become `WINDOWS-1252`, since
//! clients label Windows-1252 text as Latin-1 and the former is a superset of
//! the printable part of the latter.

use std::{
    collections::HashMap,
    sync::{OnceLock, RwLock},
};

use regex::Regex;

mod aliases;

pub use aliases::{alias, latin_alias};

/// Labels that mean "no charset".
pub const BINARY: &str = "BINARY";

struct Patterns {
    historical_unicode: Regex,
    utf: Regex,
    iso_8859: Regex,
    windows: Regex,
    latin: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        // RFC1641/1642
        historical_unicode: Regex::new(r"UNICODE-1-1-*").expect("valid regex literal"),
        utf: Regex::new(r"U[A-Z][A-Z](7|8|16|32)(BE|LE)?").expect("valid regex literal"),
        iso_8859: Regex::new(r"ISO8859([0-9]{0,2})").expect("valid regex literal"),
        // e.g. WINDOWS-1250HTTP-EQUIVCONTENT-TYPE
        windows: Regex::new(r"(WIN|WINDOWS)([0-9]+)").expect("valid regex literal"),
        latin: Regex::new(r"LATIN(.*)").expect("valid regex literal"),
    })
}

/// Strip the noise around a charset label, on the uppercased label.
fn clean_label(label: &str) -> String {
    let label = label.to_ascii_uppercase();
    let label = label.trim_start_matches(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit()));
    let label = label.split('$').next().unwrap_or_default();
    let label = patterns().historical_unicode.replace_all(label, "");
    label.strip_prefix("X-").unwrap_or(&label[..]).to_string()
}

/// Map a cleaned label to a canonical token, `None` for [`BINARY`].
fn parse_charset(label: &str) -> Option<String> {
    let charset = clean_label(label);
    if charset == BINARY {
        return None;
    }

    let key = charset
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect::<String>();

    if let Some(alias) = alias(&key) {
        return Some(alias.to_string());
    }

    let patterns = patterns();
    if let Some(caps) = patterns.utf.captures(&key) {
        return Some(format!(
            "UTF-{}{}",
            &caps[1],
            caps.get(2).map_or("", |m| m.as_str())
        ));
    }
    if let Some(caps) = patterns.iso_8859.captures(&key) {
        return Some(match &caps[1] {
            "" | "0" | "1" => "WINDOWS-1252".to_string(),
            part => format!("ISO-8859-{}", part),
        });
    }
    if let Some(caps) = patterns.windows.captures(&key) {
        return Some(format!("WINDOWS-{}", &caps[2]));
    }
    if let Some(caps) = patterns.latin.captures(&key) {
        return Some(match &caps[1] {
            "1" => "WINDOWS-1252".to_string(),
            suffix => latin_alias(suffix).map_or_else(|| key.clone(), str::to_string),
        });
    }

    Some(charset)
}

/// Charset label normalizer with an optional memo keyed by the raw label.
///
/// The cache is read-mostly; concurrent misses on the same label only cause
/// the same value to be computed twice. Labels come from message headers, so
/// the memo is emptied once it holds `capacity` entries.
#[derive(Debug)]
pub struct CharsetNormalizer {
    cache: Option<RwLock<HashMap<String, Option<String>>>>,
    capacity: usize,
}

impl Default for CharsetNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetNormalizer {
    /// Default number of memoized labels.
    pub const CACHE_CAPACITY: usize = 512;

    pub fn new() -> Self {
        Self::with_capacity(Self::CACHE_CAPACITY)
    }

    /// Memoize at most `capacity` labels at a time.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: Some(RwLock::new(HashMap::default())),
            capacity,
        }
    }

    pub fn without_cache() -> Self {
        Self {
            cache: None,
            capacity: 0,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Normalize `label`, returning `None` for labels that mean "no charset".
    ///
    /// Never fails: unrecognized labels come back uppercased and otherwise
    /// untouched, leaving it to the transcoder to reject them.
    pub fn normalize(&self, label: &str) -> Option<String> {
        let Some(cache) = self.cache.as_ref() else {
            return parse_charset(label);
        };
        if let Some(hit) = cache.read().ok().and_then(|c| c.get(label).cloned()) {
            return hit;
        }
        let result = parse_charset(label);
        log::trace!("Normalized charset label {:?} to {:?}", label, result);
        if let Ok(mut cache) = cache.write() {
            if cache.len() >= self.capacity {
                log::trace!("Charset label cache is full, clearing {} entries", cache.len());
                cache.clear();
            }
            if self.capacity > 0 {
                cache.insert(label.to_string(), result.clone());
            }
        }
        result
    }

    /// Forget every memoized label.
    pub fn clear(&self) {
        if let Some(Ok(mut cache)) = self.cache.as_ref().map(RwLock::write) {
            cache.clear();
        }
    }
}

/// Normalize `label` with a process-wide cached [`CharsetNormalizer`].
///
/// ```rust
/// # use melib_charset::charset::normalize;
/// assert_eq!(normalize("latin1").as_deref(), Some("WINDOWS-1252"));
/// assert_eq!(normalize("x-unknown").as_deref(), Some("ISO-8859-15"));
/// assert_eq!(normalize("utf8").as_deref(), Some("UTF-8"));
/// assert_eq!(normalize("binary"), None);
/// ```
pub fn normalize(label: &str) -> Option<String> {
    static NORMALIZER: OnceLock<CharsetNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(CharsetNormalizer::new).normalize(label)
}
