//
// meli - conf module
//
// Copyright 2019 Emmanouil Pitsidianakis <manos@pitsidianak.is>
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

//! Basic configuration for [`Converter`](crate::convert::Converter).
//!
//! Settings are plain `serde` structures so that they can be embedded in an
//! application's own configuration file:
//!
//! ```toml
//! [charset]
//! default_charset = "UTF-8"
//! cache_labels = true
//! ignore_unmappable = true
//! ```

use crate::{
    charset::CharsetNormalizer,
    error::{ErrorKind, Result, ResultIntoError},
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionSettings {
    /// Charset to convert to when the caller does not name one.
    /// Default: "UTF-8"
    pub default_charset: String,
    /// Memoize normalized charset labels.
    /// Default: true
    pub cache_labels: bool,
    /// Drop characters the target charset cannot represent instead of
    /// failing the conversion.
    /// Default: true
    pub ignore_unmappable: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            default_charset: "UTF-8".to_string(),
            cache_labels: true,
            ignore_unmappable: true,
        }
    }
}

impl ConversionSettings {
    /// Check that `default_charset` names an actual charset, returning its
    /// normalized token.
    pub fn validate(&self) -> Result<String> {
        CharsetNormalizer::without_cache()
            .normalize(&self.default_charset)
            .filter(|token| !token.is_empty())
            .ok_or("The default charset must name a text charset.")
            .chain_err_summary(|| {
                format!(
                    "Configuration error: Invalid value for field `default_charset`: {:?}",
                    self.default_charset
                )
            })
            .chain_err_kind(ErrorKind::Configuration)
    }

    pub(crate) fn normalizer(&self) -> CharsetNormalizer {
        if self.cache_labels {
            CharsetNormalizer::new()
        } else {
            CharsetNormalizer::without_cache()
        }
    }
}
