// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filters deciding which entries a category logger writes.

use std::sync::Arc;

use crate::Error;
use crate::Severity;
use crate::config::Configuration;

pub use self::custom::CustomFilter;

mod custom;
#[cfg(test)]
mod tests;

/// The configuration section holding per-category thresholds.
pub const LOG_LEVEL_SECTION: &str = "LogLevel";

/// The key consulted once every dot-prefix of a category has been tried.
pub const DEFAULT_KEY: &str = "Default";

/// Decides whether an entry of a category at a severity is written.
#[derive(Debug, Clone)]
pub enum SeverityFilter {
    /// Every entry passes.
    Always,
    /// No entry passes.
    Never,
    /// Entries at or above the threshold pass.
    Threshold(Severity),
    /// A caller-supplied predicate.
    Custom(CustomFilter),
}

impl SeverityFilter {
    /// Return whether an entry for `category` at `severity` passes the filter.
    pub fn enabled(&self, category: &str, severity: Severity) -> bool {
        match self {
            SeverityFilter::Always => true,
            SeverityFilter::Never => false,
            SeverityFilter::Threshold(threshold) => severity >= *threshold,
            SeverityFilter::Custom(filter) => filter.enabled(category, severity),
        }
    }
}

impl From<Severity> for SeverityFilter {
    fn from(threshold: Severity) -> Self {
        SeverityFilter::Threshold(threshold)
    }
}

/// Where a registry takes the filters of the loggers it creates from.
#[derive(Debug, Clone, Default)]
pub enum FilterSource {
    /// Neither a filter nor a configuration; every resolved filter is [`SeverityFilter::Never`].
    #[default]
    Unset,
    /// Every category gets this filter verbatim.
    Explicit(SeverityFilter),
    /// Thresholds are looked up in the `LogLevel` section of this configuration.
    Configuration(Arc<Configuration>),
}

impl FilterSource {
    /// Resolve the filter for a category.
    ///
    /// With a configuration, the `LogLevel` section is searched with the keys produced by
    /// [`key_prefixes`]. The first key holding a non-blank value decides: a valid severity becomes
    /// a [`SeverityFilter::Threshold`], anything else is an error. Blank values are skipped. When
    /// no key matches the category is silenced.
    ///
    /// # Errors
    ///
    /// Return an error carrying the `category` and `value` if the first non-blank value is not a
    /// severity.
    pub fn resolve(&self, category: &str) -> Result<SeverityFilter, Error> {
        let config = match self {
            FilterSource::Unset => return Ok(SeverityFilter::Never),
            FilterSource::Explicit(filter) => return Ok(filter.clone()),
            FilterSource::Configuration(config) => config,
        };

        let levels = config.section(LOG_LEVEL_SECTION);
        for key in key_prefixes(category) {
            let Some(value) = levels.get(key) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }

            return match value.parse::<Severity>() {
                Ok(threshold) => Ok(SeverityFilter::Threshold(threshold)),
                Err(err) => Err(Error::new(format!(
                    "configuration value '{value}' for category '{key}' is not supported"
                ))
                .with_context("category", key)
                .with_context("value", value)
                .with_source(err)),
            };
        }

        Ok(SeverityFilter::Never)
    }
}

/// Return the keys tried when resolving the threshold of `category`, most specific first.
///
/// `"A.B.C"` yields `"A.B.C"`, `"A.B"`, `"A"` and finally [`DEFAULT_KEY`]. An empty category
/// yields nothing.
///
/// Empty prefixes are never yielded, so `".A"` yields `".A"` and then [`DEFAULT_KEY`]. The
/// `Default` key is always tried last for a non-empty category.
///
/// ```
/// use logforth_capture::filter::key_prefixes;
///
/// let keys: Vec<_> = key_prefixes("App.Module.Sub").collect();
/// assert_eq!(keys, ["App.Module.Sub", "App.Module", "App", "Default"]);
/// ```
pub fn key_prefixes(category: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(category).filter(|c| !c.is_empty());
    let mut default_pending = rest.is_some();
    std::iter::from_fn(move || {
        if let Some(current) = rest {
            rest = current
                .rfind('.')
                .map(|index| &current[..index])
                .filter(|prefix| !prefix.is_empty());
            return Some(current);
        }
        if default_pending {
            default_pending = false;
            return Some(DEFAULT_KEY);
        }
        None
    })
}
