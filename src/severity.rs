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

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The severity of a log entry.
///
/// Severities are totally ordered from the least to the most important:
///
/// `Trace < Debug < Information < Warning < Error < Critical < None`
///
/// `None` is a sentinel that is never emitted. Used as a threshold it disables a category.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Designates very low priority, often extremely verbose, information.
    Trace,
    /// Designates lower priority information.
    Debug,
    /// Designates useful information.
    Information,
    /// Designates hazardous situations.
    Warning,
    /// Designates errors that stop the current operation.
    Error,
    /// Designates failures that require immediate attention.
    Critical,
    /// Designates nothing; entries with this severity are never written.
    None,
}

impl Severity {
    const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::None,
    ];

    /// Return the string representation of the `Severity`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "Trace",
            Severity::Debug => "Debug",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Critical => "Critical",
            Severity::None => "None",
        }
    }
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    /// Parse a severity by name, ignoring ASCII case, or by its ordinal `0..=6`.
    fn from_str(s: &str) -> Result<Severity, Self::Err> {
        let s = s.trim();

        for severity in Severity::ALL {
            if s.eq_ignore_ascii_case(severity.as_str()) {
                return Ok(severity);
            }
        }

        if let Ok(ordinal) = s.parse::<usize>() {
            if let Some(severity) = Severity::ALL.get(ordinal) {
                return Ok(*severity);
            }
        }

        Err(Error::new(format!("malformed severity: {s:?}")))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Information,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_totally_ordered() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::None));
    }

    #[test]
    fn parse_by_name_ignores_case_and_whitespace() {
        let information = "information".parse::<Severity>().unwrap();
        assert_eq!(information, Severity::Information);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("  Trace ".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("none".parse::<Severity>().unwrap(), Severity::None);
    }

    #[test]
    fn parse_by_ordinal() {
        assert_eq!("0".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("3".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("6".parse::<Severity>().unwrap(), Severity::None);
        assert!("7".parse::<Severity>().is_err());
        assert!("-1".parse::<Severity>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "NotALevel".parse::<Severity>().unwrap_err();
        assert_eq!(err.message(), r#"malformed severity: "NotALevel""#);
        assert!("warn".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn display_uses_full_names() {
        assert_eq!(Severity::Information.to_string(), "Information");
        assert_eq!(format!("{:>8}", Severity::Debug), "   Debug");
    }

    #[test]
    fn convert_from_log_level() {
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Info), Severity::Information);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Trace);
    }
}
