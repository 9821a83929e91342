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

//! A flattened key/value configuration used to resolve category severities.
//!
//! Keys are `:`-separated paths such as `LogLevel:App.Module`, compared without regard to ASCII
//! case. A registry looks its thresholds up in the `LogLevel` section:
//!
//! ```
//! use logforth_capture::config::Configuration;
//!
//! let config = Configuration::new()
//!     .set("LogLevel:Default", "Warning")
//!     .set("LogLevel:App.Database", "Debug");
//!
//! let levels = config.section("LogLevel");
//! assert_eq!(levels.get("app.database"), Some("Debug"));
//! assert_eq!(levels.get("App"), None);
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "config-json")]
use crate::Error;

/// The separator between segments of a configuration key.
pub const KEY_DELIMITER: &str = ":";

/// An immutable snapshot of configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    // keys are stored lowercased
    values: BTreeMap<String, String>,
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value for the same key.
    pub fn set(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.values.insert(normalize_key(key.as_ref()), value.into());
        self
    }

    /// Get the value stored under the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    /// Return the sub-tree under `name`, with the `name:` prefix stripped from its keys.
    ///
    /// A missing section is empty rather than an error.
    pub fn section(&self, name: &str) -> Configuration {
        let prefix = format!("{}{KEY_DELIMITER}", normalize_key(name));
        let values = self
            .values
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k[prefix.len()..].to_string(), v.clone()))
            .collect();
        Configuration { values }
    }

    /// Return whether this configuration holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a configuration from environment-style pairs.
    ///
    /// Only names starting with `prefix` are kept. The prefix is stripped and every `__` in the
    /// remaining name is read as the [`KEY_DELIMITER`], so `APP_LogLevel__Default=Debug` with the
    /// prefix `APP_` becomes `LogLevel:Default = Debug`.
    pub fn from_vars<I, K, V>(vars: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        vars.into_iter()
            .filter_map(|(name, value)| {
                let key = name.as_ref().strip_prefix(prefix)?;
                if key.is_empty() {
                    return None;
                }
                Some((key.replace("__", KEY_DELIMITER), value.into()))
            })
            .fold(Configuration::new(), |config, (key, value)| {
                config.set(key, value)
            })
    }

    /// Build a configuration from the process environment. See [`Configuration::from_vars`].
    pub fn from_env(prefix: &str) -> Self {
        Self::from_vars(std::env::vars(), prefix)
    }

    /// Build a configuration from a JSON document whose root is an object.
    ///
    /// Nested objects are flattened with the [`KEY_DELIMITER`]; array elements use their index as
    /// the key segment; numbers and booleans are stored in their textual form; `null` is stored as
    /// an empty value.
    ///
    /// ```
    /// use logforth_capture::config::Configuration;
    ///
    /// let config = Configuration::from_json(r#"{ "LogLevel": { "Default": "Trace" } }"#).unwrap();
    /// assert_eq!(config.get("LogLevel:Default"), Some("Trace"));
    /// ```
    #[cfg(feature = "config-json")]
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let root: serde_json::Value = match serde_json::from_str(text) {
            Ok(root) => root,
            Err(source) => {
                let err = Error::new("failed to parse JSON configuration");
                return Err(err.with_source(source));
            }
        };

        let serde_json::Value::Object(map) = root else {
            return Err(Error::new("JSON configuration root must be an object"));
        };

        let mut config = Configuration::new();
        for (key, value) in map {
            flatten_json(&mut config, key, value);
        }
        Ok(config)
    }
}

#[cfg(feature = "config-json")]
fn flatten_json(config: &mut Configuration, path: String, value: serde_json::Value) {
    use serde_json::Value;

    let leaf = match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_json(config, format!("{path}{KEY_DELIMITER}{key}"), value);
            }
            return;
        }
        Value::Array(items) => {
            for (index, value) in items.into_iter().enumerate() {
                flatten_json(config, format!("{path}{KEY_DELIMITER}{index}"), value);
            }
            return;
        }
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    };
    config.values.insert(normalize_key(&path), leaf);
}

fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let config = Configuration::new().set("LogLevel:App", "Debug");
        assert_eq!(config.get("loglevel:app"), Some("Debug"));
        assert_eq!(config.get("LOGLEVEL:APP"), Some("Debug"));

        let config = config.set("LOGLEVEL:app", "Trace");
        assert_eq!(config.get("LogLevel:App"), Some("Trace"));
    }

    #[test]
    fn section_strips_prefix_and_excludes_siblings() {
        let config = Configuration::new()
            .set("Logging:LogLevel:Default", "Warning")
            .set("Logging:LogLevel:App.Db", "Trace")
            .set("Logging:Console:LogLevel:Default", "Error")
            .set("LoggingExtra:LogLevel:Default", "Debug");

        let logging = config.section("Logging");
        assert_eq!(logging.get("LogLevel:Default"), Some("Warning"));
        assert_eq!(logging.get("Console:LogLevel:Default"), Some("Error"));

        let levels = logging.section("LogLevel");
        assert_eq!(levels.get("Default"), Some("Warning"));
        assert_eq!(levels.get("App.Db"), Some("Trace"));
        assert_eq!(levels.get("Console:LogLevel:Default"), None);

        assert!(config.section("Missing").is_empty());
    }

    #[test]
    fn from_vars_filters_by_prefix() {
        let config = Configuration::from_vars(
            [
                ("CAPTURE_LogLevel__Default", "Information"),
                ("CAPTURE_LogLevel__App.Module", "Trace"),
                ("CAPTURE_", "ignored"),
                ("PATH", "/usr/bin"),
            ],
            "CAPTURE_",
        );

        assert_eq!(config.get("LogLevel:Default"), Some("Information"));
        assert_eq!(config.get("LogLevel:App.Module"), Some("Trace"));
        assert_eq!(config.get("PATH"), None);
        assert_eq!(config.get(""), None);
    }

    #[cfg(feature = "config-json")]
    #[test]
    fn from_json_flattens_nested_values() {
        let config = Configuration::from_json(
            r#"{
                "Logging": {
                    "LogLevel": { "Default": "Warning", "App": null },
                    "Retries": 3,
                    "Enabled": true,
                    "Targets": ["first", "second"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.get("Logging:LogLevel:Default"), Some("Warning"));
        assert_eq!(config.get("Logging:LogLevel:App"), Some(""));
        assert_eq!(config.get("Logging:Retries"), Some("3"));
        assert_eq!(config.get("Logging:Enabled"), Some("true"));
        assert_eq!(config.get("Logging:Targets:1"), Some("second"));
    }

    #[cfg(feature = "config-json")]
    #[test]
    fn from_json_rejects_malformed_documents() {
        let err = Configuration::from_json("{ not json").unwrap_err();
        assert_eq!(err.message(), "failed to parse JSON configuration");
        assert_eq!(err.sources().len(), 1);

        let err = Configuration::from_json("[1, 2]").unwrap_err();
        assert_eq!(err.message(), "JSON configuration root must be an object");
    }
}
