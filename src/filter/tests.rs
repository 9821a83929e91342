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

use super::*;

fn levels(pairs: &[(&str, &str)]) -> FilterSource {
    let mut config = Configuration::new();
    for (key, value) in pairs {
        config = config.set(format!("LogLevel:{key}"), *value);
    }
    FilterSource::Configuration(Arc::new(config))
}

fn threshold(source: &FilterSource, category: &str) -> Option<Severity> {
    match source.resolve(category).unwrap() {
        SeverityFilter::Threshold(threshold) => Some(threshold),
        _ => None,
    }
}

fn never(source: &FilterSource, category: &str) -> bool {
    matches!(source.resolve(category).unwrap(), SeverityFilter::Never)
}

#[test]
fn key_prefixes_most_specific_first() {
    let keys: Vec<_> = key_prefixes("A.B.C").collect();
    assert_eq!(keys, ["A.B.C", "A.B", "A", "Default"]);

    let keys: Vec<_> = key_prefixes("App").collect();
    assert_eq!(keys, ["App", "Default"]);

    assert_eq!(key_prefixes("").count(), 0);
}

#[test]
fn key_prefixes_skip_empty_segments() {
    let keys: Vec<_> = key_prefixes("A..B").collect();
    assert_eq!(keys, ["A..B", "A.", "A", "Default"]);

    let keys: Vec<_> = key_prefixes(".A").collect();
    assert_eq!(keys, [".A", "Default"]);
}

#[test]
fn unset_source_never_emits() {
    let filter = FilterSource::Unset.resolve("App").unwrap();
    for severity in [Severity::Trace, Severity::Critical] {
        assert!(!filter.enabled("App", severity));
    }
}

#[test]
fn explicit_filter_ignores_configuration() {
    let custom = CustomFilter::new(|_, severity| severity >= Severity::Warning);
    let source = FilterSource::Explicit(custom.clone().into());

    let filter = source.resolve("App.Module").unwrap();
    match &filter {
        SeverityFilter::Custom(resolved) => assert!(resolved.ptr_eq(&custom)),
        other => panic!("unexpected filter: {other:?}"),
    }
    assert!(!filter.enabled("App.Module", Severity::Information));
    assert!(filter.enabled("App.Module", Severity::Warning));
}

#[test]
fn resolve_most_specific_prefix_wins() {
    let source = levels(&[
        ("Default", "Error"),
        ("App", "Warning"),
        ("App.Module", "Debug"),
    ]);

    assert_eq!(threshold(&source, "App.Module.Sub"), Some(Severity::Debug));
    assert_eq!(threshold(&source, "App.Module"), Some(Severity::Debug));
    assert_eq!(threshold(&source, "App.Other"), Some(Severity::Warning));
    assert_eq!(threshold(&source, "App"), Some(Severity::Warning));
    assert_eq!(threshold(&source, "Other"), Some(Severity::Error));
}

#[test]
fn resolve_matches_whole_segments_only() {
    let source = levels(&[("App", "Trace")]);
    assert!(never(&source, "Application"));
}

#[test]
fn resolve_default_applies_to_every_category() {
    let source = levels(&[("Default", "Trace")]);
    for category in ["App", "App.Module", "x.y.z", "Default"] {
        let filter = source.resolve(category).unwrap();
        for severity in [
            Severity::Trace,
            Severity::Debug,
            Severity::Information,
            Severity::Warning,
            Severity::Error,
            Severity::Critical,
        ] {
            assert!(filter.enabled(category, severity), "{category} {severity}");
        }
    }
}

#[test]
fn resolve_without_match_never_emits() {
    let source = levels(&[("Other", "Trace")]);
    let filter = source.resolve("App.Module").unwrap();
    assert!(matches!(filter, SeverityFilter::Never));
    assert!(!filter.enabled("App.Module", Severity::Critical));

    let source = FilterSource::Configuration(Arc::new(Configuration::new()));
    assert!(never(&source, "App"));
}

#[test]
fn resolve_treats_blank_values_as_absent() {
    let source = levels(&[
        ("App.Module", "   "),
        ("App", ""),
        ("Default", "Critical"),
    ]);
    assert_eq!(threshold(&source, "App.Module"), Some(Severity::Critical));
}

#[test]
fn resolve_rejects_invalid_severity() {
    let source = levels(&[("App", "NotALevel")]);

    let err = source.resolve("App").unwrap_err();
    assert_eq!(
        err.message(),
        "configuration value 'NotALevel' for category 'App' is not supported"
    );
    assert_eq!(err.context("category"), Some("App"));
    assert_eq!(err.context("value"), Some("NotALevel"));

    // a more specific category reaches the invalid value through its prefixes
    assert!(source.resolve("App.Module").is_err());

    // categories that never reach the key are unaffected
    assert!(never(&source, "Other"));
}

#[test]
fn resolve_stops_before_shadowed_invalid_values() {
    let source = levels(&[("App.Module", "Information"), ("App", "bogus")]);
    let expected = Some(Severity::Information);
    assert_eq!(threshold(&source, "App.Module"), expected);
    assert!(source.resolve("App.Other").is_err());
}

#[test]
fn resolve_none_threshold_silences_category() {
    let source = levels(&[("App", "None"), ("Default", "Trace")]);
    let filter = source.resolve("App.Module").unwrap();
    assert!(!filter.enabled("App.Module", Severity::Critical));
    assert!(filter.enabled("App.Module", Severity::None));
}

#[test]
fn threshold_boundary() {
    let filter = SeverityFilter::Threshold(Severity::Warning);
    assert!(filter.enabled("App", Severity::Warning));
    assert!(!filter.enabled("App", Severity::Information));
}
