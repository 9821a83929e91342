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

use std::fmt::Debug;
use std::sync::Arc;

use crate::Severity;
use crate::filter::SeverityFilter;

type Predicate = dyn Fn(&str, Severity) -> bool + Send + Sync + 'static;

/// A filter that you can pass the custom filter function.
///
/// The custom filter function accepts the category name and the [`Severity`] of an entry and
/// returns whether the entry should be written. For example:
///
/// ```rust
/// use logforth_capture::Severity;
/// use logforth_capture::filter::CustomFilter;
///
/// let filter = CustomFilter::new(|category: &str, severity: Severity| {
///     category.starts_with("App") && severity >= Severity::Debug
/// });
/// assert!(filter.enabled("App.Db", Severity::Debug));
/// assert!(!filter.enabled("Other", Severity::Critical));
/// ```
///
/// Clones share the same function, so every logger of a registry observes one predicate.
#[derive(Clone)]
pub struct CustomFilter {
    f: Arc<Predicate>,
}

impl Debug for CustomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomFilter {{ ... }}")
    }
}

impl CustomFilter {
    pub fn new(filter: impl Fn(&str, Severity) -> bool + Send + Sync + 'static) -> Self {
        CustomFilter {
            f: Arc::new(filter),
        }
    }

    /// Return whether the entry passes the function.
    pub fn enabled(&self, category: &str, severity: Severity) -> bool {
        (self.f)(category, severity)
    }

    /// Return whether both filters call the very same function.
    pub fn ptr_eq(&self, other: &CustomFilter) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl From<CustomFilter> for SeverityFilter {
    fn from(filter: CustomFilter) -> Self {
        SeverityFilter::Custom(filter)
    }
}
