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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::CategoryLogger;
use crate::Error;
use crate::Severity;
use crate::config::Configuration;
use crate::filter::CustomFilter;
use crate::filter::FilterSource;
use crate::filter::SeverityFilter;
use crate::logger::DEFAULT_CATEGORY_NAME;
use crate::output;
use crate::output::Output;

/// Create a new empty [`RegistryBuilder`].
pub fn builder() -> RegistryBuilder {
    RegistryBuilder::default()
}

/// Create a [`RegistryBuilder`] writing to the test harness at [`Severity::Information`] or above.
///
/// ```
/// let registry = logforth_capture::testing().build().unwrap();
///
/// let logger = registry.get_or_create_logger("my_crate::tests").unwrap();
/// logger.info(format_args!("captured with the output of the current test"));
/// ```
pub fn testing() -> RegistryBuilder {
    builder()
        .output(output::Testing::default())
        .min_severity(Severity::Information)
}

/// Creates one [`CategoryLogger`] per category and caches it.
///
/// The filter of each logger is resolved once, when the logger is created, from the
/// registry's [`FilterSource`]. After [`LoggerRegistry::dispose`] the cache is empty and no more
/// loggers can be obtained; loggers handed out earlier keep working.
#[derive(Debug)]
pub struct LoggerRegistry {
    output: Arc<dyn Output>,
    source: FilterSource,
    // `None` once disposed
    loggers: Mutex<Option<HashMap<String, Arc<CategoryLogger>>>>,
}

impl LoggerRegistry {
    /// Create a new empty [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        builder()
    }

    /// Return the logger for `category`, creating and caching it on first use.
    ///
    /// The category is trimmed and a blank category is replaced by [`DEFAULT_CATEGORY_NAME`]
    /// before it is used as the cache key. Concurrent first calls for one category observe the
    /// same logger.
    ///
    /// # Errors
    ///
    /// Return an error if the registry has been disposed, or if the configured threshold for the
    /// category is not a valid severity. Nothing is cached on error.
    pub fn get_or_create_logger(&self, category: &str) -> Result<Arc<CategoryLogger>, Error> {
        let category = normalize_category(category);

        let mut loggers = self.loggers();
        let Some(loggers) = loggers.as_mut() else {
            let err = Error::new("logger registry is disposed");
            return Err(err.with_context("category", category));
        };

        if let Some(logger) = loggers.get(category) {
            return Ok(logger.clone());
        }

        let filter = self.source.resolve(category)?;
        let logger = CategoryLogger::new(category, self.output.clone());
        let logger = Arc::new(logger.with_filter(filter));
        loggers.insert(category.to_string(), logger.clone());
        Ok(logger)
    }

    /// Drop every cached logger and refuse to create new ones.
    ///
    /// The output is left untouched. Calling this more than once has no further effect.
    pub fn dispose(&self) {
        self.loggers().take();
    }

    /// Return whether [`LoggerRegistry::dispose`] has been called.
    pub fn is_disposed(&self) -> bool {
        self.loggers().is_none()
    }

    /// Return the number of cached loggers.
    pub fn len(&self) -> usize {
        self.loggers().as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn loggers(&self) -> MutexGuard<'_, Option<HashMap<String, Arc<CategoryLogger>>>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize_category(category: &str) -> &str {
    let category = category.trim();
    if category.is_empty() {
        DEFAULT_CATEGORY_NAME
    } else {
        category
    }
}

/// A builder for configuring a [`LoggerRegistry`].
///
/// An output is required. The filter mode is taken from the last call among
/// [`filter`](RegistryBuilder::filter), [`min_severity`](RegistryBuilder::min_severity) and
/// [`configuration`](RegistryBuilder::configuration); without any of them nothing is written.
///
/// # Examples
///
/// ```
/// use logforth_capture::Severity;
/// use logforth_capture::output::Buffer;
///
/// let buffer = Buffer::new();
/// let registry = logforth_capture::builder()
///     .output(buffer.clone())
///     .filter(|category, severity| category.starts_with("App") && severity >= Severity::Warning)
///     .build()
///     .unwrap();
///
/// let logger = registry.get_or_create_logger("App.Db").unwrap();
/// logger.info(format_args!("filtered"));
/// logger.warn(format_args!("written"));
/// assert_eq!(buffer.lines().len(), 1);
/// ```
#[must_use = "call `build` to create the registry"]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    output: Option<Arc<dyn Output>>,
    source: FilterSource,
}

impl RegistryBuilder {
    /// Set the output every logger writes to.
    pub fn output(self, output: impl Output) -> Self {
        self.shared_output(Arc::new(output))
    }

    /// Set an output that is already shared with other owners.
    pub fn shared_output(mut self, output: Arc<dyn Output>) -> Self {
        self.output = Some(output);
        self
    }

    /// Filter every category with the given predicate, ignoring any configuration.
    pub fn filter(
        mut self,
        filter: impl Fn(&str, Severity) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.source = FilterSource::Explicit(CustomFilter::new(filter).into());
        self
    }

    /// Write entries at `min` and above for every category.
    pub fn min_severity(mut self, min: Severity) -> Self {
        self.source = FilterSource::Explicit(SeverityFilter::Threshold(min));
        self
    }

    /// Resolve the threshold of each category from the `LogLevel` section of `configuration`.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.source = FilterSource::Configuration(Arc::new(configuration));
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Return an error if no output has been set.
    pub fn build(self) -> Result<LoggerRegistry, Error> {
        let output = self.output.ok_or_else(|| Error::missing_argument("output"))?;
        Ok(LoggerRegistry {
            output,
            source: self.source,
            loggers: Mutex::new(Some(HashMap::new())),
        })
    }
}
