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

//! Route records of the [`log`] crate into a [`LoggerRegistry`].
//!
//! The target of a record is used as the category, so `log::info!(target: "App.Db", ...)` is
//! filtered and written by the `App.Db` logger of the registry. Module path targets such as
//! `my_crate::db` are read as `my_crate.db`, so a `LogLevel:my_crate` threshold applies to every
//! module of the crate.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::EventId;
use crate::LoggerRegistry;
use crate::logger::handle_log_error;

/// A [`log::Log`] implementation backed by a [`LoggerRegistry`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use log::Log;
/// use logforth_capture::bridge::LogBridge;
/// use logforth_capture::output::Buffer;
///
/// let buffer = Buffer::new();
/// let registry = logforth_capture::builder()
///     .output(buffer.clone())
///     .min_severity(logforth_capture::Severity::Trace)
///     .build()
///     .unwrap();
/// let bridge = LogBridge::new(Arc::new(registry));
///
/// bridge.log(
///     &log::Record::builder()
///         .target("App.Db")
///         .level(log::Level::Warn)
///         .args(format_args!("slow query"))
///         .build(),
/// );
/// assert!(buffer.contents().ends_with(" - Warning - 0 - App.Db - slow query"));
/// ```
#[derive(Debug, Clone)]
pub struct LogBridge {
    registry: Arc<LoggerRegistry>,
}

impl LogBridge {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    fn write(
        &self,
        category: &str,
        level: log::Level,
        args: &fmt::Arguments<'_>,
    ) -> Result<(), Error> {
        let logger = self.registry.get_or_create_logger(category)?;
        logger.log(level.into(), EventId::default(), args, None, |args| args)
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let category = category_of(metadata.target());
        self.registry
            .get_or_create_logger(&category)
            .is_ok_and(|logger| logger.is_enabled(metadata.level().into()))
    }

    fn log(&self, record: &log::Record) {
        let category = category_of(record.target());
        let args = record.args();
        if let Err(err) = self.write(&category, record.level(), args) {
            handle_log_error(&category, args, err);
        }
    }

    fn flush(&self) {}
}

/// Map a record target to a category, reading `::` as the `.` separator.
fn category_of(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

/// Set up the global logger of the [`log`] crate to write through `registry`.
///
/// # Errors
///
/// Return an error if a global logger has already been set.
pub fn try_setup_log_crate(registry: Arc<LoggerRegistry>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(registry)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the global logger of the [`log`] crate to write through `registry`.
///
/// # Panics
///
/// Panic if a global logger has already been set.
pub fn setup_log_crate(registry: Arc<LoggerRegistry>) {
    try_setup_log_crate(registry).expect(
        "setup_log_crate must be called before the log crate global logger initialized",
    )
}
