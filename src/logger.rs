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

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use jiff::Zoned;

use crate::Error;
use crate::Severity;
use crate::filter::SeverityFilter;
use crate::output::Output;

/// The name given to loggers created with a blank category.
pub const DEFAULT_CATEGORY_NAME: &str = "CategoryLogger";

/// Identifies the kind of event a log entry reports.
///
/// Only the numeric id is written to the output; the name is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventId {
    id: i32,
    name: Option<Cow<'static, str>>,
}

impl EventId {
    pub const fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        EventId::new(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The handle returned by [`CategoryLogger::begin_scope`].
///
/// Scopes are not tracked; dropping the handle does nothing.
#[derive(Debug, Default, Clone, Copy)]
#[must_use = "a scope ends when the handle is dropped"]
pub struct Scope {
    _priv: (),
}

/// A logger bound to one category, writing the entries its filter accepts to an [`Output`].
///
/// Each accepted entry becomes one line:
///
/// ```text
/// <timestamp> - <severity> - <event id> - <category> - <message>
/// ```
///
/// followed by a second line describing the attached error, if any.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logforth_capture::CategoryLogger;
/// use logforth_capture::Severity;
/// use logforth_capture::output::Buffer;
///
/// let buffer = Buffer::new();
/// let logger = CategoryLogger::new("App.Module", Arc::new(buffer.clone()))
///     .with_filter(Severity::Information);
///
/// logger.info(format_args!("hello {}", "world"));
/// logger.debug(format_args!("not written"));
///
/// let lines = buffer.lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].ends_with(" - Information - 0 - App.Module - hello world"));
/// ```
#[derive(Debug)]
pub struct CategoryLogger {
    name: String,
    filter: SeverityFilter,
    output: Arc<dyn Output>,
}

impl CategoryLogger {
    /// Create a logger for `name` that writes every entry to `output`.
    ///
    /// The name is trimmed; a blank name is replaced by [`DEFAULT_CATEGORY_NAME`].
    pub fn new(name: &str, output: Arc<dyn Output>) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            DEFAULT_CATEGORY_NAME
        } else {
            name
        };

        Self {
            name: name.to_string(),
            filter: SeverityFilter::Always,
            output,
        }
    }

    /// Set the filter deciding which entries are written.
    pub fn with_filter(mut self, filter: impl Into<SeverityFilter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// The category name of this logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return whether entries at `severity` would be written.
    ///
    /// [`Severity::None`] is never enabled.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity != Severity::None && self.filter.enabled(&self.name, severity)
    }

    /// Write an entry.
    ///
    /// `formatter` turns `state` into the message and is only called when the entry is enabled.
    /// The message line and the error line are separate writes.
    ///
    /// # Errors
    ///
    /// Return the error of the output if it rejects a line.
    pub fn log<S, F, M>(
        &self,
        severity: Severity,
        event_id: impl Into<EventId>,
        state: S,
        error: Option<&dyn std::error::Error>,
        formatter: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(S) -> M,
        M: fmt::Display,
    {
        if !self.is_enabled(severity) {
            return Ok(());
        }

        let time = Zoned::now().strftime("%Y-%m-%dT%H:%M:%S.%6f%:z");
        let event_id = event_id.into();
        let name = &self.name;
        let message = formatter(state);
        let line = format!("{time} - {severity} - {event_id} - {name} - {message}");
        self.output.write_line(&line)?;

        if let Some(error) = error {
            self.output.write_line(&render_error(error))?;
        }
        Ok(())
    }

    /// Begin a logical operation scope. Scopes are not supported and the handle is inert.
    pub fn begin_scope<S>(&self, state: S) -> Scope {
        let _ = state;
        Scope::default()
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Trace, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Information, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warning, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, args);
    }

    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Critical, args);
    }

    fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if let Err(err) = self.log(severity, EventId::default(), args, None, |args| args) {
            handle_log_error(&self.name, &args, err);
        }
    }
}

/// Render an error, its debug form and its chain of sources as one block of text.
fn render_error(error: &dyn std::error::Error) -> String {
    let mut text = format!("{error}\n{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        // SAFETY: write to a string always succeeds
        write!(&mut text, "\nCaused by: {cause}").unwrap();
        source = cause.source();
    }
    text
}

pub(crate) fn handle_log_error(category: &str, args: &fmt::Arguments<'_>, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Category: {category}
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Category: {category}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}
