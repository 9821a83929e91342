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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Error;
use crate::output::Output;

/// An in-memory output holding the lines written during one test.
///
/// Clones share the same lines, so a test can keep one handle for assertions and hand another
/// to a registry. Once [`Buffer::close`] has been called the test is considered finished and
/// further writes fail.
///
/// # Examples
///
/// ```
/// use logforth_capture::output::Buffer;
/// use logforth_capture::output::Output;
///
/// let buffer = Buffer::new();
/// buffer.write_line("hello").unwrap();
/// assert_eq!(buffer.lines(), ["hello"]);
///
/// buffer.close();
/// assert!(buffer.write_line("too late").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    lines: Vec<String>,
    closed: bool,
}

impl Buffer {
    /// Create an empty, open buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of every line written so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.state().lines.clone()
    }

    /// Return every line written so far joined by newlines.
    pub fn contents(&self) -> String {
        self.state().lines.join("\n")
    }

    /// Return whether no line has been written.
    pub fn is_empty(&self) -> bool {
        self.state().lines.is_empty()
    }

    /// Discard the lines written so far.
    pub fn clear(&self) {
        self.state().lines.clear();
    }

    /// Mark the owning test as finished; later writes are rejected.
    pub fn close(&self) {
        self.state().closed = true;
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Output for Buffer {
    fn write_line(&self, line: &str) -> Result<(), Error> {
        let mut state = self.state();
        if state.closed {
            let err = Error::new("output buffer is closed");
            return Err(err.with_context("line", line));
        }
        state.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_lines() {
        let buffer = Buffer::new();
        let writer = buffer.clone();
        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(buffer.lines(), ["first", "second"]);
        assert_eq!(buffer.contents(), "first\nsecond");

        buffer.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn closed_buffer_rejects_writes() {
        let buffer = Buffer::new();
        buffer.write_line("kept").unwrap();
        buffer.close();

        let err = buffer.write_line("dropped").unwrap_err();
        assert_eq!(err.message(), "output buffer is closed");
        assert_eq!(buffer.lines(), ["kept"]);
    }
}
