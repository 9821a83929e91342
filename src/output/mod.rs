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

//! Output channels receiving formatted log lines.

use std::fmt;
use std::sync::Arc;

use crate::Error;

mod buffer;
mod testing;

pub use self::buffer::Buffer;
pub use self::testing::Testing;

/// A destination that accepts whole lines of text.
///
/// Implementations are shared between every logger of a registry, so they must tolerate
/// concurrent writes. No ordering is guaranteed between lines written by different threads.
pub trait Output: fmt::Debug + Send + Sync + 'static {
    /// Append one line of text.
    fn write_line(&self, line: &str) -> Result<(), Error>;
}

impl<T: Output + ?Sized> Output for Box<T> {
    fn write_line(&self, line: &str) -> Result<(), Error> {
        (**self).write_line(line)
    }
}

impl<T: Output + ?Sized> Output for Arc<T> {
    fn write_line(&self, line: &str) -> Result<(), Error> {
        (**self).write_line(line)
    }
}
