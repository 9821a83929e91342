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

//! Logforth-capture routes log entries written by code under test into the output of the test
//! that produced them, instead of a process-wide sink.
//!
//! # Overview
//!
//! A [`LoggerRegistry`] creates one [`CategoryLogger`] per category name and caches it. Each
//! logger is bound to a filter, resolved once at creation from either an explicit predicate or a
//! [`Configuration`](config::Configuration), and to the [`Output`] of the registry. Category
//! names are dot-separated; a configuration threshold for `App` applies to `App.Db` unless
//! `App.Db` has one of its own, and `Default` applies to every category.
//!
//! # Examples
//!
//! Write to the output captured by `cargo test`, at `Information` and above:
//!
//! ```
//! let registry = logforth_capture::testing().build().unwrap();
//!
//! let logger = registry.get_or_create_logger("my_crate::tests").unwrap();
//! logger.info(format_args!("This is an info message."));
//! ```
//!
//! Resolve thresholds per category from configuration, and keep the lines for assertions:
//!
//! ```
//! use logforth_capture::config::Configuration;
//! use logforth_capture::output::Buffer;
//!
//! let buffer = Buffer::new();
//! let registry = logforth_capture::builder()
//!     .output(buffer.clone())
//!     .configuration(
//!         Configuration::new()
//!             .set("LogLevel:Default", "Warning")
//!             .set("LogLevel:App.Db", "Debug"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let db = registry.get_or_create_logger("App.Db.Pool").unwrap();
//! let http = registry.get_or_create_logger("App.Http").unwrap();
//! db.debug(format_args!("connection acquired"));
//! http.info(format_args!("request served"));
//!
//! assert_eq!(buffer.lines().len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod config;
pub mod filter;
pub mod output;

mod error;
mod logger;
mod registry;
mod severity;

pub use self::error::Error;
pub use self::filter::SeverityFilter;
pub use self::logger::CategoryLogger;
pub use self::logger::DEFAULT_CATEGORY_NAME;
pub use self::logger::EventId;
pub use self::logger::Scope;
pub use self::output::Output;
pub use self::registry::LoggerRegistry;
pub use self::registry::RegistryBuilder;
pub use self::registry::builder;
pub use self::registry::testing;
pub use self::severity::Severity;
