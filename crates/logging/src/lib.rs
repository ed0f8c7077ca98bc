#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` connects the backend-agnostic [`fields`] layer to concrete
//! outputs. Application code depends on [`fields::Logger`]; this crate
//! provides the implementations and their configuration.
//!
//! # Design
//!
//! - [`LoggerConfig`] holds the [`Level`] threshold plus the punctuation and
//!   line prefixes used when rendering text.
//! - [`WriterLogger`] renders each enabled call as one line into any
//!   [`std::io::Write`] target shared behind a mutex, optionally routing info
//!   and debug lines to separate targets and stamping them with a
//!   [`Timestamp`].
//! - `TracingLogger` (feature `tracing`) forwards calls as `tracing` events;
//!   `init_tracing` installs a matching subscriber.
//!
//! # Invariants
//!
//! - `with` never mutates the logger it is called on; derived loggers carry a
//!   copy of the parent context followed by the new fields.
//! - A disabled level renders nothing.
//!
//! # Errors
//!
//! [`fields::Logger`] methods do not return errors. Field encoding failures
//! are written inline as an `error` pair. [`WriterLogger`] counts failed writes
//! instead of raising them.
//!
//! # Examples
//!
//! ```
//! use fields::{Field, Fields, Logger};
//! use logging::{Level, LoggerConfig, WriterLogger};
//!
//! let config = LoggerConfig::default().with_level(Level::Debug);
//! let log = WriterLogger::new(Vec::new(), config);
//! log.debug("cache", Fields::from([Field::bool("hit", true), Field::uint64("size", 42)]));
//!
//! let text = log.with_writer(|buf| String::from_utf8_lossy(buf).into_owned());
//! assert_eq!(text, "DEBUG cache hit: true size: 42\n");
//! ```

mod config;
mod levels;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod writer;

pub use config::{LoggerConfig, Timestamp};
pub use levels::{Level, ParseLevelError};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{TRACING_TARGET, TracingLogger, init_tracing, init_tracing_with_filter};
pub use writer::WriterLogger;
