#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fields` is a backend-agnostic structured logging value layer. Application
//! code builds key-value [`Field`]s once and hands them to whichever logging
//! backend is in use; the backend receives them through the [`KeyValuer`]
//! sink trait it implements.
//!
//! # Design
//!
//! A [`Field`] is an immutable tagged value: a key plus a closed
//! [`FieldKind`] payload. Encoding is deferred until
//! [`Field::add_to`] runs, which calls exactly one primitive sink method, or
//! recurses through [`KeyValuer::add_marshaler`] and [`KeyValuer::nest`] for
//! user types and namespaces. [`Fields`] is the ordered sequence a logging
//! call passes around.
//!
//! [`TextEncoder`] is the reference sink. It renders
//! `" key: value"` fragments and backs [`Fields::to_text`].
//!
//! # Invariants
//!
//! - Fields are encoded strictly in sequence order; nested fields are fully
//!   encoded before the enclosing `nest` call returns.
//! - [`Fields::with`] copies, so contexts derived from a shared parent never
//!   observe each other's additions.
//! - `uint64` fields keep their full range.
//! - Scratch buffers are cleared before reuse and before returning to a
//!   [`ScratchPool`].
//!
//! # Errors
//!
//! Encoding surfaces [`Error`]. [`Fields::add_to`] stops at the first failing
//! field and wraps its error with the field position. The reference encoder
//! degrades instead of failing in two places: a failing [`Marshaler`] becomes
//! an inline `error` pair, and [`Fields::to_text`] appends the formatted error
//! to whatever was already written.
//!
//! # Examples
//!
//! ```
//! use fields::{Field, Fields};
//!
//! let fields = Fields::from([
//!     Field::string("user", "gopher"),
//!     Field::nest("req", [Field::string("method", "GET"), Field::int("status", 200)]),
//!     Field::ints("ids", [1, 2, 3]),
//! ]);
//!
//! assert_eq!(
//!     fields.to_text("served"),
//!     "served user: \"gopher\" req:  method: \"GET\" status: 200 ids: \"1, 2, 3\"\n",
//! );
//! ```

mod deferred;
mod encoder;
mod error;
mod field;
mod fields;
mod key_valuer;
mod logger;
mod scratch;

pub use deferred::{Clock, Deferred, ManualClock, SystemClock, when_done, when_done_with_clock};
pub use encoder::TextEncoder;
pub use error::{BoxError, Error, Result};
pub use field::{Field, FieldKind};
pub use fields::Fields;
pub use key_valuer::{KeyValuer, Marshaler, TextMarshaler};
pub use logger::{BlackHole, Logger};
pub use scratch::{FieldScratch, PooledScratch, ScratchPool};

/// Key under which errors are logged, both by [`Field::err`] and by the
/// reference encoder's inline failure annotations.
pub const KEY_NAME_ERROR: &str = "error";

/// Key of the elapsed-time field added by [`Deferred`].
pub const KEY_NAME_DURATION: &str = "duration";

/// Default text written between key-value pairs.
pub const SEPARATOR: &str = " ";

/// Default text written between a key and its value.
pub const ASSIGNMENT: &str = ": ";

/// `tracing` target used for the crate's own diagnostics.
pub const TRACING_TARGET: &str = "kvlog::fields";
