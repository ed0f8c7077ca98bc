//! crates/test-support/src/lib.rs
//!
//! Shared test utilities for the kvlog workspace.
//!
//! - [`MutexBuffer`]: a cloneable, thread-safe [`std::io::Write`] target for
//!   loggers under test.
//! - [`RecordingSink`]: a [`fields::KeyValuer`] that records every call it
//!   receives, including nest boundaries.
//! - [`TempLog`]: a log file inside a temporary directory.

mod buffer;
mod recording;
mod temp;

pub use buffer::MutexBuffer;
pub use recording::{Recorded, RecordingSink};
pub use temp::TempLog;
