//! crates/fields/src/logger.rs
//! Minimal logger capability consumed by application code and helpers.

use crate::fields::Fields;

/// The smallest logger surface application code depends on.
///
/// Backend adapters implement this trait; [`when_done`](crate::when_done) and
/// other helpers are written against it. Implementations must treat their
/// bound context as immutable: [`with`](Self::with) returns a new logger whose
/// context is a copy of this one's plus `fields`.
pub trait Logger {
    /// Returns a logger carrying this logger's context followed by `fields`.
    fn with(&self, fields: Fields) -> Self
    where
        Self: Sized;

    /// Logs developer-facing detail.
    fn debug(&self, msg: &str, fields: Fields);

    /// Logs information for users of the application.
    fn info(&self, msg: &str, fields: Fields);

    /// Reports whether debug output is enabled.
    fn is_debug(&self) -> bool;

    /// Reports whether info output is enabled.
    fn is_info(&self) -> bool;
}

/// Logger that discards everything.
///
/// The level flags only affect what [`is_debug`](Logger::is_debug) and
/// [`is_info`](Logger::is_info) report, which lets callers exercise level
/// checks without producing output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BlackHole {
    /// Value reported by `is_debug`.
    pub enable_debug: bool,
    /// Value reported by `is_info`.
    pub enable_info: bool,
}

impl BlackHole {
    /// Creates a black hole reporting the given levels as enabled.
    #[must_use]
    pub const fn new(enable_debug: bool, enable_info: bool) -> Self {
        Self {
            enable_debug,
            enable_info,
        }
    }
}

impl Logger for BlackHole {
    fn with(&self, _fields: Fields) -> Self {
        *self
    }

    fn debug(&self, _msg: &str, _fields: Fields) {}

    fn info(&self, _msg: &str, _fields: Fields) {}

    fn is_debug(&self) -> bool {
        self.enable_debug
    }

    fn is_info(&self) -> bool {
        self.enable_info
    }
}
