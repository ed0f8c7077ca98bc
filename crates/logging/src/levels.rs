//! crates/logging/src/levels.rs
//! Severity threshold shared by every adapter.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Most verbose severity an adapter emits.
///
/// Levels are ordered: `Off < Info < Debug`. Enabling `Debug` also enables
/// `Info`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Nothing is emitted.
    Off,
    /// Information for users of the application.
    #[default]
    Info,
    /// Developer-facing detail in addition to info.
    Debug,
}

impl Level {
    /// Maps a count of `-v` style flags onto a level.
    ///
    /// `0` is [`Level::Off`], `1` is [`Level::Info`], anything higher is
    /// [`Level::Debug`].
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        match level {
            0 => Self::Off,
            1 => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Reports whether info output passes this threshold.
    #[must_use]
    pub const fn enables_info(self) -> bool {
        matches!(self, Self::Info | Self::Debug)
    }

    /// Reports whether debug output passes this threshold.
    #[must_use]
    pub const fn enables_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown log level {input:?}; expected one of off, info, debug")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Self::Off, Self::Info, Self::Debug]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError {
                input: s.to_owned(),
            })
    }
}
