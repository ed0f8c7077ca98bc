//! crates/logging/src/config.rs
//! Adapter configuration.

use std::borrow::Cow;
use std::time::SystemTime;

use fields::{ASSIGNMENT, SEPARATOR, TextEncoder};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use super::levels::Level;

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]/[month padding:zero]/[day padding:zero]");

const DATE_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Wall-clock stamp written between the level prefix and the message.
///
/// Stamps are rendered in UTC.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Timestamp {
    /// No stamp.
    #[default]
    Off,
    /// `2009/01/23`
    Date,
    /// `2009/01/23 01:23:23`
    DateTime,
}

impl Timestamp {
    /// Appends the stamp for `at` and a trailing space to `line`.
    ///
    /// Nothing is written for [`Timestamp::Off`] or when `at` cannot be
    /// formatted.
    pub fn write(self, at: SystemTime, line: &mut String) {
        let format = match self {
            Self::Off => return,
            Self::Date => DATE_FORMAT,
            Self::DateTime => DATE_TIME_FORMAT,
        };
        if let Ok(stamp) = OffsetDateTime::from(at).format(format) {
            line.push_str(&stamp);
            line.push(' ');
        }
    }
}

/// Settings shared by the logging adapters.
///
/// Missing keys fall back to [`LoggerConfig::default`] when deserialized.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Most verbose level emitted.
    pub level: Level,
    /// Text written before each key-value pair.
    pub separator: String,
    /// Text written between a key and its value.
    pub assignment: String,
    /// Text written before the message of an info line.
    pub info_prefix: String,
    /// Text written before the message of a debug line.
    pub debug_prefix: String,
    /// Wall-clock stamp written after the prefix.
    pub timestamp: Timestamp,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            separator: SEPARATOR.to_owned(),
            assignment: ASSIGNMENT.to_owned(),
            info_prefix: "INFO ".to_owned(),
            debug_prefix: "DEBUG ".to_owned(),
            timestamp: Timestamp::Off,
        }
    }
}

impl LoggerConfig {
    /// Default configuration at the level matching a `-v` count.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        Self::default().with_level(Level::from_verbose_level(level))
    }

    /// Replaces the level.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replaces the pair separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replaces the key-value assignment.
    #[must_use]
    pub fn with_assignment(mut self, assignment: impl Into<String>) -> Self {
        self.assignment = assignment.into();
        self
    }

    /// Replaces both line prefixes.
    #[must_use]
    pub fn with_prefixes(mut self, info: impl Into<String>, debug: impl Into<String>) -> Self {
        self.info_prefix = info.into();
        self.debug_prefix = debug.into();
        self
    }

    /// Replaces the timestamp style.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builds a text encoder over `writer` using this configuration's
    /// separator and assignment.
    pub fn encoder<W>(&self, writer: W) -> TextEncoder<W> {
        TextEncoder::new(writer)
            .with_separator(Cow::Owned(self.separator.clone()))
            .with_assignment(Cow::Owned(self.assignment.clone()))
    }
}
