//! crates/logging/src/tracing_bridge.rs
//! Bridge between [`Logger`] calls and the `tracing` ecosystem.
//!
//! # Architecture
//!
//! - [`TracingLogger`]: forwards `info`/`debug` calls as `tracing` events under
//!   the [`TRACING_TARGET`] target. The rendered fields travel in the event's
//!   `fields` value, the message in its `message`.
//! - [`init_tracing`] and [`init_tracing_with_filter`] install a formatting
//!   subscriber whose verbosity follows a [`LoggerConfig`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use fields::{Field, Fields, Logger};
//! use logging::{LoggerConfig, TracingLogger, init_tracing};
//!
//! let config = LoggerConfig::from_verbose_level(2);
//! init_tracing(&config)?;
//!
//! let log = TracingLogger::new(&config).with(Fields::from(Field::string("service", "api")));
//! log.debug("cache warmed", Fields::from(Field::int("entries", 512)));
//! ```

use fields::{Fields, Logger};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry};

use super::config::LoggerConfig;
use super::levels::Level;

/// Target of the events emitted by [`TracingLogger`].
pub const TRACING_TARGET: &str = "kvlog";

/// [`Logger`] forwarding to whatever `tracing` subscriber is installed.
///
/// The configured [`Level`] gates calls before any event is built, so a
/// disabled level costs no field rendering.
#[derive(Clone, Debug)]
pub struct TracingLogger {
    config: LoggerConfig,
    context: Fields,
}

impl TracingLogger {
    /// Creates a logger with the configuration's level and punctuation.
    #[must_use]
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            config: config.clone(),
            context: Fields::new(),
        }
    }

    /// Returns the bound context fields.
    #[must_use]
    pub fn context(&self) -> &Fields {
        &self.context
    }

    /// Renders the context followed by `fields` without the leading
    /// separator.
    fn render(&self, fields: Fields) -> String {
        let all = self.context.with(fields);
        let mut encoder = self.config.encoder(String::new());
        if let Err(err) = all.add_to(&mut encoder) {
            encoder.annotate_error(&err);
        }
        let rendered = encoder.into_inner();
        match rendered.strip_prefix(self.config.separator.as_str()) {
            Some(rest) => rest.to_owned(),
            None => rendered,
        }
    }
}

impl Logger for TracingLogger {
    fn with(&self, fields: Fields) -> Self {
        Self {
            context: self.context.with(fields),
            ..self.clone()
        }
    }

    fn debug(&self, msg: &str, fields: Fields) {
        if self.is_debug() {
            let fields = self.render(fields);
            tracing::debug!(target: TRACING_TARGET, fields = %fields, "{msg}");
        }
    }

    fn info(&self, msg: &str, fields: Fields) {
        if self.is_info() {
            let fields = self.render(fields);
            tracing::info!(target: TRACING_TARGET, fields = %fields, "{msg}");
        }
    }

    fn is_debug(&self) -> bool {
        self.config.level.enables_debug()
    }

    fn is_info(&self) -> bool {
        self.config.level.enables_info()
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => Self::OFF,
            Level::Info => Self::INFO,
            Level::Debug => Self::DEBUG,
        }
    }
}

/// Installs a global formatting subscriber at the configuration's level.
///
/// `RUST_LOG` takes precedence when set and valid. Fails when a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggerConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

/// Installs a global formatting subscriber combining `filter` with the
/// configuration's level.
///
/// An event must pass both to be printed.
///
/// ```rust,ignore
/// use logging::{LoggerConfig, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// let config = LoggerConfig::from_verbose_level(2);
/// init_tracing_with_filter(&config, EnvFilter::new("kvlog=debug,hyper=warn"))?;
/// ```
pub fn init_tracing_with_filter<F>(config: &LoggerConfig, filter: F) -> Result<(), TryInitError>
where
    F: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(LevelFilter::from(config.level))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fields::Field;

    #[test]
    fn level_maps_onto_level_filter() {
        assert_eq!(LevelFilter::from(Level::Off), LevelFilter::OFF);
        assert_eq!(LevelFilter::from(Level::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(Level::Debug), LevelFilter::DEBUG);
    }

    #[test]
    fn render_strips_leading_separator() {
        let logger = TracingLogger::new(&LoggerConfig::default())
            .with(Fields::from(Field::string("service", "api")));
        assert_eq!(
            logger.render(Fields::from(Field::int("n", 1))),
            "service: \"api\" n: 1"
        );
    }

    #[test]
    fn render_annotates_failures() {
        let logger = TracingLogger::new(&LoggerConfig::default());
        assert_eq!(
            logger.render(Fields::from(Field::default())),
            "error: field #0 \"\": field kind not supported for key \"\""
        );
    }

    #[test]
    fn with_copies_context() {
        let parent = TracingLogger::new(&LoggerConfig::default());
        let child = parent.with(Fields::from(Field::bool("child", true)));
        assert!(parent.context().is_empty());
        assert_eq!(child.context().len(), 1);
    }
}
