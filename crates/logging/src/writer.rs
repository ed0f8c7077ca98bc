//! crates/logging/src/writer.rs
//! [`Logger`] adapter rendering plain text lines into an [`io::Write`] target.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use fields::{Clock, Fields, Logger, ScratchPool, SystemClock};

use super::config::{LoggerConfig, Timestamp};

/// Logger writing one text line per enabled call.
///
/// Each line is the level prefix, an optional timestamp, the message, the
/// bound context fields, the call's fields, and a newline, rendered with the
/// configured separator and assignment. A failing field is reported inline as
/// an `error` pair.
///
/// Both levels write to the writer given at construction unless
/// [`with_info_output`](Self::with_info_output) or
/// [`with_debug_output`](Self::with_debug_output) route a level elsewhere.
/// Clones and loggers derived through [`with`](Logger::with) share the
/// writers behind mutexes, so lines from different threads never interleave.
/// The bound context is copied on every `with`, so siblings never see each
/// other's fields.
///
/// # Examples
///
/// ```
/// use fields::{Field, Fields, Logger};
/// use logging::{LoggerConfig, WriterLogger};
///
/// let parent = WriterLogger::new(Vec::new(), LoggerConfig::default());
/// let child = parent.with(Fields::from(Field::int("request", 7)));
/// child.info("served", Fields::from(Field::string("path", "/")));
///
/// let output = parent.with_writer(|buf| String::from_utf8(buf.clone()))?;
/// assert_eq!(output, "INFO served request: 7 path: \"/\"\n");
/// # Ok::<(), std::string::FromUtf8Error>(())
/// ```
pub struct WriterLogger<W> {
    writer: Arc<Mutex<W>>,
    info_writer: Option<Arc<Mutex<W>>>,
    debug_writer: Option<Arc<Mutex<W>>>,
    config: Arc<LoggerConfig>,
    context: Fields,
    clock: Arc<dyn Clock>,
    scratch: Arc<ScratchPool>,
    failed_writes: Arc<AtomicU64>,
}

impl<W> Clone for WriterLogger<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            info_writer: self.info_writer.clone(),
            debug_writer: self.debug_writer.clone(),
            config: Arc::clone(&self.config),
            context: self.context.clone(),
            clock: Arc::clone(&self.clock),
            scratch: Arc::clone(&self.scratch),
            failed_writes: Arc::clone(&self.failed_writes),
        }
    }
}

impl<W> WriterLogger<W>
where
    W: Write,
{
    /// Creates a logger without context fields.
    pub fn new(writer: W, config: LoggerConfig) -> Self {
        Self::with_context(writer, config, Fields::new())
    }

    /// Creates a logger whose lines always start with `context`.
    pub fn with_context(writer: W, config: LoggerConfig, context: Fields) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            info_writer: None,
            debug_writer: None,
            config: Arc::new(config),
            context,
            clock: Arc::new(SystemClock),
            scratch: Arc::new(ScratchPool::default()),
            failed_writes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Sends info lines to `writer` instead of the shared writer.
    #[must_use]
    pub fn with_info_output(mut self, writer: W) -> Self {
        self.info_writer = Some(Arc::new(Mutex::new(writer)));
        self
    }

    /// Sends debug lines to `writer` instead of the shared writer.
    #[must_use]
    pub fn with_debug_output(mut self, writer: W) -> Self {
        self.debug_writer = Some(Arc::new(Mutex::new(writer)));
        self
    }

    /// Replaces the clock used for line timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Shares `pool` for the scratch buffers used while rendering lines.
    #[must_use]
    pub fn with_scratch_pool(mut self, pool: Arc<ScratchPool>) -> Self {
        self.scratch = pool;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Returns the bound context fields.
    pub fn context(&self) -> &Fields {
        &self.context
    }

    /// Returns the scratch pool shared by this logger and its clones.
    pub const fn scratch_pool(&self) -> &Arc<ScratchPool> {
        &self.scratch
    }

    /// Number of lines that could not be written, across all clones.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Runs `f` with exclusive access to the shared writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        locked(&self.writer, f)
    }

    /// Flushes every writer.
    pub fn flush(&self) -> io::Result<()> {
        self.with_writer(Write::flush)?;
        for writer in [&self.info_writer, &self.debug_writer].into_iter().flatten() {
            locked(writer, Write::flush)?;
        }
        Ok(())
    }

    fn render(&self, prefix: &str, msg: &str, fields: Fields) -> String {
        let mut line = String::with_capacity(prefix.len() + msg.len() + 64);
        line.push_str(prefix);
        if self.config.timestamp != Timestamp::Off {
            self.config.timestamp.write(self.clock.wall(), &mut line);
        }
        line.push_str(msg);

        let all = self.context.with(fields);
        let mut scratch = ScratchPool::acquire(&self.scratch);
        let mut encoder = self.config.encoder(line);
        encoder.write_line_with_scratch("", &all, scratch.get_mut());
        encoder.into_inner()
    }

    fn emit(&self, target: &Arc<Mutex<W>>, prefix: &str, msg: &str, fields: Fields) {
        let line = self.render(prefix, msg, fields);
        if locked(target, |writer| writer.write_all(line.as_bytes())).is_err() {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn locked<W, R>(writer: &Arc<Mutex<W>>, f: impl FnOnce(&mut W) -> R) -> R {
    let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut writer)
}

impl<W> Logger for WriterLogger<W>
where
    W: Write,
{
    fn with(&self, fields: Fields) -> Self {
        Self {
            context: self.context.with(fields),
            ..self.clone()
        }
    }

    fn debug(&self, msg: &str, fields: Fields) {
        if self.is_debug() {
            let target = self.debug_writer.as_ref().unwrap_or(&self.writer);
            self.emit(target, &self.config.debug_prefix, msg, fields);
        }
    }

    fn info(&self, msg: &str, fields: Fields) {
        if self.is_info() {
            let target = self.info_writer.as_ref().unwrap_or(&self.writer);
            self.emit(target, &self.config.info_prefix, msg, fields);
        }
    }

    fn is_debug(&self) -> bool {
        self.config.level.enables_debug()
    }

    fn is_info(&self) -> bool {
        self.config.level.enables_info()
    }
}

impl<W> std::fmt::Debug for WriterLogger<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterLogger")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("separate_info", &self.info_writer.is_some())
            .field("separate_debug", &self.debug_writer.is_some())
            .finish_non_exhaustive()
    }
}
