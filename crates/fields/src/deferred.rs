//! crates/fields/src/deferred.rs
//! Logs the elapsed time of an operation when it finishes.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime};

use crate::KEY_NAME_DURATION;
use crate::field::Field;
use crate::fields::Fields;
use crate::logger::Logger;

/// Source of timestamps.
///
/// [`now`](Self::now) measures elapsed time. [`wall`](Self::wall) is only used
/// to stamp output lines.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Returns the current wall-clock time.
    fn wall(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// [`Clock`] that only moves when told to.
///
/// Advancing past the largest representable instant pins the clock there.
///
/// # Examples
///
/// ```
/// use fields::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    wall_base: SystemTime,
    offset: Mutex<Duration>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(SystemTime::now())
    }

    /// Creates a clock whose wall time starts at `wall`.
    #[must_use]
    pub fn starting_at(wall: SystemTime) -> Self {
        Self {
            base: Instant::now(),
            wall_base: wall,
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset = offset.saturating_add(by);
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let base = self.base;
        saturating_shift(self.offset(), |by| base.checked_add(by)).unwrap_or(base)
    }

    fn wall(&self) -> SystemTime {
        let base = self.wall_base;
        saturating_shift(self.offset(), |by| base.checked_add(by)).unwrap_or(base)
    }
}

/// Applies the largest part of `by` that `shift` accepts.
fn saturating_shift<T>(by: Duration, shift: impl Fn(Duration) -> Option<T>) -> Option<T> {
    if let Some(shifted) = shift(by) {
        return Some(shifted);
    }

    let (mut fits, mut overflows) = (Duration::ZERO, by);
    while overflows - fits > Duration::from_nanos(1) {
        let mid = fits + (overflows - fits) / 2;
        if shift(mid).is_some() {
            fits = mid;
        } else {
            overflows = mid;
        }
    }
    shift(fits)
}

/// Pair of callbacks that log how long ago they were created.
///
/// Built by [`when_done`] or [`when_done_with_clock`]. Both
/// [`info`](Self::info) and [`debug`](Self::debug) prepend a
/// [`KEY_NAME_DURATION`] field holding the elapsed nanoseconds to the
/// caller's fields.
#[derive(Clone)]
pub struct Deferred<L> {
    logger: L,
    clock: Arc<dyn Clock>,
    start: Instant,
}

/// Starts timing with the system clock.
///
/// # Examples
///
/// ```
/// use fields::{BlackHole, Field, Fields, when_done};
///
/// let done = when_done(BlackHole::new(false, true));
/// // ... the work being measured ...
/// done.info("stats", Fields::from(Field::string("package", "main")));
/// ```
pub fn when_done<L>(logger: L) -> Deferred<L>
where
    L: Logger,
{
    when_done_with_clock(logger, Arc::new(SystemClock))
}

/// Starts timing with `clock`, capturing the start instant immediately.
pub fn when_done_with_clock<L>(logger: L, clock: Arc<dyn Clock>) -> Deferred<L>
where
    L: Logger,
{
    let start = clock.now();
    Deferred {
        logger,
        clock,
        start,
    }
}

impl<L> Deferred<L>
where
    L: Logger,
{
    /// Time passed since creation according to the clock.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// Logs `msg` at info level with the elapsed time and `fields`.
    pub fn info(&self, msg: &str, fields: impl Into<Fields>) {
        self.logger.info(msg, self.timed(fields.into()));
    }

    /// Logs `msg` at debug level with the elapsed time and `fields`.
    pub fn debug(&self, msg: &str, fields: impl Into<Fields>) {
        self.logger.debug(msg, self.timed(fields.into()));
    }

    /// Borrows the wrapped logger.
    pub const fn logger(&self) -> &L {
        &self.logger
    }

    fn timed(&self, fields: Fields) -> Fields {
        let mut all = Fields::with_capacity(fields.len() + 1);
        all.push(Field::duration(KEY_NAME_DURATION, self.elapsed()));
        all.extend(fields);
        all
    }
}
