//! crates/fields/src/scratch.rs
//! Reusable string buffers for joining sequence fields.
//!
//! Sequence kinds (`ints`, `int64s`, `strings`) are rendered into a temporary
//! string before being handed to the sink. [`FieldScratch`] lets a caller keep
//! that allocation alive across many encodes, and [`ScratchPool`] shares a
//! bounded set of buffers between threads. Both clear a buffer before handing
//! it out and before it is returned, so no call ever observes another call's
//! data.

use std::fmt::{self, Write as _};
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

const SEQUENCE_SEPARATOR: &str = ", ";
const DEFAULT_CAPACITY: usize = 64;

/// Caller-owned scratch buffer used when joining sequence values.
#[derive(Clone, Debug, Default)]
pub struct FieldScratch {
    buf: String,
}

impl FieldScratch {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Creates a scratch buffer with at least `capacity` bytes reserved.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Returns the reserved capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Joins `values` as `"v1, v2, ..."` and returns the rendered slice.
    ///
    /// The buffer is cleared first; the returned slice stays valid until the
    /// next call.
    pub fn join<I, T>(&mut self, values: I) -> &str
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        self.buf.clear();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(SEQUENCE_SEPARATOR);
            }
            // Writing into a String cannot fail.
            let _ = write!(self.buf, "{value}");
        }
        &self.buf
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Thread-safe pool of [`FieldScratch`] buffers.
///
/// # Examples
///
/// ```
/// use fields::ScratchPool;
/// use std::sync::Arc;
///
/// let pool = Arc::new(ScratchPool::new(2));
/// {
///     let mut scratch = ScratchPool::acquire(&pool);
///     assert_eq!(scratch.join([1, 2, 3]), "1, 2, 3");
/// }
/// assert_eq!(pool.available(), 1);
/// ```
#[derive(Debug)]
pub struct ScratchPool {
    buffers: Mutex<Vec<FieldScratch>>,
    max_buffers: usize,
}

impl ScratchPool {
    /// Creates a pool that retains at most `max_buffers` idle buffers.
    #[must_use]
    pub fn new(max_buffers: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::with_capacity(max_buffers)),
            max_buffers,
        }
    }

    /// Takes a cleared buffer from the pool, allocating one if none is idle.
    ///
    /// The guard returns the buffer on drop.
    #[must_use]
    pub fn acquire(pool: &Arc<Self>) -> PooledScratch {
        let scratch = pool
            .buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let mut scratch =
            scratch.unwrap_or_else(|| FieldScratch::with_capacity(DEFAULT_CAPACITY));
        scratch.clear();

        PooledScratch {
            scratch: Some(scratch),
            pool: Arc::clone(pool),
        }
    }

    fn release(&self, mut scratch: FieldScratch) {
        scratch.clear();
        let mut buffers = self
            .buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if buffers.len() < self.max_buffers {
            buffers.push(scratch);
        }
    }

    /// Returns the number of idle buffers.
    #[must_use]
    pub fn available(&self) -> usize {
        self.buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the maximum number of idle buffers retained.
    #[must_use]
    pub const fn max_buffers(&self) -> usize {
        self.max_buffers
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        let max_buffers = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4);
        Self::new(max_buffers)
    }
}

/// RAII guard over a pooled [`FieldScratch`].
#[derive(Debug)]
pub struct PooledScratch {
    scratch: Option<FieldScratch>,
    pool: Arc<ScratchPool>,
}

impl PooledScratch {
    /// Mutable access to the scratch buffer, for encode calls that take one.
    pub fn get_mut(&mut self) -> &mut FieldScratch {
        self.scratch.get_or_insert_with(FieldScratch::new)
    }

    /// Joins `values`; see [`FieldScratch::join`].
    pub fn join<I, T>(&mut self, values: I) -> &str
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        self.get_mut().join(values)
    }
}

impl Deref for PooledScratch {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.scratch.as_ref().map_or("", |scratch| scratch.buf.as_str())
    }
}

impl Drop for PooledScratch {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.pool.release(scratch);
        }
    }
}
