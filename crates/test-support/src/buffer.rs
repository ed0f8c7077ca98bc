//! crates/test-support/src/buffer.rs
//! Shared in-memory write target.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory byte buffer shared between clones.
///
/// Every clone writes into the same storage, so a test can hand one clone to a
/// logger and inspect the output through another.
#[derive(Clone, Debug, Default)]
pub struct MutexBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl MutexBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the contents decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the contents split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl io::Write for MutexBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;

    #[test]
    fn clones_share_storage() {
        let buffer = MutexBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"hello\nworld\n").unwrap();

        assert_eq!(buffer.contents(), "hello\nworld\n");
        assert_eq!(buffer.lines(), ["hello", "world"]);

        buffer.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn concurrent_writes_are_not_lost() {
        let buffer = MutexBuffer::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut writer = buffer.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        writer.write_all(b"x").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(buffer.bytes().len(), 400);
    }
}
