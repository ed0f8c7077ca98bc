//! crates/test-support/src/temp.rs

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Log file living in a temporary directory that is removed on drop.
#[derive(Debug)]
pub struct TempLog {
    dir: TempDir,
    path: PathBuf,
}

impl TempLog {
    /// Creates the directory and an empty `test.log` inside it.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("test.log");
        File::create(&path)?;
        Ok(Self { dir, path })
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the enclosing temporary directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens the log file for appending.
    pub fn append(&self) -> io::Result<File> {
        OpenOptions::new().append(true).open(&self.path)
    }

    /// Reads the whole log file.
    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
