//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends encoded records to a file, creating it if needed
pub struct FileAppender {
    path: PathBuf,
    name: String,
    writer: BufWriter<File>,
}

impl FileAppender {
    /// Open `path` for appending
    ///
    /// Fails with [`LoggerError::DestinationOpen`] naming the path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path.display().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::destination_open(name.clone(), e))?;

        Ok(Self {
            path,
            name,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn write(&mut self, encoded: &[u8]) -> Result<()> {
        self.writer.write_all(encoded)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
