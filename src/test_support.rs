//! In-memory appenders shared by unit tests

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Appender writing into a buffer the test keeps a handle to
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub(crate) fn json_lines(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).expect("record should be valid JSON"))
            .collect()
    }
}

impl Appender for SharedBuffer {
    fn write(&mut self, encoded: &[u8]) -> Result<()> {
        self.bytes.lock().extend_from_slice(encoded);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Appender that rejects every write
pub(crate) struct FailingAppender;

impl Appender for FailingAppender {
    fn write(&mut self, _encoded: &[u8]) -> Result<()> {
        Err(LoggerError::writer("simulated failure"))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Appender that panics on every write
pub(crate) struct PanickingAppender;

impl Appender for PanickingAppender {
    fn write(&mut self, _encoded: &[u8]) -> Result<()> {
        panic!("appender exploded");
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "panicking"
    }
}
