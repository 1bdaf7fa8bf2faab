//! Appender trait for log output destinations

use super::error::Result;

/// A destination for encoded records
///
/// Appenders receive fully encoded lines and own whatever handle they write
/// to. `flush` must not return until buffered bytes are handed to the OS.
pub trait Appender: Send + Sync {
    fn write(&mut self, encoded: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
