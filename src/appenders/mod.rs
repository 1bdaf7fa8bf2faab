//! Appender implementations and destination resolution

pub mod console;
pub mod file;

pub use console::{ConsoleAppender, Stream};
pub use file::FileAppender;

pub use crate::core::Appender;

use crate::core::{LoggerError, Result};

/// Open the destination named by `path`
///
/// `stdout` and `stderr` name the standard streams; `file://` URLs and plain
/// paths name files opened for appending.
pub fn open(path: &str) -> Result<Box<dyn Appender>> {
    match path {
        "stdout" => Ok(Box::new(ConsoleAppender::stdout())),
        "stderr" => Ok(Box::new(ConsoleAppender::stderr())),
        "" => Err(LoggerError::destination_open(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty destination path"),
        )),
        _ => {
            let file_path = path.strip_prefix("file://").unwrap_or(path);
            Ok(Box::new(FileAppender::new(file_path)?))
        }
    }
}

/// Open every destination, failing on the first that cannot be opened
pub fn open_all(paths: &[String]) -> Result<Vec<Box<dyn Appender>>> {
    paths.iter().map(|path| open(path)).collect()
}
