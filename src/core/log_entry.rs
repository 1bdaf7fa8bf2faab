//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::Location;

/// Source location of the call that produced a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }

    /// Last directory and file name only, e.g. `core/logger.rs:42`
    pub fn short(&self) -> String {
        let path = self.file.replace('\\', "/");
        let trimmed = match path.rfind('/') {
            Some(last) => match path[..last].rfind('/') {
                Some(prev) => &path[prev + 1..],
                None => path.as_str(),
            },
            None => path.as_str(),
        };
        format!("{}:{}", trimmed, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: Option<String>,
    pub caller: Option<Caller>,
    pub stack: Option<String>,
    pub context: LogContext,
}

impl LogEntry {
    /// A record carrying `message` exactly as given
    ///
    /// Escaping for line-oriented output is the encoder's job.
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_owned(),
            timestamp: Utc::now(),
            logger_name: None,
            caller: None,
            stack: None,
            context: LogContext::new(),
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.logger_name = name.map(str::to_owned);
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_stack(mut self, stack: String) -> Self {
        self.stack = Some(stack);
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_kept_verbatim() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nline two\tend");
        assert_eq!(entry.message, "line one\nline two\tend");
    }

    #[test]
    fn test_short_caller() {
        assert_eq!(
            Caller::new("src/core/logger.rs", 42).short(),
            "core/logger.rs:42"
        );
        assert_eq!(Caller::new("main.rs", 7).short(), "main.rs:7");
        assert_eq!(Caller::new("lib/main.rs", 7).short(), "lib/main.rs:7");
        assert_eq!(
            Caller::new("C:\\work\\app\\src\\main.rs", 3).short(),
            "src/main.rs:3"
        );
    }

    #[test]
    fn test_caller_from_location() {
        let caller = Caller::from_location(Location::caller());
        assert!(caller.line > 0);
        assert!(caller.file.ends_with("log_entry.rs"));
    }
}
