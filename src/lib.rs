//! # Rust Log Facade
//!
//! Process-wide structured logging configured from a single declarative
//! [`Options`] value.
//!
//! ## Features
//!
//! - **Atomic configuration**: a new logger replaces the old one as a whole, or not at all
//! - **Structured records**: typed fields, child loggers, JSON or console encoding
//! - **Burst control**: repeated records are sampled per one-second window
//! - **Redirection**: `log` and `tracing` records reach the same destinations
//!
//! ## Example
//!
//! ```no_run
//! use rust_log_facade::prelude::*;
//!
//! let options = Options::new()
//!     .with_output_level("info")
//!     .with_stack_trace_level("error")
//!     .with_output_paths(["stdout", "/var/log/app.log"])
//!     .with_json_encoding(true);
//! facade::configure(&options)?;
//!
//! facade::info("ready", &[Field::str("region", "eu-west-1")]);
//! facade::warnw("slow request", &["path".into(), "/v1/check".into()]);
//! log::info!("libraries using the log crate land here too");
//!
//! facade::sync()?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod facade;
pub mod macros;
pub mod redirect;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, Caller, Encoding, Field, FieldValue, LogContext, LogEntry, LogLevel,
        LogSampler, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Options,
        Result, SamplingConfig, SugaredLogger, Value,
    };
    pub use crate::facade::{self, LogHandle};
}

pub use crate::appenders::{ConsoleAppender, FileAppender};
pub use crate::core::{
    Appender, Caller, Encoder, EncoderConfig, Encoding, Field, FieldValue, LogContext, LogEntry,
    LogLevel, LogSampler, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Options, Result, SamplingConfig, SugaredLogger, Value,
};
pub use crate::facade::LogHandle;
pub use crate::redirect::{Redirect, StdLogRedirect, TracingRedirect};
