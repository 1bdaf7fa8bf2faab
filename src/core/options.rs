//! Declarative logging options
//!
//! `Options` is the single input to [`crate::facade::LogHandle::configure`].
//! It is a plain value: build it (from defaults, a config file through serde,
//! or command-line flags through clap), then hand it over. Level names are
//! kept as strings and only validated when the options are applied.
//!
//! # Example
//!
//! ```
//! use rust_log_facade::{LogLevel, Options};
//!
//! let options = Options::new()
//!     .with_output_level("warn")
//!     .with_stack_trace_level("error")
//!     .with_json_encoding(true);
//!
//! assert_eq!(options.output_level().unwrap(), LogLevel::Warn);
//! assert_eq!(options.stack_trace_level().unwrap(), LogLevel::Error);
//! ```

use super::error::Result;
use super::log_level::LogLevel;
use super::sampling::SamplingConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_LEVEL: &str = "info";
pub const DEFAULT_STACK_TRACE_LEVEL: &str = "none";
pub const DEFAULT_OUTPUT_PATH: &str = "stdout";

/// Logging options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct Options {
    /// Minimum level of records to emit: debug, info, warn, error or none
    #[cfg_attr(
        feature = "cli",
        arg(long = "log_output_level", default_value = DEFAULT_OUTPUT_LEVEL)
    )]
    pub output_level: String,

    /// Minimum level of records that carry a stack trace: debug, info, warn, error or none
    #[cfg_attr(
        feature = "cli",
        arg(long = "log_stacktrace_level", default_value = DEFAULT_STACK_TRACE_LEVEL)
    )]
    pub stack_trace_level: String,

    /// Output destinations: stdout, stderr, or file paths
    #[cfg_attr(
        feature = "cli",
        arg(long = "log_target", default_value = DEFAULT_OUTPUT_PATH, value_delimiter = ',')
    )]
    pub output_paths: Vec<String>,

    /// Encode records as JSON objects instead of console lines
    #[cfg_attr(feature = "cli", arg(long = "log_as_json"))]
    pub json_encoding: bool,

    /// Attach the source location of each log call
    #[cfg_attr(feature = "cli", arg(long = "log_caller"))]
    pub include_caller_source_location: bool,

    /// Burst control for repeated records
    #[cfg_attr(feature = "cli", arg(skip))]
    pub sampling: SamplingConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_level: DEFAULT_OUTPUT_LEVEL.to_string(),
            stack_trace_level: DEFAULT_STACK_TRACE_LEVEL.to_string(),
            output_paths: vec![DEFAULT_OUTPUT_PATH.to_string()],
            json_encoding: false,
            include_caller_source_location: false,
            sampling: SamplingConfig::default(),
        }
    }
}

impl Options {
    /// Default options: info to stdout, console encoding, no stack traces
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output_level(mut self, level: impl Into<String>) -> Self {
        self.output_level = level.into();
        self
    }

    #[must_use]
    pub fn with_stack_trace_level(mut self, level: impl Into<String>) -> Self {
        self.stack_trace_level = level.into();
        self
    }

    #[must_use]
    pub fn with_output_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_json_encoding(mut self, json: bool) -> Self {
        self.json_encoding = json;
        self
    }

    #[must_use]
    pub fn with_caller_source_location(mut self, include: bool) -> Self {
        self.include_caller_source_location = include;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Resolve the output level name
    pub fn output_level(&self) -> Result<LogLevel> {
        LogLevel::parse_field("output_level", &self.output_level)
    }

    /// Resolve the stack trace level name
    pub fn stack_trace_level(&self) -> Result<LogLevel> {
        LogLevel::parse_field("stack_trace_level", &self.stack_trace_level)
    }
}
