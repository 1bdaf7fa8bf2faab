//! Core logger types and traits

pub mod appender;
pub mod encoder;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod sampling;
pub mod sugar;

pub use appender::Appender;
pub use encoder::{Encoder, EncoderConfig, Encoding};
pub use error::{LoggerError, Result};
pub use log_context::{Field, FieldValue, LogContext, Value};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerConfig};
pub use metrics::LoggerMetrics;
pub use options::Options;
pub use sampling::{LogSampler, SamplingConfig};
pub use sugar::SugaredLogger;
