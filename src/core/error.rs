//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A severity option did not match the level vocabulary
    #[error("invalid {field} '{value}': expected one of debug, info, warn, error, none")]
    InvalidLevelName { field: &'static str, value: String },

    /// An output or error destination could not be opened
    #[error("failed to open log destination '{path}': {source}")]
    DestinationOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The logger could not be assembled from its configuration
    #[error("failed to build logger: {message}")]
    EncoderBuild { message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid level name error
    pub fn invalid_level(field: &'static str, value: impl Into<String>) -> Self {
        LoggerError::InvalidLevelName {
            field,
            value: value.into(),
        }
    }

    /// Create a destination open error
    pub fn destination_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::DestinationOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an encoder build error
    pub fn encoder_build(message: impl Into<String>) -> Self {
        LoggerError::EncoderBuild {
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
