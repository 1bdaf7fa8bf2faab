//! Formatting macros for the process-wide logger
//!
//! These expand to the formatted call shape of [`crate::facade`], so the
//! template is only rendered when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::{infof, warnf};
//!
//! let port = 8080;
//! infof!("listening on port {}", port);
//! warnf!("retry {} of {}", 3, 5);
//! ```

/// Log a formatted message at the given level through the process-wide logger.
///
/// ```
/// use rust_log_facade::{logf, LogLevel};
/// logf!(LogLevel::Error, "status code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($level:expr, $($arg:tt)+) => {
        $crate::facade::global().logf($level, format_args!($($arg)+))
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::logf!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log a formatted error-level message.
///
/// ```
/// use rust_log_facade::errorf;
/// let path = "/etc/app.toml";
/// errorf!("cannot read {}: {}", path, "permission denied");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::logf!($crate::LogLevel::Error, $($arg)+)
    };
}
