//! Process-wide logging facade
//!
//! A [`LogHandle`] owns the active logger. It starts out discarding
//! everything; [`LogHandle::configure`] builds a logger from [`Options`] and
//! swaps it in as a whole, so a concurrent caller observes either the old
//! logger or the new one and never a mix of the two. Emission goes through a
//! lock-free load of the current logger.
//!
//! Most programs use the process-wide handle through the free functions in
//! this module:
//!
//! ```no_run
//! use rust_log_facade::{facade, Field, Options};
//!
//! facade::configure(&Options::new().with_output_level("debug"))?;
//! facade::info("server started", &[Field::uint("port", 8080)]);
//! facade::sync()?;
//! # Ok::<(), rust_log_facade::LoggerError>(())
//! ```

use crate::core::{
    Field, LogLevel, Logger, LoggerConfig, Options, Result, SugaredLogger, Value,
};
use crate::redirect::{self, Redirect};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// The installed logger together with its derived convenience wrapper
struct ActiveLogger {
    logger: Logger,
    sugar: SugaredLogger,
}

impl ActiveLogger {
    fn new(logger: Logger) -> Self {
        let sugar = logger.sugar();
        Self { logger, sugar }
    }
}

/// Owner of an atomically replaceable logger
pub struct LogHandle {
    active: ArcSwap<ActiveLogger>,
    configure_lock: Mutex<()>,
    redirects: Vec<Box<dyn Redirect>>,
}

impl LogHandle {
    /// A handle that redirects the `log` and `tracing` entry points
    pub fn new() -> Self {
        Self::with_redirects(redirect::default_redirects())
    }

    /// A handle that repoints exactly `redirects` on every configure
    pub fn with_redirects(redirects: Vec<Box<dyn Redirect>>) -> Self {
        Self {
            active: ArcSwap::from_pointee(ActiveLogger::new(Logger::noop())),
            configure_lock: Mutex::new(()),
            redirects,
        }
    }

    /// Build a logger from `options` and make it the active logger
    ///
    /// On error the active logger is left exactly as it was.
    pub fn configure(&self, options: &Options) -> Result<()> {
        self.configure_with(options, LoggerConfig::build)
    }

    /// Like [`configure`](Self::configure), with a custom construction step
    pub fn configure_with<F>(&self, options: &Options, build: F) -> Result<()>
    where
        F: FnOnce(&LoggerConfig) -> Result<Logger>,
    {
        let config = LoggerConfig::from_options(options)?;

        let _guard = self.configure_lock.lock();
        if config.level == LogLevel::None {
            self.install(Logger::noop());
            return Ok(());
        }

        let logger = build(&config)?;
        self.install(logger);
        Ok(())
    }

    fn install(&self, logger: Logger) {
        let previous = self.active.swap(Arc::new(ActiveLogger::new(logger)));
        let current = self.active.load();
        for redirect in &self.redirects {
            redirect.redirect(&current.logger);
        }
        if let Err(e) = previous.logger.sync() {
            current
                .logger
                .report(&format!("failed to flush replaced logger: {}", e));
        }
    }

    /// Snapshot of the active logger
    pub fn logger(&self) -> Logger {
        self.active.load().logger.clone()
    }

    /// Snapshot of the active logger's formatted and keyed shapes
    pub fn sugar(&self) -> SugaredLogger {
        self.active.load().sugar.clone()
    }

    pub fn level(&self) -> LogLevel {
        self.active.load().logger.level()
    }

    /// Child of the active logger carrying `fields`
    ///
    /// The child keeps writing to the logger it was derived from, even after
    /// a later configure.
    pub fn with(&self, fields: &[Field<'_>]) -> Logger {
        self.active.load().logger.with(fields)
    }

    pub fn named(&self, name: &str) -> Logger {
        self.active.load().logger.named(name)
    }

    /// Flush the active logger's destinations
    pub fn sync(&self) -> Result<()> {
        self.active.load().logger.sync()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.active.load().logger.enabled(level)
    }

    pub fn debug_enabled(&self) -> bool {
        self.enabled(LogLevel::Debug)
    }

    pub fn info_enabled(&self) -> bool {
        self.enabled(LogLevel::Info)
    }

    pub fn warn_enabled(&self) -> bool {
        self.enabled(LogLevel::Warn)
    }

    pub fn error_enabled(&self) -> bool {
        self.enabled(LogLevel::Error)
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field<'_>]) {
        self.active.load().logger.log(level, message, fields);
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.active.load().sugar.logf(level, args);
    }

    #[track_caller]
    pub fn loga(&self, level: LogLevel, args: &[Value<'_>]) {
        self.active.load().sugar.loga(level, args);
    }

    #[track_caller]
    pub fn logw(&self, level: LogLevel, message: &str, keys_and_values: &[Value<'_>]) {
        self.active.load().sugar.logw(level, message, keys_and_values);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Error, message, fields);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn debuga(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infoa(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warna(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errora(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn debugw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Debug, message, keys_and_values);
    }

    #[track_caller]
    pub fn infow(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Info, message, keys_and_values);
    }

    #[track_caller]
    pub fn warnw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Warn, message, keys_and_values);
    }

    #[track_caller]
    pub fn errorw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Error, message, keys_and_values);
    }
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("logger", &self.active.load().logger)
            .field(
                "redirects",
                &self.redirects.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

static GLOBAL: LazyLock<LogHandle> = LazyLock::new(LogHandle::new);

/// The process-wide handle
pub fn global() -> &'static LogHandle {
    &GLOBAL
}

/// Configure the process-wide logger and redirect `log` and `tracing` to it
pub fn configure(options: &Options) -> Result<()> {
    global().configure(options)
}

pub fn logger() -> Logger {
    global().logger()
}

pub fn sugar() -> SugaredLogger {
    global().sugar()
}

pub fn with(fields: &[Field<'_>]) -> Logger {
    global().with(fields)
}

pub fn named(name: &str) -> Logger {
    global().named(name)
}

pub fn sync() -> Result<()> {
    global().sync()
}

pub fn debug_enabled() -> bool {
    global().debug_enabled()
}

pub fn info_enabled() -> bool {
    global().info_enabled()
}

pub fn warn_enabled() -> bool {
    global().warn_enabled()
}

pub fn error_enabled() -> bool {
    global().error_enabled()
}

#[track_caller]
pub fn debug(message: &str, fields: &[Field<'_>]) {
    global().debug(message, fields);
}

#[track_caller]
pub fn info(message: &str, fields: &[Field<'_>]) {
    global().info(message, fields);
}

#[track_caller]
pub fn warn(message: &str, fields: &[Field<'_>]) {
    global().warn(message, fields);
}

#[track_caller]
pub fn error(message: &str, fields: &[Field<'_>]) {
    global().error(message, fields);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    global().debugf(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    global().infof(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    global().warnf(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    global().errorf(args);
}

#[track_caller]
pub fn debuga(args: &[Value<'_>]) {
    global().debuga(args);
}

#[track_caller]
pub fn infoa(args: &[Value<'_>]) {
    global().infoa(args);
}

#[track_caller]
pub fn warna(args: &[Value<'_>]) {
    global().warna(args);
}

#[track_caller]
pub fn errora(args: &[Value<'_>]) {
    global().errora(args);
}

#[track_caller]
pub fn debugw(message: &str, keys_and_values: &[Value<'_>]) {
    global().debugw(message, keys_and_values);
}

#[track_caller]
pub fn infow(message: &str, keys_and_values: &[Value<'_>]) {
    global().infow(message, keys_and_values);
}

#[track_caller]
pub fn warnw(message: &str, keys_and_values: &[Value<'_>]) {
    global().warnw(message, keys_and_values);
}

#[track_caller]
pub fn errorw(message: &str, keys_and_values: &[Value<'_>]) {
    global().errorw(message, keys_and_values);
}
