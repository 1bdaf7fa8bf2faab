//! Leveled logger, its configuration and builder

use super::{
    appender::Appender,
    encoder::{Encoder, EncoderConfig, Encoding},
    error::Result,
    log_context::{Field, LogContext},
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    options::Options,
    sampling::{LogSampler, SamplingConfig},
    sugar::SugaredLogger,
};
use crate::appenders;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Everything needed to construct a [`Logger`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    /// Output severity threshold
    pub level: LogLevel,

    /// Records at or above this level carry a stack trace; `None` disables capture
    pub stack_trace_level: LogLevel,

    pub encoding: Encoding,
    pub encoder: EncoderConfig,

    /// Burst control; `None` keeps every record
    pub sampling: Option<SamplingConfig>,

    pub output_paths: Vec<String>,

    /// Where the logger reports its own failures
    pub error_output_paths: Vec<String>,

    pub include_caller: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            stack_trace_level: LogLevel::None,
            encoding: Encoding::Console,
            encoder: EncoderConfig::default(),
            sampling: Some(SamplingConfig::default()),
            output_paths: vec!["stdout".to_string()],
            error_output_paths: vec!["stderr".to_string()],
            include_caller: false,
        }
    }
}

impl LoggerConfig {
    /// Derive a logger configuration from declarative options
    ///
    /// Both level names are resolved here; the output level is checked first.
    /// Internal errors always go to stderr.
    pub fn from_options(options: &Options) -> Result<Self> {
        let level = options.output_level()?;
        let stack_trace_level = options.stack_trace_level()?;
        Ok(Self {
            level,
            stack_trace_level,
            encoding: if options.json_encoding {
                Encoding::Json
            } else {
                Encoding::Console
            },
            encoder: EncoderConfig::default(),
            sampling: Some(options.sampling.clone()),
            output_paths: options.output_paths.clone(),
            error_output_paths: vec!["stderr".to_string()],
            include_caller: options.include_caller_source_location,
        })
    }

    /// Open the destinations and construct the logger
    pub fn build(&self) -> Result<Logger> {
        LoggerBuilder::from_config(self.clone()).build()
    }
}

struct Core {
    config: LoggerConfig,
    encoder: Encoder,
    sampler: Option<LogSampler>,
    outputs: Mutex<Vec<Box<dyn Appender>>>,
    error_outputs: Mutex<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Core {
    /// Write an encoded record to every output with per-appender panic isolation
    ///
    /// One failing appender never prevents the others from receiving the record.
    fn write(&self, encoded: &[u8]) {
        let mut failures = Vec::new();
        {
            let mut outputs = self.outputs.lock();
            for appender in outputs.iter_mut() {
                let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    appender.write(encoded)
                }));

                match append_result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        failures.push(format!("write error on {}: {}", appender.name(), e));
                    }
                    Err(panic_info) => {
                        failures.push(format!(
                            "appender {} panicked: {}",
                            appender.name(),
                            panic_message(panic_info.as_ref())
                        ));
                    }
                }
            }
        }

        if failures.is_empty() {
            self.metrics.record_logged();
        } else {
            self.metrics.record_dropped();
            for failure in failures {
                self.report(&failure);
            }
        }
    }

    /// Report an internal failure on the error outputs, ignoring their own errors
    fn report(&self, message: &str) {
        let line = format!(
            "{} {}\n",
            chrono::Utc::now().format(super::encoder::TIME_FORMAT),
            message
        );
        let mut error_outputs = self.error_outputs.lock();
        for appender in error_outputs.iter_mut() {
            let _ = appender.write(line.as_bytes());
            let _ = appender.flush();
        }
    }

    fn sync(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self
            .outputs
            .lock()
            .iter_mut()
            .chain(self.error_outputs.lock().iter_mut())
        {
            if let Err(e) = appender.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// A leveled structured logger
///
/// Cloning is cheap; clones and child loggers share destinations, sampler
/// and metrics with the logger they came from.
#[derive(Clone)]
pub struct Logger {
    core: Option<Arc<Core>>,
    name: Option<String>,
    context: Arc<LogContext>,
}

impl Logger {
    /// A logger that discards everything and reports every level disabled
    #[must_use]
    pub fn noop() -> Self {
        Self {
            core: None,
            name: None,
            context: Arc::new(LogContext::new()),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn is_noop(&self) -> bool {
        self.core.is_none()
    }

    /// Output threshold (`None` for the no-op logger)
    pub fn level(&self) -> LogLevel {
        self.core
            .as_ref()
            .map_or(LogLevel::None, |core| core.config.level)
    }

    /// Configuration this logger was built from
    pub fn config(&self) -> Option<&LoggerConfig> {
        self.core.as_ref().map(|core| &core.config)
    }

    pub fn metrics(&self) -> Option<&LoggerMetrics> {
        self.core.as_ref().map(|core| &core.metrics)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields prepended to every record of this logger
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.core
            .as_ref()
            .is_some_and(|core| core.config.level.admits(level))
    }

    /// Child logger carrying `fields` on every record
    ///
    /// The parent and its other children are not affected.
    #[must_use]
    pub fn with(&self, fields: &[Field<'_>]) -> Logger {
        if fields.is_empty() || self.is_noop() {
            return self.clone();
        }
        let mut context = (*self.context).clone();
        context.extend_fields(fields);
        Logger {
            core: self.core.clone(),
            name: self.name.clone(),
            context: Arc::new(context),
        }
    }

    /// Child logger carrying already-materialized fields
    pub(crate) fn with_context(&self, extra: &LogContext) -> Logger {
        if extra.is_empty() || self.is_noop() {
            return self.clone();
        }
        Logger {
            core: self.core.clone(),
            name: self.name.clone(),
            context: Arc::new(self.context.merged(extra)),
        }
    }

    /// Child logger whose name is this logger's name joined with `name`
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        let name = match &self.name {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        };
        Logger {
            core: self.core.clone(),
            name: (!name.is_empty()).then_some(name),
            context: Arc::clone(&self.context),
        }
    }

    /// Formatted and keyed call shapes over this logger
    #[must_use]
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(self.clone())
    }

    /// Emit a structured record
    ///
    /// Fields are only copied out of the call site once the level check and
    /// the sampler both let the record through.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field<'_>]) {
        let Some(core) = self.admit(level, message) else {
            return;
        };
        let caller = self.caller_at(Location::caller());
        self.emit(core, level, message, LogContext::from_fields(fields), caller, None);
    }

    /// Whether records carry the call site
    pub(crate) fn records_caller(&self) -> bool {
        self.core
            .as_ref()
            .is_some_and(|core| core.config.include_caller)
    }

    /// The caller to attach, if this logger records call sites
    pub(crate) fn caller_at(&self, location: &Location<'_>) -> Option<Caller> {
        self.core
            .as_ref()
            .filter(|core| core.config.include_caller)
            .map(|_| Caller::from_location(location))
    }

    /// Emit an already-materialized record
    ///
    /// `name` overrides the logger name for this record only.
    pub(crate) fn dispatch(
        &self,
        level: LogLevel,
        message: &str,
        context: LogContext,
        caller: Option<Caller>,
        name: Option<&str>,
    ) {
        if let Some(core) = self.admit(level, message) {
            self.emit(core, level, message, context, caller, name);
        }
    }

    /// Level check and sampling decision; the core to write through if both pass
    fn admit(&self, level: LogLevel, message: &str) -> Option<&Core> {
        let core = self.core.as_deref()?;
        if !core.config.level.admits(level) {
            return None;
        }
        if let Some(ref sampler) = core.sampler {
            if !sampler.should_sample(level, message) {
                core.metrics.record_sampled_out();
                return None;
            }
        }
        Some(core)
    }

    fn emit(
        &self,
        core: &Core,
        level: LogLevel,
        message: &str,
        context: LogContext,
        caller: Option<Caller>,
        name: Option<&str>,
    ) {
        let context = if self.context.is_empty() {
            context
        } else {
            self.context.merged(&context)
        };

        let mut entry = LogEntry::new(level, message)
            .with_name(name.or(self.name.as_deref()))
            .with_context(context);

        if core.config.include_caller {
            if let Some(caller) = caller {
                entry = entry.with_caller(caller);
            }
        }

        if core.config.stack_trace_level.admits(level) {
            entry = entry.with_stack(Backtrace::force_capture().to_string());
        }

        let encoded = core.encoder.encode(&entry);
        core.write(encoded.as_bytes());
    }

    /// Report a problem with a call on the error outputs
    pub(crate) fn report(&self, message: &str) {
        if let Some(core) = self.core.as_ref() {
            core.report(message);
        }
    }

    /// Flush every destination
    ///
    /// Blocks until buffered records are handed to the OS. Call before exit.
    pub fn sync(&self) -> Result<()> {
        match self.core.as_ref() {
            Some(core) => core.sync(),
            None => Ok(()),
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field<'_>]) {
        self.log(LogLevel::Error, message, fields);
    }

    #[inline]
    pub fn debug_enabled(&self) -> bool {
        self.enabled(LogLevel::Debug)
    }

    #[inline]
    pub fn info_enabled(&self) -> bool {
        self.enabled(LogLevel::Info)
    }

    #[inline]
    pub fn warn_enabled(&self) -> bool {
        self.enabled(LogLevel::Warn)
    }

    #[inline]
    pub fn error_enabled(&self) -> bool {
        self.enabled(LogLevel::Error)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("name", &self.name)
            .field("context", &self.context)
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .encoding(Encoding::Json)
///     .output_paths(["stderr"])
///     .build()
///     .expect("standard streams always open");
/// assert!(logger.debug_enabled());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appenders: Vec<Box<dyn Appender>>,
    error_appenders: Option<Vec<Box<dyn Appender>>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            appenders: Vec::new(),
            error_appenders: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_trace_level(mut self, level: LogLevel) -> Self {
        self.config.stack_trace_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sampling(mut self, sampling: Option<SamplingConfig>) -> Self {
        self.config.sampling = sampling;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn include_caller(mut self, include: bool) -> Self {
        self.config.include_caller = include;
        self
    }

    /// Replace the named output destinations
    #[must_use = "builder methods return a new value"]
    pub fn output_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.output_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Add an output appender next to the named destinations
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Report internal failures to `appender` instead of the error output paths
    #[must_use = "builder methods return a new value"]
    pub fn error_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.error_appenders
            .get_or_insert_with(Vec::new)
            .push(Box::new(appender));
        self
    }

    /// Build the Logger
    ///
    /// Fails if the sampling policy is invalid or a destination cannot be opened.
    pub fn build(self) -> Result<Logger> {
        if let Some(ref sampling) = self.config.sampling {
            sampling.validate()?;
        }

        let mut outputs = appenders::open_all(&self.config.output_paths)?;
        outputs.extend(self.appenders);

        let error_outputs = match self.error_appenders {
            Some(error_appenders) => error_appenders,
            None => appenders::open_all(&self.config.error_output_paths)?,
        };

        let encoder = Encoder::new(self.config.encoding, self.config.encoder.clone());
        let sampler = self.config.sampling.clone().map(LogSampler::new);

        Ok(Logger {
            core: Some(Arc::new(Core {
                config: self.config,
                encoder,
                sampler,
                outputs: Mutex::new(outputs),
                error_outputs: Mutex::new(error_outputs),
                metrics: LoggerMetrics::new(),
            })),
            name: None,
            context: Arc::new(LogContext::new()),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
