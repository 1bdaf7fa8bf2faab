//! Bridge from the `log` crate facade

use super::{foreign_caller, Redirect};
use crate::core::{LogContext, LogLevel, Logger};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Once};

static TARGET: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::noop()));
static INSTALL: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// `log::Log` implementation forwarding to the current target logger
struct StdLogBridge;

impl log::Log for StdLogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        TARGET.load().enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = TARGET.load();
        let level = LogLevel::from(record.level());
        if !logger.enabled(level) {
            return;
        }

        let caller = foreign_caller(&logger, record.file(), record.line());
        let args = record.args();
        let rendered;
        let message = match args.as_str() {
            Some(literal) => literal,
            None => {
                rendered = args.to_string();
                rendered.as_str()
            }
        };
        logger.dispatch(level, message, LogContext::new(), caller, Some(record.target()));
    }

    fn flush(&self) {
        let _ = TARGET.load().sync();
    }
}

/// Redirects `log::info!` and friends
#[derive(Debug, Default)]
pub struct StdLogRedirect;

impl StdLogRedirect {
    pub fn new() -> Self {
        Self
    }

    /// Whether this process's `log` facade forwards to the bridge
    pub fn is_installed() -> bool {
        INSTALLED.load(Ordering::Acquire)
    }

    fn install(logger: &Logger) {
        INSTALL.call_once(|| match log::set_boxed_logger(Box::new(StdLogBridge)) {
            Ok(()) => INSTALLED.store(true, Ordering::Release),
            Err(e) => logger.report(&format!("log redirect not installed: {}", e)),
        });
    }
}

impl Redirect for StdLogRedirect {
    fn redirect(&self, logger: &Logger) {
        Self::install(logger);
        TARGET.store(Arc::new(logger.clone()));
        if Self::is_installed() {
            log::set_max_level(logger.level().into());
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
