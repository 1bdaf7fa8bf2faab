//! Redirection of external logging entry points
//!
//! Libraries log through process-wide facades of their own: the `log` crate
//! for general-purpose code and `tracing` for the RPC stacks. A [`Redirect`]
//! points one of those entry points at a [`Logger`], so their records reach
//! the same destinations, encoding and thresholds as direct calls.
//!
//! Each bridge is installed into its facade once per process. Later
//! redirects only swap the logger the bridge forwards to.

pub mod std_log;
pub mod tracing_bridge;

pub use std_log::StdLogRedirect;
pub use tracing_bridge::TracingRedirect;

use crate::core::{Caller, Logger};

/// An external entry point that can be pointed at a logger
pub trait Redirect: Send + Sync {
    /// Route the entry point's records to `logger` from now on
    fn redirect(&self, logger: &Logger);

    fn name(&self) -> &str;
}

/// The `log` and `tracing` redirects
pub fn default_redirects() -> Vec<Box<dyn Redirect>> {
    vec![Box::new(StdLogRedirect::new()), Box::new(TracingRedirect::new())]
}

/// Call site reported by a foreign record, if the logger wants one
fn foreign_caller(logger: &Logger, file: Option<&str>, line: Option<u32>) -> Option<Caller> {
    if !logger.records_caller() {
        return None;
    }
    match (file, line) {
        (Some(file), Some(line)) => Some(Caller::new(file, line)),
        _ => None,
    }
}
