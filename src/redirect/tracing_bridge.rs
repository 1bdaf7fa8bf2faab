//! Bridge from the `tracing` global dispatcher
//!
//! Installs a registry with a single [`Layer`] that turns each event into a
//! record: the `message` field becomes the message, every other field becomes
//! a record field, and the event target becomes the logger name.

use super::{foreign_caller, Redirect};
use crate::core::{FieldValue, LogContext, LogLevel, Logger};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::{Arc, LazyLock, Once};
use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

static TARGET: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::noop()));
static INSTALL: Once = Once::new();

struct BridgeLayer;

impl<S> Layer<S> for BridgeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // The threshold changes on every redirect, so no callsite may be cached as
    // never-enabled.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        TARGET.load().enabled(metadata.level().into())
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let logger = TARGET.load();
        let metadata = event.metadata();
        let level = LogLevel::from(metadata.level());
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = foreign_caller(&logger, metadata.file(), metadata.line());
        logger.dispatch(
            level,
            visitor.message.as_deref().unwrap_or_default(),
            visitor.fields,
            caller,
            Some(metadata.target()),
        );
    }
}

/// Collects the message and the remaining fields of an event
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: LogContext,
}

impl EventVisitor {
    fn add(&mut self, field: &tracing::field::Field, value: impl Into<FieldValue>) {
        self.fields.add_field(field.name(), value);
    }
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.add(field, format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.add(field, value);
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.add(field, value);
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.add(field, value);
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.add(field, value);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.add(field, value);
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.add(field, value.to_string());
    }
}

/// Redirects `tracing::info!` and friends, as emitted by the RPC stacks
#[derive(Debug, Default)]
pub struct TracingRedirect;

impl TracingRedirect {
    pub fn new() -> Self {
        Self
    }

    fn install(logger: &Logger) {
        use tracing_subscriber::layer::SubscriberExt;

        INSTALL.call_once(|| {
            let subscriber = tracing_subscriber::registry().with(BridgeLayer);
            if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                logger.report(&format!("tracing redirect not installed: {}", e));
            }
        });
    }
}

impl Redirect for TracingRedirect {
    fn redirect(&self, logger: &Logger) {
        Self::install(logger);
        TARGET.store(Arc::new(logger.clone()));
    }

    fn name(&self) -> &str {
        "tracing"
    }
}
