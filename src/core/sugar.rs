//! Formatted and keyed call shapes
//!
//! `SugaredLogger` trades a little speed for convenience. The formatted shape
//! renders a `format_args!` template and the keyed shape takes alternating
//! keys and values. The concatenated shape joins its arguments into the
//! message, with a space between two neighbours only when neither is a
//! string. Every shape checks the level before doing any work.

use super::log_context::{LogContext, Value};
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt;
use std::panic::Location;

pub(crate) const DANGLING_KEY_MSG: &str = "Ignored key without a value.";
pub(crate) const NON_STRING_KEY_MSG: &str = "Ignored key-value pairs with non-string keys.";

/// Convenience wrapper derived from a [`Logger`]
#[derive(Debug, Clone, Default)]
pub struct SugaredLogger {
    base: Logger,
}

impl SugaredLogger {
    pub fn new(base: Logger) -> Self {
        Self { base }
    }

    /// The structured logger underneath
    pub fn desugar(&self) -> &Logger {
        &self.base
    }

    /// Child logger carrying alternating keys and values on every record
    #[must_use]
    pub fn with(&self, keys_and_values: &[Value<'_>]) -> SugaredLogger {
        if keys_and_values.is_empty() || self.base.is_noop() {
            return self.clone();
        }
        let sweetened = sweeten(keys_and_values);
        self.report_problems(&sweetened, None);
        let child = self.base.with_context(&sweetened.context);
        SugaredLogger { base: child }
    }

    /// Emit a record whose message is rendered from a template
    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.base.enabled(level) {
            return;
        }
        let caller = self.base.caller_at(Location::caller());
        let message = match args.as_str() {
            Some(literal) => literal.to_owned(),
            None => fmt::format(args),
        };
        self.base
            .dispatch(level, &message, LogContext::new(), caller, None);
    }

    /// Emit a record with alternating key/value arguments
    ///
    /// A trailing key without a value, or a pair whose key is not a string,
    /// is dropped from the record and reported in a separate error record.
    #[track_caller]
    pub fn logw(&self, level: LogLevel, message: &str, keys_and_values: &[Value<'_>]) {
        if !self.base.enabled(level) {
            return;
        }
        let caller = self.base.caller_at(Location::caller());
        let sweetened = sweeten(keys_and_values);
        self.report_problems(&sweetened, caller.clone());
        self.base
            .dispatch(level, message, sweetened.context, caller, None);
    }

    /// Emit a record whose message is its arguments joined together
    #[track_caller]
    pub fn loga(&self, level: LogLevel, args: &[Value<'_>]) {
        if !self.base.enabled(level) {
            return;
        }
        let caller = self.base.caller_at(Location::caller());
        let message = concat_values(args);
        self.base
            .dispatch(level, &message, LogContext::new(), caller, None);
    }

    fn report_problems(&self, sweetened: &Sweetened, caller: Option<super::Caller>) {
        if let Some(ref ignored) = sweetened.dangling {
            self.base.dispatch(
                LogLevel::Error,
                DANGLING_KEY_MSG,
                LogContext::new().with_field("ignored", ignored.clone()),
                caller.clone(),
                None,
            );
        }
        if !sweetened.invalid.is_empty() {
            self.base.dispatch(
                LogLevel::Error,
                NON_STRING_KEY_MSG,
                LogContext::new().with_field("invalid", sweetened.invalid.join(", ")),
                caller,
                None,
            );
        }
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn debuga(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn infoa(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warna(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn errora(&self, args: &[Value<'_>]) {
        self.loga(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn debugw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Debug, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn infow(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Info, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn warnw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Warn, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn errorw(&self, message: &str, keys_and_values: &[Value<'_>]) {
        self.logw(LogLevel::Error, message, keys_and_values);
    }
}

fn concat_values(args: &[Value<'_>]) -> String {
    let mut message = String::new();
    let mut prev_is_str = true;
    for (i, arg) in args.iter().enumerate() {
        let is_str = matches!(arg, Value::Str(_));
        if i > 0 && !is_str && !prev_is_str {
            message.push(' ');
        }
        message.push_str(&arg.to_field_value().to_string());
        prev_is_str = is_str;
    }
    message
}

/// Keyed arguments split into fields and problems
#[derive(Debug, Default)]
struct Sweetened {
    context: LogContext,
    dangling: Option<super::FieldValue>,
    invalid: Vec<String>,
}

fn sweeten(args: &[Value<'_>]) -> Sweetened {
    let mut out = Sweetened::default();
    for (pair_index, pair) in args.chunks(2).enumerate() {
        match pair {
            [key, value] => match key.as_key() {
                Some(key) => out.context.add_field(key, value.to_field_value()),
                None => out
                    .invalid
                    .push(format!("#{} {:?}={:?}", pair_index * 2, key, value)),
            },
            [key] => out.dangling = Some(key.to_field_value()),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Encoding, FieldValue};
    use crate::test_support::SharedBuffer;

    fn sugared(level: LogLevel, buffer: &SharedBuffer) -> SugaredLogger {
        Logger::builder()
            .min_level(level)
            .encoding(Encoding::Json)
            .output_paths(Vec::<String>::new())
            .appender(buffer.clone())
            .build()
            .expect("in-memory logger builds")
            .sugar()
    }

    #[test]
    fn test_sweeten_pairs() {
        let sweetened = sweeten(&["user".into(), "ada".into(), "retries".into(), 3i64.into()]);
        assert_eq!(
            sweetened.context.get("user"),
            Some(&FieldValue::String("ada".into()))
        );
        assert_eq!(sweetened.context.get("retries"), Some(&FieldValue::Int(3)));
        assert!(sweetened.dangling.is_none());
        assert!(sweetened.invalid.is_empty());
    }

    #[test]
    fn test_sweeten_problems() {
        let sweetened = sweeten(&[42i64.into(), true.into(), "ok".into(), 1i64.into(), "dangling".into()]);
        assert_eq!(sweetened.context.len(), 1);
        assert_eq!(sweetened.invalid, vec!["#0 42=true".to_string()]);
        assert_eq!(
            sweetened.dangling,
            Some(FieldValue::String("dangling".into()))
        );
    }

    #[test]
    fn test_concat_spaces_only_between_non_strings() {
        assert_eq!(concat_values(&[]), "");
        assert_eq!(concat_values(&["a".into(), "b".into()]), "ab");
        assert_eq!(concat_values(&[1i64.into(), 2i64.into()]), "1 2");
        assert_eq!(
            concat_values(&["count".into(), 3i64.into(), 4i64.into(), "done".into()]),
            "count3 4done"
        );
        assert_eq!(concat_values(&[true.into(), "x".into(), 1.5f64.into()]), "truex1.5");
    }

    #[test]
    fn test_concatenated_shape() {
        let buffer = SharedBuffer::new();
        let sugar = sugared(LogLevel::Warn, &buffer);

        sugar.infoa(&["hidden ".into(), 1i64.into()]);
        sugar.warna(&["retry ".into(), 2u64.into(), 5u64.into()]);
        sugar.errora(&["giving up".into()]);

        let records = buffer.json_lines();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["level"], "warn");
        assert_eq!(records[0]["msg"], "retry 2 5");
        assert_eq!(records[1]["msg"], "giving up");
    }

    #[test]
    fn test_formatted_shape() {
        let buffer = SharedBuffer::new();
        let sugar = sugared(LogLevel::Info, &buffer);

        sugar.infof(format_args!("served {} requests in {}ms", 12, 40));
        sugar.debugf(format_args!("hidden {}", 1));

        let records = buffer.json_lines();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "served 12 requests in 40ms");
    }

    #[test]
    fn test_keyed_shape() {
        let buffer = SharedBuffer::new();
        let sugar = sugared(LogLevel::Info, &buffer);

        sugar.warnw("slow query", &["table".into(), "users".into(), "rows".into(), 1200u64.into()]);

        let record = &buffer.json_lines()[0];
        assert_eq!(record["level"], "warn");
        assert_eq!(record["table"], "users");
        assert_eq!(record["rows"], 1200);
    }

    #[test]
    fn test_keyed_shape_reports_dangling_key() {
        let buffer = SharedBuffer::new();
        let sugar = sugared(LogLevel::Info, &buffer);

        sugar.infow("odd arguments", &["a".into(), 1i64.into(), "b".into()]);

        let records = buffer.json_lines();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["level"], "error");
        assert_eq!(records[0]["msg"], DANGLING_KEY_MSG);
        assert_eq!(records[0]["ignored"], "b");
        assert_eq!(records[1]["a"], 1);
        assert!(records[1].get("b").is_none());
    }

    #[test]
    fn test_keyed_child() {
        let buffer = SharedBuffer::new();
        let sugar = sugared(LogLevel::Info, &buffer);
        let child = sugar.with(&["tenant".into(), "acme".into()]);

        child.infow("created", &["id".into(), 7i64.into()]);
        sugar.infow("plain", &[]);

        let records = buffer.json_lines();
        assert_eq!(records[0]["tenant"], "acme");
        assert_eq!(records[0]["id"], 7);
        assert!(records[1].get("tenant").is_none());
    }
}
