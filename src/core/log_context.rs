//! Structured logging fields
//!
//! This module provides:
//! - `Field` / `Value`: borrowed, cheap-to-build fields passed at call sites
//! - `FieldValue`: the owned form a field takes once a record is emitted
//! - `LogContext`: an ordered list of owned fields attached to a record
//!
//! Call sites build `Field`s without allocating. They are only turned into
//! owned `FieldValue`s after the level check has passed, so a disabled call
//! never pays for formatting or copying its arguments.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Borrowed value of a structured field
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Rendered with `Display` only if the record is emitted
    Display(&'a dyn fmt::Display),
    Error(&'a dyn std::error::Error),
    Null,
}

impl Value<'_> {
    /// Copy the value into its owned form
    #[must_use]
    pub fn to_field_value(&self) -> FieldValue {
        match *self {
            Value::Str(s) => FieldValue::String(s.to_owned()),
            Value::Int(i) => FieldValue::Int(i),
            Value::Uint(u) => FieldValue::Uint(u),
            Value::Float(f) => FieldValue::Float(f),
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Duration(d) => FieldValue::Duration(d),
            Value::Display(d) => FieldValue::String(d.to_string()),
            Value::Error(e) => FieldValue::String(e.to_string()),
            Value::Null => FieldValue::Null,
        }
    }

    /// The string content, if this value can act as a key
    pub(crate) fn as_key(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(fl) => write!(f, "{fl}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Duration(d) => write!(f, "{d:?}"),
            Value::Display(d) => write!(f, "{d}"),
            Value::Error(e) => write!(f, "{e}"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Str(s.as_str())
    }
}

impl From<i64> for Value<'_> {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value<'_> {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value<'_> {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value<'_> {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<usize> for Value<'_> {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value<'_> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value<'_> {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

/// A typed key/value pair for the structured call shape
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    pub fn new(key: &'a str, value: impl Into<Value<'a>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn str(key: &'a str, value: &'a str) -> Self {
        Self::new(key, Value::Str(value))
    }

    pub fn int(key: &'a str, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: &'a str, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: &'a str, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: &'a str, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: &'a str, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn display(key: &'a str, value: &'a dyn fmt::Display) -> Self {
        Self::new(key, Value::Display(value))
    }

    /// An error rendered under the conventional `error` key
    pub fn error(value: &'a dyn std::error::Error) -> Self {
        Self::new("error", Value::Error(value))
    }
}

/// Owned value of a structured field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => f.write_str(&format_duration(*d)),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for encoding
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => serde_json::Value::String(format_duration(*d)),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

/// Human-readable duration, e.g. `1.5s`, `250ms`, `42µs`
pub fn format_duration(duration: Duration) -> String {
    format!("{:?}", duration)
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

/// Ordered structured fields of a record or a child logger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Materialize borrowed call-site fields
    pub fn from_fields(fields: &[Field<'_>]) -> Self {
        let mut ctx = Self {
            fields: Vec::with_capacity(fields.len()),
        };
        ctx.extend_fields(fields);
        ctx
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.push((key.into(), value.into()));
    }

    pub fn extend_fields(&mut self, fields: &[Field<'_>]) {
        self.fields.extend(
            fields
                .iter()
                .map(|field| (field.key.to_owned(), field.value.to_field_value())),
        );
    }

    /// A new context holding `self`'s fields followed by `other`'s
    #[must_use]
    pub fn merged(&self, other: &LogContext) -> LogContext {
        let mut fields = Vec::with_capacity(self.fields.len() + other.fields.len());
        fields.extend(self.fields.iter().cloned());
        fields.extend(other.fields.iter().cloned());
        LogContext { fields }
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Last value recorded under `key`
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Insert every field into a JSON object, later keys winning
    pub fn write_json(&self, object: &mut serde_json::Map<String, serde_json::Value>) {
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.to_json_value());
        }
    }
}
