//! Record encodings
//!
//! Two encodings share one set of field keys:
//! - Console: tab-separated, human-readable, structured fields as a JSON object
//! - Json: one JSON object per line
//!
//! Caller fields never replace the record's own keys: a field named like one
//! of them is written under `fields.<name>` instead.
//!
//! Example console line:
//! `2025-01-08T10:30:45.123Z	info	core/server.rs:42	request served	{"status":200}`

use super::log_entry::LogEntry;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by both encodings (ISO 8601, UTC, milliseconds)
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Output encoding family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Human-readable console form (default)
    #[default]
    Console,

    /// Machine-readable JSON objects
    Json,
}

/// Prefix given to caller fields whose name collides with a record key
pub const COLLISION_PREFIX: &str = "fields.";

/// Field key names shared by both encodings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
}

impl EncoderConfig {
    /// Whether `key` is one of the record's own keys
    pub fn is_reserved(&self, key: &str) -> bool {
        [
            &self.time_key,
            &self.level_key,
            &self.name_key,
            &self.caller_key,
            &self.message_key,
            &self.stacktrace_key,
        ]
        .iter()
        .any(|reserved| reserved.as_str() == key)
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "time".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stack".to_string(),
            line_ending: "\n".to_string(),
        }
    }
}

/// Turns records into bytes for the output destinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Encode a record, including the trailing line ending
    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut out = match self.encoding {
            Encoding::Console => self.encode_console(entry),
            Encoding::Json => self.encode_json(entry),
        };
        out.push_str(&self.config.line_ending);
        out
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut parts = Vec::with_capacity(6);
        parts.push(entry.timestamp.format(TIME_FORMAT).to_string());
        parts.push(entry.level.to_str().to_string());
        if let Some(ref name) = entry.logger_name {
            parts.push(name.clone());
        }
        if let Some(ref caller) = entry.caller {
            parts.push(caller.short());
        }
        parts.push(escape_line(&entry.message));

        if !entry.context.is_empty() {
            let mut fields = serde_json::Map::new();
            entry.context.write_json(&mut fields);
            parts.push(serde_json::Value::Object(fields).to_string());
        }

        let mut line = parts.join("\t");

        // Stack traces go on the following lines
        if let Some(ref stack) = entry.stack {
            line.push_str(&self.config.line_ending);
            line.push_str(stack.trim_end());
        }

        line
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            self.config.level_key.clone(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            self.config.time_key.clone(),
            serde_json::Value::String(entry.timestamp.format(TIME_FORMAT).to_string()),
        );
        if let Some(ref name) = entry.logger_name {
            json_obj.insert(
                self.config.name_key.clone(),
                serde_json::Value::String(name.clone()),
            );
        }
        if let Some(ref caller) = entry.caller {
            json_obj.insert(
                self.config.caller_key.clone(),
                serde_json::Value::String(caller.short()),
            );
        }
        json_obj.insert(
            self.config.message_key.clone(),
            serde_json::Value::String(entry.message.clone()),
        );

        for (key, value) in entry.context.iter() {
            let key = if self.config.is_reserved(key) {
                format!("{}{}", COLLISION_PREFIX, key)
            } else {
                key.to_owned()
            };
            json_obj.insert(key, value.to_json_value());
        }

        if let Some(ref stack) = entry.stack {
            json_obj.insert(
                self.config.stacktrace_key.clone(),
                serde_json::Value::String(stack.clone()),
            );
        }

        serde_json::Value::Object(json_obj).to_string()
    }
}

/// Escape line breaks and tabs so a console record stays on one line
fn escape_line(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Encoding::default(), EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Caller, LogContext, LogLevel};
    use chrono::TimeZone;

    fn fixed_entry() -> LogEntry {
        let mut entry = LogEntry::new(LogLevel::Warn, "disk almost full")
            .with_context(LogContext::new().with_field("used_pct", 93));
        entry.timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        entry
    }

    #[test]
    fn test_console_layout() {
        let encoder = Encoder::default();
        let line = encoder.encode(&fixed_entry());
        assert_eq!(
            line,
            "2025-01-08T10:30:45.123Z\twarn\tdisk almost full\t{\"used_pct\":93}\n"
        );
    }

    #[test]
    fn test_console_with_name_and_caller() {
        let entry = fixed_entry()
            .with_name(Some("storage"))
            .with_caller(Caller::new("src/storage/disk.rs", 88));
        let line = Encoder::default().encode(&entry);
        let parts: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(parts[2], "storage");
        assert_eq!(parts[3], "storage/disk.rs:88");
        assert_eq!(parts[4], "disk almost full");
    }

    #[test]
    fn test_console_stack_on_following_lines() {
        let entry = fixed_entry().with_stack("frame 0\nframe 1\n".to_string());
        let line = Encoder::default().encode(&entry);
        let lines: Vec<&str> = line.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "frame 0");
    }

    #[test]
    fn test_json_keys() {
        let encoder = Encoder::new(Encoding::Json, EncoderConfig::default());
        let line = encoder.encode(&fixed_entry());
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = parsed.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["level", "time", "msg", "used_pct"]);
        assert_eq!(object["level"], "warn");
        assert_eq!(object["time"], "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_json_optional_keys() {
        let entry = fixed_entry()
            .with_name(Some("storage"))
            .with_caller(Caller::new("src/main.rs", 1))
            .with_stack("frame 0".to_string());
        let line = Encoder::new(Encoding::Json, EncoderConfig::default()).encode(&entry);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["logger"], "storage");
        assert_eq!(parsed["caller"], "src/main.rs:1");
        assert_eq!(parsed["stack"], "frame 0");
    }

    #[test]
    fn test_console_escapes_line_breaks() {
        let entry = LogEntry::new(LogLevel::Info, "User login\nERROR fake entry\tinjected");
        let line = Encoder::default().encode(&entry);

        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("User login\\nERROR fake entry\\tinjected"));
    }

    #[test]
    fn test_json_message_round_trips() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nline two\tend");
        let line = Encoder::new(Encoding::Json, EncoderConfig::default()).encode(&entry);
        assert_eq!(line.lines().count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "line one\nline two\tend");
    }

    #[test]
    fn test_json_fields_cannot_replace_record_keys() {
        let entry = LogEntry::new(LogLevel::Info, "real message")
            .with_stack("frame 0".to_string())
            .with_context(
                LogContext::new()
                    .with_field("msg", "user value")
                    .with_field("level", "bogus")
                    .with_field("stack", "user stack")
                    .with_field("user", "ada"),
            );
        let line = Encoder::new(Encoding::Json, EncoderConfig::default()).encode(&entry);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["msg"], "real message");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["stack"], "frame 0");
        assert_eq!(parsed["fields.msg"], "user value");
        assert_eq!(parsed["fields.level"], "bogus");
        assert_eq!(parsed["fields.stack"], "user stack");
        assert_eq!(parsed["user"], "ada");
    }

    #[test]
    fn test_reserved_keys_follow_config() {
        let config = EncoderConfig {
            message_key: "message".to_string(),
            ..EncoderConfig::default()
        };
        assert!(config.is_reserved("message"));
        assert!(!config.is_reserved("msg"));
        assert!(config.is_reserved("stack"));
    }

    #[test]
    fn test_encoding_deserializes_lowercase() {
        let encoding: Encoding = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(encoding, Encoding::Json);
    }
}
