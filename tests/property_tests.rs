//! Property-based tests for rust_log_facade using proptest

use proptest::prelude::*;
use rust_log_facade::prelude::*;
use rust_log_facade::{Encoder, EncoderConfig};

const VOCABULARY: [&str; 5] = ["debug", "info", "warn", "error", "none"];

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::None),
    ]
}

fn record_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Every level renders to a name that parses back to it
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(level.to_string(), level.to_str());
    }

    /// Anything outside the vocabulary is rejected, with the offending value preserved
    #[test]
    fn test_unknown_names_are_rejected(name in "\\PC{0,12}") {
        prop_assume!(!VOCABULARY.contains(&name.as_str()));
        match LogLevel::parse_field("output_level", &name) {
            Err(LoggerError::InvalidLevelName { field, value }) => {
                prop_assert_eq!(field, "output_level");
                prop_assert_eq!(value, name);
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    /// Changing the case of any letter makes a valid name invalid
    #[test]
    fn test_parsing_is_case_sensitive(index in 0usize..5, position in 0usize..5) {
        let name = VOCABULARY[index];
        let position = position % name.len();
        let mut altered = name.to_string();
        altered.replace_range(
            position..=position,
            &name[position..=position].to_ascii_uppercase(),
        );
        prop_assert!(altered.parse::<LogLevel>().is_err());
    }

    /// A threshold admits exactly the records at or above it, and `none` admits nothing
    #[test]
    fn test_threshold_admission(threshold in any_level(), record in record_level()) {
        let expected = threshold != LogLevel::None && record >= threshold;
        prop_assert_eq!(threshold.admits(record), expected);
    }

    /// Ordering follows the declared severity order
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }
}

// ============================================================================
// Options Tests
// ============================================================================

proptest! {
    /// The two thresholds resolve independently of each other
    #[test]
    fn test_options_levels_independent(output in 0usize..5, stack in 0usize..5) {
        let options = Options::new()
            .with_output_level(VOCABULARY[output])
            .with_stack_trace_level(VOCABULARY[stack]);
        prop_assert_eq!(options.output_level().unwrap().to_str(), VOCABULARY[output]);
        prop_assert_eq!(options.stack_trace_level().unwrap().to_str(), VOCABULARY[stack]);
    }

    /// Options survive a JSON round trip through serde unchanged
    #[test]
    fn test_options_serde_preserves_fields(
        output in 0usize..5,
        paths in prop::collection::vec("[a-z]{1,8}", 1..4),
        json in any::<bool>(),
        caller in any::<bool>(),
    ) {
        let options = Options::new()
            .with_output_level(VOCABULARY[output])
            .with_output_paths(paths)
            .with_json_encoding(json)
            .with_caller_source_location(caller);
        let text = serde_json::to_string(&options).unwrap();
        let back: Options = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, options);
    }
}

// ============================================================================
// Field Tests
// ============================================================================

proptest! {
    /// Structured fields keep insertion order and last-wins lookup
    #[test]
    fn test_context_preserves_order(
        keys in prop::collection::vec("[a-z]{1,6}", 1..10),
    ) {
        let mut context = LogContext::new();
        for (i, key) in keys.iter().enumerate() {
            context.add_field(key.clone(), i as i64);
        }
        let collected: Vec<&str> = context.iter().map(|(k, _)| k).collect();
        let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(collected, expected);

        let last = keys.len() - 1;
        prop_assert_eq!(
            context.get(&keys[last]),
            Some(&FieldValue::Int(last as i64))
        );
    }

    /// Messages with line breaks stay on one console line and round-trip through JSON
    #[test]
    fn test_record_is_one_line(message in "\\PC*[\\n\\r\\t]\\PC*") {
        let entry = LogEntry::new(LogLevel::Info, &message);

        let console = Encoder::new(Encoding::Console, EncoderConfig::default()).encode(&entry);
        prop_assert_eq!(console.matches('\n').count(), 1);
        prop_assert!(!console.contains('\r'));

        let json = Encoder::new(Encoding::Json, EncoderConfig::default()).encode(&entry);
        prop_assert_eq!(json.matches('\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed["msg"].as_str(), Some(message.as_str()));
    }
}
