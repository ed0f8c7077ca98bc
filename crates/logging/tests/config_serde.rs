//! Serialization tests for logger configuration.

#![cfg(feature = "serde")]

use logging::{Level, LoggerConfig, Timestamp};

#[test]
fn config_round_trips_through_json() {
    let config = LoggerConfig::from_verbose_level(2).with_assignment("=");
    let json = serde_json::to_string(&config).expect("serialize");
    let back: LoggerConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn missing_keys_use_defaults() {
    let config: LoggerConfig = serde_json::from_str(r#"{"level":"debug"}"#).expect("deserialize");
    assert_eq!(config.level, Level::Debug);
    assert_eq!(config.separator, " ");
    assert_eq!(config.assignment, ": ");
}

#[test]
fn levels_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Level::Off).expect("serialize"), "\"off\"");
    assert!(serde_json::from_str::<Level>("\"verbose\"").is_err());
}

#[test]
fn timestamp_style_is_snake_case() {
    let config: LoggerConfig =
        serde_json::from_str(r#"{"timestamp":"date_time"}"#).expect("deserialize");
    assert_eq!(config.timestamp, Timestamp::DateTime);
    assert_eq!(LoggerConfig::default().timestamp, Timestamp::Off);
}
