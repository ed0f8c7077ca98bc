//! Tests for forwarding Logger calls into tracing subscribers.

#![cfg(feature = "tracing")]

use fields::{Field, Fields, Logger};
use logging::{Level, LoggerConfig, TracingLogger};
use test_support::MutexBuffer;

fn capture(max: tracing::Level, f: impl FnOnce()) -> String {
    let buffer = MutexBuffer::new();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(max)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn info_event_carries_message_and_rendered_fields() {
    let log = TracingLogger::new(&LoggerConfig::default())
        .with(Fields::from(Field::string("service", "api")));

    let output = capture(tracing::Level::DEBUG, || {
        log.info("served", Fields::from(Field::int("status", 200)));
    });

    assert!(output.contains("INFO"));
    assert!(output.contains("kvlog"));
    assert!(output.contains("served"));
    assert!(output.contains("fields=service: \"api\" status: 200"));
}

#[test]
fn debug_is_gated_by_logger_level() {
    let info_only = TracingLogger::new(&LoggerConfig::default());
    assert!(!info_only.is_debug());

    let output = capture(tracing::Level::DEBUG, || {
        info_only.debug("hidden", Fields::new());
    });
    assert!(output.is_empty());

    let verbose = TracingLogger::new(&LoggerConfig::default().with_level(Level::Debug));
    let output = capture(tracing::Level::DEBUG, || {
        verbose.debug("shown", Fields::new());
    });
    assert!(output.contains("shown"));
}

#[test]
fn subscriber_filter_still_applies() {
    let verbose = TracingLogger::new(&LoggerConfig::default().with_level(Level::Debug));
    let output = capture(tracing::Level::INFO, || {
        verbose.debug("filtered", Fields::new());
    });
    assert!(!output.contains("filtered"));
}
