//! crates/test-support/src/recording.rs
//! Sink that records the calls it receives.

use std::fmt;

use fields::{KeyValuer, Marshaler, Result};

/// One call received by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    /// `add_bool`.
    Bool(String, bool),
    /// `add_int`.
    Int(String, isize),
    /// `add_int64`.
    Int64(String, i64),
    /// `add_uint64`.
    Uint64(String, u64),
    /// `add_float64`.
    Float64(String, f64),
    /// `add_string`.
    String(String, String),
    /// `add_object`, with the value's `Debug` rendering.
    Object(String, String),
    /// `add_marshaler`, recorded before the marshaler runs.
    Marshaler(String),
    /// Entry into `nest`.
    NestStart(String),
    /// Exit from `nest`, recorded whether or not the callback failed.
    NestEnd(String),
}

/// [`KeyValuer`] that records calls instead of rendering them.
///
/// Unlike the text encoder, marshaler errors are returned unchanged. A failed
/// nest callback is returned wrapped as [`fields::Error::Nest`].
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    calls: Vec<Recorded>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[Recorded] {
        &self.calls
    }

    /// Consumes the recorder and returns its calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<Recorded> {
        self.calls
    }

    /// Returns the keys of every recorded call, in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(|call| match call {
                Recorded::Bool(key, _)
                | Recorded::Int(key, _)
                | Recorded::Int64(key, _)
                | Recorded::Uint64(key, _)
                | Recorded::Float64(key, _)
                | Recorded::String(key, _)
                | Recorded::Object(key, _)
                | Recorded::Marshaler(key)
                | Recorded::NestStart(key)
                | Recorded::NestEnd(key) => key.as_str(),
            })
            .collect()
    }
}

impl KeyValuer for RecordingSink {
    fn add_bool(&mut self, key: &str, value: bool) {
        self.calls.push(Recorded::Bool(key.to_owned(), value));
    }

    fn add_int(&mut self, key: &str, value: isize) {
        self.calls.push(Recorded::Int(key.to_owned(), value));
    }

    fn add_int64(&mut self, key: &str, value: i64) {
        self.calls.push(Recorded::Int64(key.to_owned(), value));
    }

    fn add_uint64(&mut self, key: &str, value: u64) {
        self.calls.push(Recorded::Uint64(key.to_owned(), value));
    }

    fn add_float64(&mut self, key: &str, value: f64) {
        self.calls.push(Recorded::Float64(key.to_owned(), value));
    }

    fn add_string(&mut self, key: &str, value: &str) {
        self.calls
            .push(Recorded::String(key.to_owned(), value.to_owned()));
    }

    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug) {
        self.calls
            .push(Recorded::Object(key.to_owned(), format!("{value:?}")));
    }

    fn add_marshaler(&mut self, key: &str, value: &dyn Marshaler) -> Result<()> {
        self.calls.push(Recorded::Marshaler(key.to_owned()));
        value.marshal_log(self)
    }

    fn nest(
        &mut self,
        key: &str,
        f: &mut dyn FnMut(&mut dyn KeyValuer) -> Result<()>,
    ) -> Result<()> {
        self.calls.push(Recorded::NestStart(key.to_owned()));
        let result = f(self);
        self.calls.push(Recorded::NestEnd(key.to_owned()));
        result.map_err(|err| err.in_nest(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fields::Error;

    #[test]
    fn nest_is_bracketed_even_on_failure() {
        let mut sink = RecordingSink::new();
        let result = sink.nest("n", &mut |kv| {
            kv.add_bool("inner", true);
            Err(Error::msg("stop"))
        });

        match result {
            Err(Error::Nest { key, source }) => {
                assert_eq!(key, "n");
                assert!(matches!(*source, Error::Marshal(_)));
            }
            other => panic!("expected a nest error, got {other:?}"),
        }
        assert_eq!(
            sink.calls(),
            [
                Recorded::NestStart("n".into()),
                Recorded::Bool("inner".into(), true),
                Recorded::NestEnd("n".into()),
            ]
        );
    }

    #[test]
    fn keys_follow_call_order() {
        let mut sink = RecordingSink::new();
        sink.add_int("a", 1);
        sink.add_object("b", &[1, 2]);
        assert_eq!(sink.keys(), ["a", "b"]);
        assert_eq!(sink.into_calls()[1], Recorded::Object("b".into(), "[1, 2]".into()));
    }
}
