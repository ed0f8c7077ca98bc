//! crates/fields/src/field/constructors.rs
//! Typed constructors for [`Field`].

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::{Field, Value};
use crate::KEY_NAME_ERROR;
use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::key_valuer::{Marshaler, TextMarshaler};

const NIL_ERROR: &str = "<nil>";

impl Field {
    /// Constructs a boolean field.
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::from_parts(key, Value::Bool(value))
    }

    /// Constructs a pointer-sized signed integer field.
    pub fn int(key: impl Into<String>, value: isize) -> Self {
        Self::from_parts(key, Value::Int(value))
    }

    /// Constructs a 64-bit signed integer field.
    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::from_parts(key, Value::Int64(value))
    }

    /// Constructs an unsigned integer field of kind `Uint64`.
    pub fn uint(key: impl Into<String>, value: usize) -> Self {
        Self::from_parts(key, Value::Uint64(value as u64))
    }

    /// Constructs a 64-bit unsigned integer field. The full range is kept.
    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::from_parts(key, Value::Uint64(value))
    }

    /// Constructs a 64-bit float field.
    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::from_parts(key, Value::Float64(value))
    }

    /// Constructs a string field.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_parts(key, Value::String(value.into()))
    }

    /// Constructs a field holding several integers, joined with `", "` when
    /// encoded.
    pub fn ints(key: impl Into<String>, values: impl Into<Vec<isize>>) -> Self {
        let values: Vec<isize> = values.into();
        Self::from_parts(key, Value::Ints(values.into()))
    }

    /// Constructs a field holding several 64-bit integers, joined with `", "`
    /// when encoded.
    pub fn int64s(key: impl Into<String>, values: impl Into<Vec<i64>>) -> Self {
        let values: Vec<i64> = values.into();
        Self::from_parts(key, Value::Int64s(values.into()))
    }

    /// Constructs a field holding several strings, joined with `", "` when
    /// encoded.
    pub fn strings<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        Self::from_parts(key, Value::Strings(values.into()))
    }

    /// Constructs a field rendered through the value's `Display`
    /// implementation at encode time.
    pub fn stringer<T>(key: impl Into<String>, value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::from_parts(key, Value::Stringer(Arc::new(value)))
    }

    /// Constructs a field rendered through the value's `Debug`
    /// implementation at encode time and passed on as a string.
    pub fn go_stringer<T>(key: impl Into<String>, value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self::from_parts(key, Value::GoStringer(Arc::new(value)))
    }

    /// Constructs a field whose value is handed to the sink's generic
    /// [`add_object`](crate::KeyValuer::add_object) method.
    ///
    /// This is the slowest path; prefer [`Field::marshal`] for types that are
    /// logged often.
    pub fn object<T>(key: impl Into<String>, value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self::from_parts(key, Value::Object(Arc::new(value)))
    }

    /// Constructs a string field holding only the type name of `value`.
    pub fn object_type_of<T>(key: impl Into<String>, _value: &T) -> Self
    where
        T: ?Sized,
    {
        Self::from_parts(key, Value::ObjectTypeOf(std::any::type_name::<T>()))
    }

    /// Constructs a field that lets `value` describe itself into the sink.
    pub fn marshal<M>(key: impl Into<String>, value: M) -> Self
    where
        M: Marshaler + Send + Sync + 'static,
    {
        Self::from_parts(key, Value::Marshaler(Arc::new(value)))
    }

    /// Constructs a namespace holding `fields` under `key`.
    ///
    /// Encoding calls [`KeyValuer::nest`](crate::KeyValuer::nest), which
    /// encodes the inner fields in order and stops at the first error.
    pub fn nest(key: impl Into<String>, fields: impl Into<Fields>) -> Self {
        Self::from_parts(key, Value::Nested(fields.into()))
    }

    /// Constructs a field from a closure that runs at encode time.
    ///
    /// The closure receives an emitter bound to the sink's
    /// [`add_string`](crate::KeyValuer::add_string). An error returned by the
    /// closure is propagated wrapped as [`Error::StringFn`].
    pub fn string_fn<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut dyn FnMut(&str, &str)) -> Result<()> + Send + Sync + 'static,
    {
        Self::from_parts(key, Value::StringFn(Arc::new(f)))
    }

    /// Constructs a field from the textual form of `value`, produced by
    /// [`TextMarshaler::marshal_text`] when the field is encoded.
    pub fn text<T>(key: impl Into<String>, value: T) -> Self
    where
        T: TextMarshaler + Send + Sync + 'static,
    {
        let key = key.into();
        let emit_key = key.clone();
        Self::string_fn(key, move |emit| {
            let text = value.marshal_text().map_err(|source| Error::Text {
                key: emit_key.clone(),
                source,
            })?;
            emit(&emit_key, &String::from_utf8_lossy(&text));
            Ok(())
        })
    }

    /// Constructs a field from the JSON serialization of `value`, produced
    /// when the field is encoded.
    pub fn json<T>(key: impl Into<String>, value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        let key = key.into();
        let emit_key = key.clone();
        Self::string_fn(key, move |emit| {
            let json = serde_json::to_string(&value).map_err(|source| Error::Json {
                key: emit_key.clone(),
                source,
            })?;
            emit(&emit_key, &json);
            Ok(())
        })
    }

    /// Constructs a field holding nanoseconds since the Unix epoch.
    ///
    /// Times before the epoch are negative. Times beyond the `i64` range
    /// saturate.
    pub fn time(key: impl Into<String>, value: SystemTime) -> Self {
        let nanos = match value.duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_nanos()).unwrap_or(i64::MAX),
            Err(before) => {
                i64::try_from(before.duration().as_nanos()).map_or(i64::MIN, |nanos| -nanos)
            }
        };
        Self::int64(key, nanos)
    }

    /// Constructs a field holding a duration in nanoseconds, saturating at
    /// `i64::MAX`.
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::int64(key, i64::try_from(value.as_nanos()).unwrap_or(i64::MAX))
    }

    /// Constructs a string field under [`KEY_NAME_ERROR`] holding the error
    /// message, or `<nil>` when there is no error.
    pub fn err(error: Option<&dyn std::error::Error>) -> Self {
        Self::err_with_key(KEY_NAME_ERROR, error)
    }

    /// Like [`Field::err`] with a custom key.
    pub fn err_with_key(key: impl Into<String>, error: Option<&dyn std::error::Error>) -> Self {
        match error {
            Some(error) => Self::string(key, error.to_string()),
            None => Self::string(key, NIL_ERROR),
        }
    }
}
