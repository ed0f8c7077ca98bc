//! crates/fields/src/field.rs
//! The tagged field value and its encoding dispatch.

mod constructors;

use std::fmt;
use std::sync::Arc;

use crate::TRACING_TARGET;
use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::key_valuer::{KeyValuer, Marshaler};
use crate::scratch::FieldScratch;

/// Closure stored by [`Field::string_fn`]. It receives an emitter bound to the
/// sink's `add_string` and may call it any number of times.
pub(crate) type StringFn =
    Arc<dyn Fn(&mut dyn FnMut(&str, &str)) -> Result<()> + Send + Sync + 'static>;

/// Discriminant of a [`Field`] payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FieldKind {
    /// No payload. Encoding such a field is a defect.
    Unset,
    /// Boolean.
    Bool,
    /// Pointer-sized signed integer.
    Int,
    /// 64-bit signed integer. Also used for times and durations.
    Int64,
    /// 64-bit unsigned integer.
    Uint64,
    /// 64-bit float.
    Float64,
    /// String.
    String,
    /// Sequence of pointer-sized integers.
    Ints,
    /// Sequence of 64-bit integers.
    Int64s,
    /// Sequence of strings.
    Strings,
    /// Value rendered through `Display`.
    Stringer,
    /// Value rendered through `Debug`.
    GoStringer,
    /// Value forwarded to the sink's generic method.
    Object,
    /// Only the type name of a value.
    ObjectTypeOf,
    /// Deferred, fallible string producer.
    StringFn,
    /// User type implementing [`Marshaler`].
    Marshaler,
    /// Namespaced sequence of fields.
    NestedFields,
}

#[derive(Clone, Default)]
pub(crate) enum Value {
    #[default]
    Unset,
    Bool(bool),
    Int(isize),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(String),
    Ints(Arc<[isize]>),
    Int64s(Arc<[i64]>),
    Strings(Arc<[String]>),
    Stringer(Arc<dyn fmt::Display + Send + Sync>),
    GoStringer(Arc<dyn fmt::Debug + Send + Sync>),
    Object(Arc<dyn fmt::Debug + Send + Sync>),
    ObjectTypeOf(&'static str),
    StringFn(StringFn),
    Marshaler(Arc<dyn Marshaler + Send + Sync>),
    Nested(Fields),
}

impl Value {
    const fn kind(&self) -> FieldKind {
        match self {
            Self::Unset => FieldKind::Unset,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Int64(_) => FieldKind::Int64,
            Self::Uint64(_) => FieldKind::Uint64,
            Self::Float64(_) => FieldKind::Float64,
            Self::String(_) => FieldKind::String,
            Self::Ints(_) => FieldKind::Ints,
            Self::Int64s(_) => FieldKind::Int64s,
            Self::Strings(_) => FieldKind::Strings,
            Self::Stringer(_) => FieldKind::Stringer,
            Self::GoStringer(_) => FieldKind::GoStringer,
            Self::Object(_) => FieldKind::Object,
            Self::ObjectTypeOf(_) => FieldKind::ObjectTypeOf,
            Self::StringFn(_) => FieldKind::StringFn,
            Self::Marshaler(_) => FieldKind::Marshaler,
            Self::Nested(_) => FieldKind::NestedFields,
        }
    }
}

/// A deferred key-value encoding operation.
///
/// Fields are built once through the typed constructors (see
/// [`Field::string`], [`Field::int`], [`Field::nest`], ...) and never change
/// afterwards. Encoding with [`add_to`](Self::add_to) only reads the payload,
/// so one field may be encoded any number of times and into any sink.
/// Non-`Copy` payloads are reference counted, making clones cheap and fields
/// `Send + Sync`.
///
/// `Field::default()` produces a field of kind [`FieldKind::Unset`]; encoding
/// it fails with [`Error::UnsupportedKind`].
#[derive(Clone, Default)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    pub(crate) fn from_parts(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Returns the key. May be empty.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the payload discriminant.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    /// Encodes the field into `kv`.
    ///
    /// Primitive kinds call exactly one matching sink method with the key and
    /// value. Sequence kinds are joined as `"v1, v2, ..."` and passed to
    /// [`KeyValuer::add_string`]. Marshalers and nested fields recurse through
    /// the sink.
    pub fn add_to(&self, kv: &mut dyn KeyValuer) -> Result<()> {
        self.add_to_with_scratch(kv, &mut FieldScratch::new())
    }

    /// Same as [`add_to`](Self::add_to) but joins sequences in `scratch`.
    pub fn add_to_with_scratch(
        &self,
        kv: &mut dyn KeyValuer,
        scratch: &mut FieldScratch,
    ) -> Result<()> {
        let key = self.key.as_str();
        match &self.value {
            Value::Bool(value) => kv.add_bool(key, *value),
            Value::Int(value) => kv.add_int(key, *value),
            Value::Int64(value) => kv.add_int64(key, *value),
            Value::Uint64(value) => kv.add_uint64(key, *value),
            Value::Float64(value) => kv.add_float64(key, *value),
            Value::String(value) => kv.add_string(key, value),
            Value::Ints(values) => kv.add_string(key, scratch.join(values.iter())),
            Value::Int64s(values) => kv.add_string(key, scratch.join(values.iter())),
            Value::Strings(values) => kv.add_string(key, scratch.join(values.iter())),
            Value::Stringer(value) => kv.add_string(key, &value.to_string()),
            Value::GoStringer(value) => kv.add_string(key, &format!("{value:?}")),
            Value::Object(value) => kv.add_object(key, &**value),
            Value::ObjectTypeOf(type_name) => kv.add_string(key, type_name),
            Value::Marshaler(value) => return kv.add_marshaler(key, &**value),
            Value::StringFn(f) => {
                return f(&mut |k: &str, v: &str| kv.add_string(k, v)).map_err(|source| {
                    Error::StringFn {
                        key: key.to_owned(),
                        source: Box::new(source),
                    }
                });
            }
            Value::Nested(fields) => {
                return kv.nest(key, &mut |inner: &mut dyn KeyValuer| {
                    fields.add_to_with_scratch(inner, scratch)
                });
            }
            Value::Unset => {
                tracing::error!(
                    target: TRACING_TARGET,
                    key,
                    "refusing to encode a field without a kind"
                );
                return Err(Error::UnsupportedKind {
                    key: key.to_owned(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .finish()
    }
}
