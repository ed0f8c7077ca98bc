//! crates/fields/src/key_valuer.rs
//! Capability traits shared by fields, sinks, and user types.

use std::fmt;

use crate::error::{BoxError, Result};

/// Encoding-agnostic sink that receives structured key-value pairs.
///
/// Every logging backend implements this trait to receive fields. A
/// [`Field`](crate::Field) calls exactly one primitive method per encode, or
/// recurses through [`add_marshaler`](Self::add_marshaler) and
/// [`nest`](Self::nest) for composite values.
///
/// Methods take `&mut self`: a sink is driven by one traversal at a time.
/// Sinks that back onto shared storage must serialize access themselves.
pub trait KeyValuer {
    /// Records a boolean.
    fn add_bool(&mut self, key: &str, value: bool);
    /// Records a pointer-sized signed integer.
    fn add_int(&mut self, key: &str, value: isize);
    /// Records a 64-bit signed integer.
    fn add_int64(&mut self, key: &str, value: i64);
    /// Records a 64-bit unsigned integer without loss of range.
    fn add_uint64(&mut self, key: &str, value: u64);
    /// Records a 64-bit float.
    fn add_float64(&mut self, key: &str, value: f64);
    /// Records a string.
    fn add_string(&mut self, key: &str, value: &str);
    /// Records an arbitrary value through its `Debug` representation.
    ///
    /// This is the generic fallback and usually the slowest path. Prefer a
    /// [`Marshaler`] for types that are logged often.
    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug);
    /// Lets `value` describe itself into this sink.
    ///
    /// Implementations call [`Marshaler::marshal_log`] with `self`, so a
    /// marshaler may in turn add any number of fields.
    fn add_marshaler(&mut self, key: &str, value: &dyn Marshaler) -> Result<()>;
    /// Populates a namespace under `key`.
    ///
    /// `f` must be invoked exactly once, synchronously, before `nest`
    /// returns. Its error is propagated wrapped as
    /// [`Error::Nest`](crate::Error::Nest). Whether the region is visibly
    /// bracketed is up to the sink.
    fn nest(
        &mut self,
        key: &str,
        f: &mut dyn FnMut(&mut dyn KeyValuer) -> Result<()>,
    ) -> Result<()>;
}

/// Implemented by user types that add themselves to a logging context.
///
/// Implementing this trait is the efficient alternative to
/// [`Field::object`](crate::Field::object) and allows a type to omit
/// information that should never reach logs, such as passwords.
///
/// # Examples
///
/// ```
/// use fields::{Field, KeyValuer, Marshaler, Result, TextEncoder};
///
/// struct User {
///     name: &'static str,
///     password: &'static str,
/// }
///
/// impl Marshaler for User {
///     fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()> {
///         kv.add_string("name", self.name);
///         Ok(())
///     }
/// }
///
/// let user = User { name: "gopher", password: "hunter2" };
/// let mut out = String::new();
/// Field::marshal("user", user).add_to(&mut TextEncoder::new(&mut out))?;
/// assert_eq!(out, " name: \"gopher\"");
/// # Ok::<(), fields::Error>(())
/// ```
pub trait Marshaler {
    /// Adds the value's fields to `kv`.
    fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()>;
}

/// Fallible conversion of a value into its textual form.
///
/// Consumed by [`Field::text`](crate::Field::text); the conversion runs when
/// the field is encoded, not when it is built.
pub trait TextMarshaler {
    /// Produces the textual representation of the value.
    fn marshal_text(&self) -> std::result::Result<Vec<u8>, BoxError>;
}

impl<M> Marshaler for &M
where
    M: Marshaler + ?Sized,
{
    fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()> {
        (**self).marshal_log(kv)
    }
}

impl<M> Marshaler for std::sync::Arc<M>
where
    M: Marshaler + ?Sized,
{
    fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()> {
        (**self).marshal_log(kv)
    }
}
