//! crates/fields/src/fields.rs
//! Ordered sequences of fields.

use std::ops::Deref;

use crate::encoder::TextEncoder;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::key_valuer::{KeyValuer, Marshaler};
use crate::scratch::FieldScratch;

/// Ordered sequence of [`Field`] values.
///
/// Insertion order is preserved and duplicate keys are kept. Extending a
/// shared context goes through [`with`](Self::with), which copies into new
/// storage so sibling contexts built from the same parent never see each
/// other's additions.
///
/// # Examples
///
/// ```
/// use fields::{Field, Fields};
///
/// let fields = Fields::from([Field::string("k1", "v1"), Field::int("k2", 2)]);
/// assert_eq!(fields.to_text("started"), "started k1: \"v1\" k2: 2\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Fields(Vec<Field>);

impl Fields {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an empty sequence with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Appends a field.
    pub fn push(&mut self, field: Field) {
        self.0.push(field);
    }

    /// Returns a new sequence holding `self` followed by `extra`.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with(&self, extra: impl IntoIterator<Item = Field>) -> Self {
        let extra = extra.into_iter();
        let mut all = Vec::with_capacity(self.0.len() + extra.size_hint().0);
        all.extend(self.0.iter().cloned());
        all.extend(extra);
        Self(all)
    }

    /// Encodes every field into `kv` in order, stopping at the first failure.
    ///
    /// Fields encoded before the failure stay in the sink. The returned error
    /// is [`Error::Fields`] wrapping the failing field's error.
    pub fn add_to(&self, kv: &mut dyn KeyValuer) -> Result<()> {
        self.add_to_with_scratch(kv, &mut FieldScratch::new())
    }

    /// Same as [`add_to`](Self::add_to) but joins sequences in `scratch`.
    pub fn add_to_with_scratch(
        &self,
        kv: &mut dyn KeyValuer,
        scratch: &mut FieldScratch,
    ) -> Result<()> {
        for (index, field) in self.0.iter().enumerate() {
            field
                .add_to_with_scratch(kv, scratch)
                .map_err(|source| Error::Fields {
                    index,
                    key: field.key().to_owned(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Renders `message` followed by the fields through a default
    /// [`TextEncoder`].
    ///
    /// An encoding failure never suppresses output: the fields written so far
    /// are kept and an `error` pair with the formatted failure is appended.
    /// The result always ends with a single `'\n'`.
    #[must_use]
    pub fn to_text(&self, message: &str) -> String {
        let mut encoder = TextEncoder::new(String::with_capacity(message.len() + 16 * self.len()));
        encoder.write_line(message, self);
        encoder.into_inner()
    }

    /// Consumes the sequence and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Field> {
        self.0
    }
}

impl Marshaler for Fields {
    fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()> {
        self.add_to(kv)
    }
}

impl Deref for Fields {
    type Target = [Field];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl<const N: usize> From<[Field; N]> for Fields {
    fn from(fields: [Field; N]) -> Self {
        Self(fields.into())
    }
}

impl From<Field> for Fields {
    fn from(field: Field) -> Self {
        Self(vec![field])
    }
}

impl From<Fields> for Vec<Field> {
    fn from(fields: Fields) -> Self {
        fields.0
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Field> for Fields {
    fn extend<I: IntoIterator<Item = Field>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;

    #[test]
    fn push_preserves_insertion_order_and_duplicates() {
        let mut fields = Fields::new();
        fields.push(Field::int("a", 1));
        fields.push(Field::int("b", 2));
        fields.push(Field::int("a", 3));

        let keys: Vec<&str> = fields.iter().map(Field::key).collect();
        assert_eq!(keys, ["a", "b", "a"]);
    }

    #[test]
    fn with_copies_instead_of_mutating() {
        let mut parent = Fields::with_capacity(8);
        parent.push(Field::string("app", "kvlog"));

        let left = parent.with([Field::int("left", 1)]);
        let right = parent.with([Field::int("right", 2)]);

        assert_eq!(parent.len(), 1);
        assert_eq!(left.to_text("m"), "m app: \"kvlog\" left: 1\n");
        assert_eq!(right.to_text("m"), "m app: \"kvlog\" right: 2\n");
    }

    #[test]
    fn to_text_of_empty_sequence_is_message_and_newline() {
        assert_eq!(Fields::new().to_text("only message"), "only message\n");
    }

    #[test]
    fn to_text_annotates_failures_and_keeps_partial_output() {
        let fields = Fields::from([
            Field::string("before", "ok"),
            Field::default(),
            Field::int("after", 1),
        ]);

        let text = fields.to_text("msg");
        assert!(text.starts_with("msg before: \"ok\" error: field #1 \"\": "));
        assert!(text.contains("field kind not supported"));
        assert!(!text.contains("after"));
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);
    }

    #[test]
    fn add_to_wraps_first_failure_with_position() {
        let fields = Fields::from([Field::bool("ok", true), Field::default()]);
        let mut out = String::new();

        let err = fields
            .add_to(&mut TextEncoder::new(&mut out))
            .expect_err("unset field fails");

        match &err {
            Error::Fields { index, key, source } => {
                assert_eq!(*index, 1);
                assert_eq!(key, "");
                assert!(matches!(**source, Error::UnsupportedKind { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(out, " ok: true");
    }

    #[test]
    fn marshal_log_flattens_into_the_sink() {
        let inner = Fields::from([Field::string("a", "b"), Field::int("c", 3)]);
        let field = Field::marshal("ignored", inner);
        assert_eq!(field.kind(), FieldKind::Marshaler);

        let mut out = String::new();
        field
            .add_to(&mut TextEncoder::new(&mut out))
            .expect("marshal succeeds");
        assert_eq!(out, " a: \"b\" c: 3");
    }

    #[test]
    fn conversions_round_out_the_collection_api() {
        let fields: Fields = (0..3).map(|i| Field::int(format!("k{i}"), i)).collect();
        assert_eq!(fields.len(), 3);

        let mut extended = Fields::from(Field::bool("first", true));
        extended.extend(fields.clone());
        assert_eq!(extended.len(), 4);

        let as_vec: Vec<Field> = extended.into();
        assert_eq!(as_vec[3].key(), "k2");

        let borrowed: Vec<&str> = (&fields).into_iter().map(Field::key).collect();
        assert_eq!(borrowed, ["k0", "k1", "k2"]);
        assert_eq!(fields.into_vec().len(), 3);
    }
}
