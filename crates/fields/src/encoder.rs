//! crates/fields/src/encoder.rs
//! Reference text encoder.
//!
//! [`TextEncoder`] is the human-readable baseline every other sink is compared
//! against. Each pair becomes `"<separator><key><assignment><value>"`, values
//! use their `Debug` representation (strings quoted and escaped), and an empty
//! key is written as `_`.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::mem;

use crate::error::{Error, Result};
use crate::fields::Fields;
use crate::key_valuer::{KeyValuer, Marshaler};
use crate::scratch::FieldScratch;
use crate::{ASSIGNMENT, KEY_NAME_ERROR, SEPARATOR, TRACING_TARGET};

const EMPTY_KEY: &str = "_";

/// Best-effort [`KeyValuer`] rendering plain text into any [`fmt::Write`].
///
/// Two paths differ in how failures travel:
///
/// - [`add_marshaler`](KeyValuer::add_marshaler) never fails. A marshaler error
///   is written inline as an `error` pair so the log line survives.
/// - [`nest`](KeyValuer::nest) propagates the callback's error wrapped as
///   [`Error::Nest`].
///
/// Write failures of the target are latched and reported by
/// [`write_failed`](Self::write_failed).
///
/// # Examples
///
/// ```
/// use fields::{Field, TextEncoder};
///
/// let mut out = String::new();
/// let mut encoder = TextEncoder::new(&mut out).with_assignment("=");
/// Field::ints("ids", [1, 2, 3]).add_to(&mut encoder)?;
/// Field::string("", "anonymous").add_to(&mut encoder)?;
/// assert_eq!(out, " ids=\"1, 2, 3\" _=\"anonymous\"");
/// # Ok::<(), fields::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct TextEncoder<W> {
    writer: W,
    separator: Cow<'static, str>,
    assignment: Cow<'static, str>,
    scratch: FieldScratch,
    write_failed: bool,
}

impl<W> TextEncoder<W> {
    /// Creates an encoder with the default separator and assignment.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            separator: Cow::Borrowed(SEPARATOR),
            assignment: Cow::Borrowed(ASSIGNMENT),
            scratch: FieldScratch::new(),
            write_failed: false,
        }
    }

    /// Replaces the text written before each pair.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replaces the text written between key and value.
    #[must_use]
    pub fn with_assignment(mut self, assignment: impl Into<Cow<'static, str>>) -> Self {
        self.assignment = assignment.into();
        self
    }

    /// Returns the separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the assignment text.
    pub fn assignment(&self) -> &str {
        &self.assignment
    }

    /// Reports whether any write into the target failed.
    pub const fn write_failed(&self) -> bool {
        self.write_failed
    }

    /// Borrows the target.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the target.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the encoder and returns the target.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> TextEncoder<W>
where
    W: fmt::Write,
{
    fn latch(&mut self, result: fmt::Result) {
        self.write_failed |= result.is_err();
    }

    fn write_key(&mut self, key: &str) {
        let key = if key.is_empty() { EMPTY_KEY } else { key };
        let result = self
            .writer
            .write_str(&self.separator)
            .and_then(|()| self.writer.write_str(key))
            .and_then(|()| self.writer.write_str(&self.assignment));
        self.latch(result);
    }

    fn write_pair(&mut self, key: &str, value: &dyn fmt::Debug) {
        self.write_key(key);
        let result = write!(self.writer, "{value:?}");
        self.latch(result);
    }

    /// Appends an `error` pair holding the formatted `err`.
    pub fn annotate_error(&mut self, err: &Error) {
        self.write_key(KEY_NAME_ERROR);
        let result = write!(self.writer, "{err}");
        self.latch(result);
    }

    /// Writes `message`, the encoded `fields`, and a trailing newline.
    ///
    /// An encoding failure is appended as an `error` pair instead of being
    /// returned.
    pub fn write_line(&mut self, message: &str, fields: &Fields) {
        let mut scratch = mem::take(&mut self.scratch);
        self.write_line_with_scratch(message, fields, &mut scratch);
        self.scratch = scratch;
    }

    /// Same as [`write_line`](Self::write_line) but joins sequences in a
    /// caller-provided buffer, such as one taken from a
    /// [`ScratchPool`](crate::ScratchPool).
    pub fn write_line_with_scratch(
        &mut self,
        message: &str,
        fields: &Fields,
        scratch: &mut FieldScratch,
    ) {
        let result = self.writer.write_str(message);
        self.latch(result);

        if let Err(err) = fields.add_to_with_scratch(self, scratch) {
            self.annotate_error(&err);
        }

        let result = self.writer.write_char('\n');
        self.latch(result);
    }
}

impl<W> KeyValuer for TextEncoder<W>
where
    W: fmt::Write,
{
    fn add_bool(&mut self, key: &str, value: bool) {
        self.write_pair(key, &value);
    }

    fn add_int(&mut self, key: &str, value: isize) {
        self.write_pair(key, &value);
    }

    fn add_int64(&mut self, key: &str, value: i64) {
        self.write_pair(key, &value);
    }

    fn add_uint64(&mut self, key: &str, value: u64) {
        self.write_pair(key, &value);
    }

    fn add_float64(&mut self, key: &str, value: f64) {
        self.write_pair(key, &value);
    }

    fn add_string(&mut self, key: &str, value: &str) {
        self.write_pair(key, &value);
    }

    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug) {
        self.write_pair(key, value);
    }

    fn add_marshaler(&mut self, key: &str, value: &dyn Marshaler) -> Result<()> {
        if let Err(err) = value.marshal_log(self) {
            tracing::debug!(
                target: TRACING_TARGET,
                key,
                error = %err,
                "marshaler failed; annotating text output"
            );
            self.annotate_error(&err);
        }
        Ok(())
    }

    fn nest(
        &mut self,
        key: &str,
        f: &mut dyn FnMut(&mut dyn KeyValuer) -> Result<()>,
    ) -> Result<()> {
        self.write_key(key);
        f(self).map_err(|err| err.in_nest(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;

    struct FailingWriter;

    impl fmt::Write for FailingWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn primitives_use_debug_rendering() {
        let mut out = String::new();
        let mut encoder = TextEncoder::new(&mut out);
        encoder.add_bool("b", true);
        encoder.add_int("i", -3);
        encoder.add_int64("i64", i64::MIN);
        encoder.add_uint64("u64", u64::MAX);
        encoder.add_float64("f", 1.5);
        encoder.add_string("s", "say \"hi\"");

        assert_eq!(
            out,
            " b: true i: -3 i64: -9223372036854775808 u64: 18446744073709551615 \
             f: 1.5 s: \"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn empty_key_becomes_placeholder() {
        let mut out = String::new();
        TextEncoder::new(&mut out).add_int64("", 3);
        assert_eq!(out, " _: 3");
    }

    #[test]
    fn separator_and_assignment_are_per_instance() {
        let mut out = String::new();
        let mut encoder = TextEncoder::new(&mut out)
            .with_separator(" | ")
            .with_assignment("=");
        assert_eq!(encoder.separator(), " | ");
        assert_eq!(encoder.assignment(), "=");
        encoder.add_bool("a", false);
        encoder.add_string("b", "c");
        assert_eq!(out, " | a=false | b=\"c\"");
    }

    #[test]
    fn nest_writes_key_then_inner_pairs() {
        let mut out = String::new();
        TextEncoder::new(&mut out)
            .nest("nestedKey", &mut |kv| {
                kv.add_bool("nbool", true);
                kv.add_int("nint", 3);
                kv.add_object("nobj", &["sl1", "sl2"]);
                Ok(())
            })
            .expect("nest succeeds");

        assert_eq!(
            out,
            " nestedKey:  nbool: true nint: 3 nobj: [\"sl1\", \"sl2\"]"
        );
    }

    #[test]
    fn nest_with_empty_key_uses_placeholder() {
        let mut out = String::new();
        TextEncoder::new(&mut out)
            .nest("", &mut |kv| {
                kv.add_bool("nbool", true);
                Ok(())
            })
            .expect("nest succeeds");
        assert_eq!(out, " _:  nbool: true");
    }

    #[test]
    fn nest_propagates_callback_error() {
        let mut out = String::new();
        let err = TextEncoder::new(&mut out)
            .nest("nestedKey", &mut |_| Err(Error::msg("NestErr")))
            .expect_err("callback error propagates");

        assert_eq!(out, " nestedKey: ");
        assert_eq!(
            err.to_string(),
            "nested fields under \"nestedKey\": marshal failed: NestErr"
        );
    }

    #[test]
    fn nest_invokes_callback_exactly_once() {
        let mut calls = 0;
        let mut out = String::new();
        TextEncoder::new(&mut out)
            .nest("n", &mut |_| {
                calls += 1;
                Ok(())
            })
            .expect("nest succeeds");
        assert_eq!(calls, 1);
    }

    struct Refuses;

    impl Marshaler for Refuses {
        fn marshal_log(&self, kv: &mut dyn KeyValuer) -> Result<()> {
            kv.add_string("visible", "yes");
            Err(Error::msg("refused"))
        }
    }

    #[test]
    fn add_marshaler_swallows_and_annotates() {
        let mut out = String::new();
        let result = TextEncoder::new(&mut out).add_marshaler("m", &Refuses);

        assert!(result.is_ok());
        assert_eq!(out, " visible: \"yes\" error: marshal failed: refused");
    }

    #[test]
    fn write_failures_are_latched() {
        let mut encoder = TextEncoder::new(FailingWriter);
        assert!(!encoder.write_failed());
        encoder.add_bool("k", true);
        assert!(encoder.write_failed());
    }

    #[test]
    fn write_line_reuses_scratch_between_lines() {
        let mut encoder = TextEncoder::new(String::new());
        let fields = Fields::from([Field::strings("s", ["a", "b"])]);
        encoder.write_line("one", &fields);
        encoder.write_line("two", &fields);
        assert_eq!(
            encoder.into_inner(),
            "one s: \"a, b\"\ntwo s: \"a, b\"\n"
        );
    }

    #[test]
    fn write_line_with_scratch_uses_the_given_buffer() {
        let mut scratch = FieldScratch::with_capacity(4);
        let mut encoder = TextEncoder::new(String::new());
        let fields = Fields::from([Field::ints("n", vec![1, 2, 3])]);

        encoder.write_line_with_scratch("m", &fields, &mut scratch);
        assert_eq!(encoder.into_inner(), "m n: \"1, 2, 3\"\n");
        assert!(scratch.capacity() >= "1, 2, 3".len());
    }
}
