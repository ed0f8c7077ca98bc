//! crates/fields/src/error.rs
//!
//! Error types produced while encoding fields into a sink.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by user supplied conversions and marshalers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for field encoding.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while encoding fields.
///
/// Wrapping variants keep the underlying failure reachable through
/// [`std::error::Error::source`] and repeat it in their `Display` output, so a
/// single `{err}` shows the whole chain from the outermost stage inwards.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The field carries no kind. Only reachable through `Field::default()`.
    #[error("field kind not supported for key {key:?}")]
    UnsupportedKind {
        /// Key of the offending field.
        key: String,
    },
    /// A [`Marshaler`](crate::Marshaler) or other user code failed.
    #[error("marshal failed: {0}")]
    Marshal(#[source] BoxError),
    /// A [`TextMarshaler`](crate::TextMarshaler) conversion failed.
    #[error("text marshaling of {key:?} failed: {source}")]
    Text {
        /// Key of the field being encoded.
        key: String,
        /// Conversion failure.
        #[source]
        source: BoxError,
    },
    /// JSON serialization of a field value failed.
    #[error("json marshaling of {key:?} failed: {source}")]
    Json {
        /// Key of the field being encoded.
        key: String,
        /// Serializer failure.
        #[source]
        source: serde_json::Error,
    },
    /// A deferred string closure returned an error.
    #[error("deferred string for {key:?}: {source}")]
    StringFn {
        /// Key of the field being encoded.
        key: String,
        /// Error returned by the closure.
        #[source]
        source: Box<Error>,
    },
    /// The callback passed to [`KeyValuer::nest`](crate::KeyValuer::nest) failed.
    #[error("nested fields under {key:?}: {source}")]
    Nest {
        /// Namespace key.
        key: String,
        /// Error returned by the nested callback.
        #[source]
        source: Box<Error>,
    },
    /// A field inside a [`Fields`](crate::Fields) traversal failed.
    #[error("field #{index} {key:?}: {source}")]
    Fields {
        /// Position of the failing field in the sequence.
        index: usize,
        /// Key of the failing field.
        key: String,
        /// Error returned by the field.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps an arbitrary error raised by user marshaling code.
    pub fn marshal<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Marshal(err.into())
    }

    /// Builds a marshal failure from a plain message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::Marshal(message.to_string().into())
    }

    /// Wraps `self` as the failure of the callback nested under `key`.
    ///
    /// Sinks use this to report a failed [`KeyValuer::nest`](crate::KeyValuer::nest)
    /// callback.
    #[must_use]
    pub fn in_nest(self, key: &str) -> Self {
        Self::Nest {
            key: key.to_owned(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error of the wrapping chain.
    ///
    /// Stage variants (`StringFn`, `Nest`, `Fields`) are peeled off until a
    /// variant that describes the actual failure is reached.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::StringFn { source, .. }
            | Self::Nest { source, .. }
            | Self::Fields { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn marshal_wraps_foreign_errors() {
        let err = Error::marshal(io::Error::other("disk gone"));

        assert!(matches!(err, Error::Marshal(_)));
        assert_eq!(err.to_string(), "marshal failed: disk gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn msg_builds_marshal_failure() {
        let err = Error::msg("password field refused");
        assert_eq!(err.to_string(), "marshal failed: password field refused");
    }

    #[test]
    fn display_includes_whole_chain() {
        let err = Error::Fields {
            index: 1,
            key: "outer".to_owned(),
            source: Box::new(Error::msg("boom").in_nest("outer")),
        };

        assert_eq!(
            err.to_string(),
            "field #1 \"outer\": nested fields under \"outer\": marshal failed: boom"
        );
    }

    #[test]
    fn root_cause_peels_stage_wrappers() {
        let err = Error::StringFn {
            key: "k".to_owned(),
            source: Box::new(Error::UnsupportedKind { key: "k".to_owned() }),
        }
        .in_nest("n");

        assert!(matches!(err.root_cause(), Error::UnsupportedKind { .. }));
    }

    #[test]
    fn source_chain_is_walkable() {
        let err = Error::msg("inner").in_nest("n");
        let source = err.source().expect("nest has a source");
        assert_eq!(source.to_string(), "marshal failed: inner");
    }
}
