//! Error types for document conversion.
//!
//! The merge and diff engines never fail. Every error comes from converting
//! a caller document to or from its canonical value.

use std::fmt;

use json_merge_util::JsonType;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

// ── Role ──────────────────────────────────────────────────────────────────

/// Which argument of an operation a conversion error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Target,
    Patch,
    Source,
    /// The merged document or generated patch, on its way back out.
    Result,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Target => "target",
            Role::Patch => "patch",
            Role::Source => "source",
            Role::Result => "result",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ErrorKind ─────────────────────────────────────────────────────────────

/// Error category, stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Serialized input is not valid JSON.
    Decode,
    /// A value cannot be serialized.
    Encode,
    /// A value does not fit the requested output shape.
    Conversion,
}

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cannot serialize value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("number {0} has no JSON representation")]
    NonFiniteNumber(f64),

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value does not fit the requested type: {0}")]
    Conversion(#[source] serde_json::Error),

    #[error("{role} document: {source}")]
    Context {
        role: Role,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// A type mismatch between the wanted shape and the value at hand.
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        Error::Mismatch {
            expected,
            found: JsonType::of(found).as_str(),
        }
    }

    /// Tags the error with the argument it came from. An already tagged
    /// error keeps its original role.
    pub fn context(self, role: Role) -> Self {
        match self {
            Error::Context { .. } => self,
            other => Error::Context {
                role,
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Decode(_) => ErrorKind::Decode,
            Error::Encode(_) | Error::NonFiniteNumber(_) => ErrorKind::Encode,
            Error::Mismatch { .. } | Error::Conversion(_) => ErrorKind::Conversion,
            Error::Context { source, .. } => source.kind(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Error::Context { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Returns a `map_err` adapter that logs a conversion failure and tags it
/// with `role`.
pub(crate) fn in_role(role: Role) -> impl FnOnce(Error) -> Error {
    move |err| {
        debug!(%role, kind = ?err.kind(), error = %err, "document conversion failed");
        err.context(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_error() -> Error {
        Error::Decode(serde_json::from_str::<Value>("{").unwrap_err())
    }

    #[test]
    fn test_kind_of_each_variant() {
        assert_eq!(decode_error().kind(), ErrorKind::Decode);
        assert_eq!(Error::NonFiniteNumber(f64::NAN).kind(), ErrorKind::Encode);
        assert_eq!(
            Error::mismatch("object", &json!([1])).kind(),
            ErrorKind::Conversion
        );
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = decode_error().context(Role::Patch);
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.role(), Some(Role::Patch));
    }

    #[test]
    fn test_context_does_not_rewrap() {
        let err = decode_error().context(Role::Target).context(Role::Result);
        assert_eq!(err.role(), Some(Role::Target));
    }

    #[test]
    fn test_mismatch_message() {
        let err = Error::mismatch("object", &json!("text")).context(Role::Result);
        assert_eq!(err.to_string(), "result document: expected object, found string");
    }
}
