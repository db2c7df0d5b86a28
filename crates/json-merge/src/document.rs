//! Document adapters.
//!
//! A [`Document`] is any representation a caller keeps JSON in. Each one
//! converts to the canonical [`Value`] the engines work on, and back into
//! its own shape once they are done.
//!
//! | Type | Input | Output |
//! |---|---|---|
//! | [`Value`], [`Map`] | direct | direct (`Map` needs an object) |
//! | [`Record<T>`] | `serde` serialization | `serde` deserialization |
//! | `Vec<u8>` / `[u8]` | parsed, invalid JSON is an error | serialized |
//! | `String` / `str` | parsed, invalid JSON becomes a plain string | serialized |
//! | `bool`, integers, floats, `()` | direct | matching JSON type only |
//! | `Option<T>` | `None` is `null` | `null` is `None` |

use std::ops::{Deref, DerefMut};

use json_merge_util::{clone, clone_object};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::error::{in_role, Error, Role};
use crate::merge::{apply_patch_mut, merge_object};

/// Conversion of a document into a canonical value.
///
/// This is all an operation needs from inputs it never has to rebuild,
/// such as patches.
pub trait ToCanonical {
    fn to_canonical(&self) -> Result<Value, Error>;
}

/// A document representation that converts both ways.
pub trait Document: ToCanonical + Sized {
    fn from_canonical(value: Value) -> Result<Self, Error>;

    /// Merges a canonical patch into `self`.
    ///
    /// `self` is only replaced once the merged value has converted back
    /// successfully. Representations that hold a canonical tree override
    /// this to write into their nested containers directly.
    fn merge_canonical(&mut self, patch: &Value) -> Result<(), Error> {
        let mut value = self.to_canonical().map_err(in_role(Role::Target))?;
        apply_patch_mut(&mut value, patch);
        *self = Self::from_canonical(value).map_err(in_role(Role::Result))?;
        Ok(())
    }
}

impl<T: ToCanonical + ?Sized> ToCanonical for &T {
    fn to_canonical(&self) -> Result<Value, Error> {
        (**self).to_canonical()
    }
}

// ── Native containers ─────────────────────────────────────────────────────

impl ToCanonical for Value {
    fn to_canonical(&self) -> Result<Value, Error> {
        Ok(clone(self))
    }
}

impl Document for Value {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        Ok(value)
    }

    fn merge_canonical(&mut self, patch: &Value) -> Result<(), Error> {
        apply_patch_mut(self, patch);
        Ok(())
    }
}

impl ToCanonical for Map<String, Value> {
    fn to_canonical(&self) -> Result<Value, Error> {
        Ok(Value::Object(clone_object(self)))
    }
}

impl Document for Map<String, Value> {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::mismatch("object", &other)),
        }
    }

    fn merge_canonical(&mut self, patch: &Value) -> Result<(), Error> {
        match patch {
            Value::Object(patch_obj) => {
                merge_object(self, patch_obj);
                Ok(())
            }
            // A non-object patch replaces the whole map, which a map cannot hold.
            other => Err(Error::mismatch("object", other).context(Role::Result)),
        }
    }
}

// ── Serialized text ───────────────────────────────────────────────────────

fn parse_text(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            trace!(error = %err, "text is not JSON, taking it as a string value");
            None
        }
    }
}

impl ToCanonical for str {
    fn to_canonical(&self) -> Result<Value, Error> {
        Ok(parse_text(self).unwrap_or_else(|| Value::String(self.to_owned())))
    }
}

impl ToCanonical for String {
    fn to_canonical(&self) -> Result<Value, Error> {
        self.as_str().to_canonical()
    }
}

impl Document for String {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        serde_json::to_string(&value).map_err(Error::Encode)
    }
}

// ── Serialized bytes ──────────────────────────────────────────────────────

impl ToCanonical for [u8] {
    fn to_canonical(&self) -> Result<Value, Error> {
        serde_json::from_slice(self).map_err(Error::Decode)
    }
}

impl ToCanonical for Vec<u8> {
    fn to_canonical(&self) -> Result<Value, Error> {
        self.as_slice().to_canonical()
    }
}

impl Document for Vec<u8> {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        serde_json::to_vec(&value).map_err(Error::Encode)
    }
}

// ── Raw scalars ───────────────────────────────────────────────────────────

impl ToCanonical for bool {
    fn to_canonical(&self) -> Result<Value, Error> {
        Ok(Value::Bool(*self))
    }
}

impl Document for bool {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        value.as_bool().ok_or_else(|| Error::mismatch("boolean", &value))
    }
}

impl ToCanonical for () {
    fn to_canonical(&self) -> Result<Value, Error> {
        Ok(Value::Null)
    }
}

impl Document for () {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(()),
            other => Err(Error::mismatch("null", &other)),
        }
    }
}

macro_rules! integer_document {
    ($($ty:ty => $as:ident),* $(,)?) => {$(
        impl ToCanonical for $ty {
            fn to_canonical(&self) -> Result<Value, Error> {
                Ok(Value::Number(Number::from(*self)))
            }
        }

        impl Document for $ty {
            fn from_canonical(value: Value) -> Result<Self, Error> {
                value
                    .$as()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| Error::mismatch(stringify!($ty), &value))
            }
        }
    )*};
}

integer_document! {
    i8 => as_i64, i16 => as_i64, i32 => as_i64, i64 => as_i64,
    u8 => as_u64, u16 => as_u64, u32 => as_u64, u64 => as_u64,
    isize => as_i64, usize => as_u64,
}

impl ToCanonical for f64 {
    fn to_canonical(&self) -> Result<Value, Error> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or(Error::NonFiniteNumber(*self))
    }
}

impl Document for f64 {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        value.as_f64().ok_or_else(|| Error::mismatch("number", &value))
    }
}

impl ToCanonical for f32 {
    fn to_canonical(&self) -> Result<Value, Error> {
        f64::from(*self).to_canonical()
    }
}

impl Document for f32 {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        // Out-of-range values saturate to infinity.
        f64::from_canonical(value).map(|n| n as f32)
    }
}

// ── Nullable wrapper ──────────────────────────────────────────────────────

impl<T: ToCanonical> ToCanonical for Option<T> {
    fn to_canonical(&self) -> Result<Value, Error> {
        match self {
            Some(inner) => inner.to_canonical(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Document> Document for Option<T> {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            other => T::from_canonical(other).map(Some),
        }
    }
}

// ── Fixed-schema records ──────────────────────────────────────────────────

/// A typed record converted through its `serde` implementation.
///
/// Serialization attributes apply on the way in, so a field skipped by
/// `skip_serializing_if` is absent from the canonical value. On the way out
/// the merged value is deserialized into `T`: members `T` does not declare
/// are dropped, and required fields that ended up missing are an error.
///
/// A record cannot tell a missing field from one holding its default unless
/// the field is an `Option`. Use `Option` fields, skipped when `None`, where
/// that difference matters.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use json_merge::{merge, Record};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     email: Option<String>,
/// }
///
/// let user = Record(User { name: "John".into(), email: Some("j@example.com".into()) });
/// let patch = Record(serde_json::json!({"email": null}));
///
/// let merged = merge(&user, &patch).unwrap();
/// assert_eq!(merged.name, "John");
/// assert_eq!(merged.email, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record<T>(pub T);

impl<T> Record<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Record<T> {
    fn from(inner: T) -> Self {
        Record(inner)
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Record<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize> ToCanonical for Record<T> {
    fn to_canonical(&self) -> Result<Value, Error> {
        serde_json::to_value(&self.0).map_err(Error::Encode)
    }
}

impl<T: Serialize + DeserializeOwned> Document for Record<T> {
    fn from_canonical(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value)
            .map(Record)
            .map_err(Error::Conversion)
    }
}
