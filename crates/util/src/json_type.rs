//! JSON type tags.

use serde_json::Value;

/// The six JSON value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the JSON type name of `value`, e.g. `"object"` or `"null"`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_merge_util::type_name;
///
/// assert_eq!(type_name(&json!({"a": 1})), "object");
/// assert_eq!(type_name(&json!([1])), "array");
/// assert_eq!(type_name(&json!(false)), "boolean");
/// ```
pub fn type_name(value: &Value) -> &'static str {
    JsonType::of(value).as_str()
}
