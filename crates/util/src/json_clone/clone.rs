use serde_json::{Map, Value};

/// Creates a deep copy of a JSON value.
///
/// Every nested array and object is rebuilt, so the copy shares no
/// container with `value` and can be merged into freely.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_merge_util::json_clone::clone;
///
/// let original = json!({"tags": ["a", "b"]});
/// let mut copy = clone(&original);
/// copy["tags"][0] = json!("z");
///
/// assert_eq!(original, json!({"tags": ["a", "b"]}));
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => Value::Object(clone_object(obj)),
    }
}

/// Deep copy of an object's entries, keeping key order.
pub fn clone_object(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut new_obj = Map::with_capacity(obj.len());
    for (key, val) in obj {
        new_obj.insert(key.clone(), clone(val));
    }
    new_obj
}
