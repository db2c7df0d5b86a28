//! Diff engine: builds the merge patch that turns one value into another.
//!
//! Objects are compared member by member and nested objects recursively.
//! Anything else, arrays included, is compared whole with [`deep_equal`] and
//! replaced whole when it differs.

use json_merge_util::{clone, deep_equal};
use serde_json::{Map, Value};

/// Generates a merge patch that transforms `source` into `target`.
///
/// If either side is not an object the patch is `target` itself. For two
/// objects the result is an object, empty when nothing changed.
///
/// A merge patch cannot set a member to `null`, so a `null` member in
/// `target` comes out as a deletion.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_merge::generate_patch;
///
/// let patch = generate_patch(
///     &json!({"name": "John", "age": 30, "city": "NYC"}),
///     &json!({"name": "Jane", "age": 30}),
/// );
/// assert_eq!(patch, json!({"name": "Jane", "city": null}));
/// ```
pub fn generate_patch(source: &Value, target: &Value) -> Value {
    match (source, target) {
        (Value::Object(source_obj), Value::Object(target_obj)) => {
            Value::Object(diff_objects(source_obj, target_obj))
        }
        _ => clone(target),
    }
}

fn diff_objects(source: &Map<String, Value>, target: &Map<String, Value>) -> Map<String, Value> {
    let mut patch = Map::new();

    for (key, target_value) in target {
        let Some(source_value) = source.get(key) else {
            patch.insert(key.clone(), clone(target_value));
            continue;
        };
        match (source_value, target_value) {
            (Value::Object(source_obj), Value::Object(target_obj)) => {
                let nested = diff_objects(source_obj, target_obj);
                if !nested.is_empty() {
                    patch.insert(key.clone(), Value::Object(nested));
                }
            }
            _ if deep_equal(source_value, target_value) => {}
            _ => {
                patch.insert(key.clone(), clone(target_value));
            }
        }
    }

    for key in source.keys() {
        if !target.contains_key(key) {
            patch.insert(key.clone(), Value::Null);
        }
    }

    patch
}
