//! Merge engine (RFC 7386 §2).
//!
//! A non-object patch replaces the target outright. An object patch is
//! merged key by key: `null` deletes, anything else is merged recursively
//! into the current value, with a missing key treated as `null`. Arrays are
//! never merged element-wise.

use json_merge_util::clone;
use serde_json::{Map, Value};

/// Applies `patch` to `target` and returns the merged value.
///
/// `target` is consumed and its containers are reused for the result.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_merge::apply_patch;
///
/// let merged = apply_patch(
///     json!({"a": {"b": "c"}}),
///     &json!({"a": {"b": "d", "c": null}}),
/// );
/// assert_eq!(merged, json!({"a": {"b": "d"}}));
/// ```
pub fn apply_patch(mut target: Value, patch: &Value) -> Value {
    apply_patch_mut(&mut target, patch);
    target
}

/// Applies `patch` to `target` in place, writing into its existing nested
/// objects wherever both sides are objects.
pub fn apply_patch_mut(target: &mut Value, patch: &Value) {
    let Value::Object(patch_obj) = patch else {
        *target = clone(patch);
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::with_capacity(patch_obj.len()));
    }
    if let Value::Object(target_obj) = target {
        merge_object(target_obj, patch_obj);
    }
}

/// Merges the members of an object patch into `target`.
pub(crate) fn merge_object(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            // shift_remove keeps the remaining keys in their original order.
            target.shift_remove(key);
            continue;
        }
        match target.get_mut(key) {
            Some(slot) => apply_patch_mut(slot, value),
            None => {
                let mut slot = Value::Null;
                apply_patch_mut(&mut slot, value);
                target.insert(key.clone(), slot);
            }
        }
    }
}
