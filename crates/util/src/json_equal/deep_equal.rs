use serde_json::{Number, Value};

/// Performs a deep equality check between two JSON values.
///
/// Values are compared by variant and content, recursively:
/// - Primitives (null, bool, string) compare by value
/// - Numbers compare numerically, see [`numbers_equal`]
/// - Arrays compare element by element, in order
/// - Objects compare key by key; key order is ignored
///
/// Every pair of values yields a definite answer.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_merge_util::json_equal::deep_equal;
///
/// let a = json!({"foo": [1, 2, 3], "bar": {"x": 1}});
/// let b = json!({"bar": {"x": 1.0}, "foo": [1, 2, 3]});
/// let c = json!({"foo": [1, 2, 4], "bar": {"x": 1}});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        // Arrays
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        // Objects
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        // Different types are never equal
        _ => false,
    }
}

/// Compares two JSON numbers by numeric value.
///
/// Integers compare exactly. Floats compare as `f64`. An integer equals a
/// float only when the float is integral and holds exactly that integer,
/// so `1` equals `1.0` but `9007199254740993` does not equal
/// `9007199254740992.0`.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_of(a), integer_of(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(i), None) => b.as_f64().and_then(integral_float) == Some(i),
        (None, Some(i)) => a.as_f64().and_then(integral_float) == Some(i),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn integer_of(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// Every i64 and u64 lies well inside this range, so anything outside it
// cannot match an integer.
const INTEGRAL_BOUND: f64 = 1.8446744073709552e19;

fn integral_float(f: f64) -> Option<i128> {
    if f.fract() == 0.0 && f.abs() <= INTEGRAL_BOUND {
        Some(f as i128)
    } else {
        None
    }
}
