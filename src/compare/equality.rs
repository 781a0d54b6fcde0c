//! Structural equality and partial matching of values.

use crate::value::Value;

/// Deep structural equality.
///
/// Maps are equal when they hold the same keys with equal values, in any
/// order. Lists are compared element by element. Integers and floats are
/// compared numerically.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => (*x as f64) == *y,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| deep_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Partial deep match: every key of an expected map must be present in the
/// actual map and match recursively. Extra actual keys are ignored. Other
/// values use [`deep_equal`].
pub fn is_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Map(actual), Value::Map(expected)) => expected
            .iter()
            .all(|(k, e)| actual.get(k).is_some_and(|a| is_match(a, e))),
        _ => deep_equal(actual, expected),
    }
}

/// Returns the first expected element that has no structurally equal
/// counterpart in `actual`. Order is irrelevant.
pub fn find_missing<'a>(actual: &[Value], expected: &'a [Value]) -> Option<&'a Value> {
    expected
        .iter()
        .find(|e| !actual.iter().any(|a| deep_equal(a, e)))
}
