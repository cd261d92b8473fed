//! Structural equality over JSON values.
//!
//! Used solely to gate props notification. Object comparison is independent
//! of key insertion order; array comparison is positional. Numbers compare
//! by value, so `1` and `1.0` are equal.

use serde_json::Value;

/// Order-independent structural equality.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(u, v)| structural_eq(u, v))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, u)| match y.get(key) {
                    Some(v) => structural_eq(u, v),
                    None => false,
                })
        }
        _ => false,
    }
}

fn number_eq(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(u), Some(v)) = (x.as_i64(), y.as_i64()) {
        return u == v;
    }
    if let (Some(u), Some(v)) = (x.as_u64(), y.as_u64()) {
        return u == v;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(u), Some(v)) => u == v,
        _ => false,
    }
}
