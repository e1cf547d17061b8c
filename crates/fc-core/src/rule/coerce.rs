//! Loose comparison and coercion between [`Value`]s.
//!
//! The legacy store compares constraint values with implicit coercion; here
//! the rules are written down once, driven by the *stored* (left) value's
//! type:
//!
//! - stored `Int`  → the other side must parse to the same integer;
//! - stored `Bool` → the other side's truthiness must match;
//! - stored `Str`  → the other side is stringified and compared
//!   (`Bool` stringifies as `1`/`0`).

use crate::object::Value;

/// Loose equality, `stored` driving the comparison type.
pub(crate) fn loose_eq(stored: &Value, other: &Value) -> bool {
    match stored {
        Value::Int(a) => to_int_opt(other) == Some(*a),
        Value::Bool(a) => *a == truthy(other),
        Value::Str(a) => *a == other.to_string(),
    }
}

/// Integer coercion: strings parse after trimming (unparsable → 0), booleans
/// coerce to 0/1.
pub(crate) fn to_int(value: &Value) -> i64 {
    match value {
        Value::Int(n) => *n,
        Value::Str(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
    }
}

fn to_int_opt(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Str(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
    }
}

/// Truthiness: non-zero integers, `true`, and any string except
/// `""`/`"0"`/`"false"`.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Str(s) => !matches!(s.trim(), "" | "0" | "false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_stored_parses_string() {
        assert!(loose_eq(&Value::Int(0), &Value::str("0")));
        assert!(loose_eq(&Value::Int(5), &Value::str(" 5 ")));
        assert!(!loose_eq(&Value::Int(5), &Value::str("five")));
    }

    #[test]
    fn bool_stored_uses_truthiness() {
        assert!(loose_eq(&Value::Bool(true), &Value::str("1")));
        assert!(loose_eq(&Value::Bool(false), &Value::str("0")));
        assert!(loose_eq(&Value::Bool(false), &Value::str("")));
        assert!(loose_eq(&Value::Bool(true), &Value::Int(7)));
    }

    #[test]
    fn str_stored_stringifies_other() {
        assert!(loose_eq(&Value::str("5"), &Value::Int(5)));
        assert!(loose_eq(&Value::str("1"), &Value::Bool(true)));
        assert!(!loose_eq(&Value::str("05"), &Value::Int(5)));
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(to_int(&Value::str("5")), 5);
        assert_eq!(to_int(&Value::str("nope")), 0);
        assert_eq!(to_int(&Value::Bool(true)), 1);
        assert_eq!(to_int(&Value::Int(-3)), -3);
    }
}
