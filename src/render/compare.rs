use crate::{
    compile::Operator,
    value::{format_number, Numeric},
};
use serde_json::{Number, Value};
use std::{borrow::Cow, cmp::Ordering};

/// Return true if the given [`Value`] is truthy.
///
/// Null, `false`, zero, the empty string and empty lists and maps are falsy,
/// everything else is truthy. The string `"0"` is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(boolean) => *boolean,
        Value::Number(number) => !Numeric::from_number(number).is_zero(),
        Value::String(string) => !string.is_empty(),
        Value::Array(array) => !array.is_empty(),
        Value::Object(object) => !object.is_empty(),
    }
}

/// Compare the two [`Value`] instances with the given comparison [`Operator`].
///
/// Whitespace around string operands is ignored. Operators that do not
/// compare, such as `+`, result in [`Value::Null`].
pub fn compare(left: &Value, operator: Operator, right: &Value) -> Value {
    let left = trimmed(left);
    let right = trimmed(right);
    let (left, right) = (left.as_ref(), right.as_ref());

    let result = match operator {
        Operator::Identical => strict_equals(left, right),
        Operator::NotIdentical => !strict_equals(left, right),
        Operator::Equal => loose_equals(left, right),
        Operator::NotEqual => !loose_equals(left, right),
        Operator::Greater => loose_compare(left, right) == Some(Ordering::Greater),
        Operator::Lesser => loose_compare(left, right) == Some(Ordering::Less),
        Operator::GreaterOrEqual => matches!(
            loose_compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::LesserOrEqual => matches!(
            loose_compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Add
        | Operator::Subtract
        | Operator::Multiply
        | Operator::Divide
        | Operator::And
        | Operator::Or => return Value::Null,
    };

    Value::Bool(result)
}

/// Return true if the values are equal, converting between types.
///
/// # Examples
///
/// ```
/// use brace::render::loose_equals;
/// use serde_json::json;
///
/// assert!(loose_equals(&json!("10"), &json!(10.0)));
/// assert!(loose_equals(&json!(null), &json!("")));
/// assert!(loose_equals(&json!(true), &json!("0")));
/// assert!(!loose_equals(&json!("abc"), &json!(0)));
/// ```
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(string)) | (Value::String(string), Value::Null) => {
            string.is_empty()
        }
        (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
            is_truthy(left) == is_truthy(right)
        }
        (Value::Number(left), Value::Number(right)) => {
            compare_numeric(Numeric::from_number(left), Numeric::from_number(right))
                == Some(Ordering::Equal)
        }
        (Value::Number(number), Value::String(string))
        | (Value::String(string), Value::Number(number)) => {
            compare_number_to_string(number, string) == Some(Ordering::Equal)
        }
        (Value::String(left), Value::String(right)) => {
            compare_strings(left, right) == Ordering::Equal
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(l, r)| loose_equals(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, l)| right.get(key).is_some_and(|r| loose_equals(l, r)))
        }
        _ => false,
    }
}

/// Return true if the values have the same type and the same value.
///
/// Integers and floats are different types, and maps must list their keys
/// in the same order.
///
/// # Examples
///
/// ```
/// use brace::render::strict_equals;
/// use serde_json::json;
///
/// assert!(strict_equals(&json!(1), &json!(1)));
/// assert!(!strict_equals(&json!(1), &json!(1.0)));
/// assert!(!strict_equals(&json!("1"), &json!(1)));
/// ```
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            match (Numeric::from_number(left), Numeric::from_number(right)) {
                (Numeric::Integer(left), Numeric::Integer(right)) => left == right,
                (Numeric::Float(left), Numeric::Float(right)) => left == right,
                _ => false,
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(l, r)| strict_equals(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|((lk, lv), (rk, rv))| lk == rk && strict_equals(lv, rv))
        }
        (left, right) => left == right,
    }
}

/// Return the ordering of two values, converting between types.
///
/// Returns `None` when the values cannot be ordered, such as a list and a
/// map, or two maps with different keys.
pub fn loose_compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Array(left), Value::Array(right)) => {
            match left.len().cmp(&right.len()) {
                Ordering::Equal => {}
                unequal => return Some(unequal),
            }
            for (l, r) in left.iter().zip(right) {
                match loose_compare(l, r)? {
                    Ordering::Equal => {}
                    unequal => return Some(unequal),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Object(left), Value::Object(right)) => {
            match left.len().cmp(&right.len()) {
                Ordering::Equal => {}
                unequal => return Some(unequal),
            }
            for (key, l) in left {
                match loose_compare(l, right.get(key)?)? {
                    Ordering::Equal => {}
                    unequal => return Some(unequal),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Array(_), Value::Object(_)) | (Value::Object(_), Value::Array(_)) => None,
        (Value::Array(_) | Value::Object(_), _) => Some(Ordering::Greater),
        (_, Value::Array(_) | Value::Object(_)) => Some(Ordering::Less),
        (Value::Null, Value::String(string)) => Some("".cmp(string.as_str())),
        (Value::String(string), Value::Null) => Some(string.as_str().cmp("")),
        (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
            Some(is_truthy(left).cmp(&is_truthy(right)))
        }
        (Value::Number(left), Value::Number(right)) => {
            compare_numeric(Numeric::from_number(left), Numeric::from_number(right))
        }
        (Value::Number(number), Value::String(string)) => {
            compare_number_to_string(number, string)
        }
        (Value::String(string), Value::Number(number)) => {
            compare_number_to_string(number, string).map(Ordering::reverse)
        }
        (Value::String(left), Value::String(right)) => Some(compare_strings(left, right)),
    }
}

/// Compare two numbers, exactly when both are integers.
fn compare_numeric(left: Numeric, right: Numeric) -> Option<Ordering> {
    match (left, right) {
        (Numeric::Integer(left), Numeric::Integer(right)) => Some(left.cmp(&right)),
        (left, right) => left.as_f64().partial_cmp(&right.as_f64()),
    }
}

/// Compare a number to a string, numerically when the string is numeric and
/// as text otherwise.
fn compare_number_to_string(number: &Number, string: &str) -> Option<Ordering> {
    match Numeric::parse(string) {
        Some(parsed) => compare_numeric(Numeric::from_number(number), parsed),
        None => Some(format_number(number).as_str().cmp(string)),
    }
}

/// Compare two strings, numerically when both are numeric.
fn compare_strings(left: &str, right: &str) -> Ordering {
    match (Numeric::parse(left), Numeric::parse(right)) {
        (Some(l), Some(r)) => compare_numeric(l, r).unwrap_or_else(|| left.cmp(right)),
        _ => left.cmp(right),
    }
}

/// Return the value with surrounding whitespace removed if it is a string.
fn trimmed(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::String(string) if string.trim().len() != string.len() => {
            Cow::Owned(Value::String(string.trim().to_owned()))
        }
        value => Cow::Borrowed(value),
    }
}
