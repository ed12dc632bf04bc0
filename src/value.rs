//! The value tree a template is evaluated against, and the named conversions
//! used whenever one kind of value has to stand in for another.
pub use serde_json::{Map, Number, Value};

/// Significant digits used when rendering a float.
const FLOAT_PRECISION: usize = 14;

/// A number as arithmetic sees it.
///
/// Integers stay integers for as long as an operation is exact, everything
/// else is carried as a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    /// Parse a numeric literal.
    ///
    /// Accepts an optional sign, digits, an optional fraction introduced by
    /// either `.` or `,`, and an optional exponent. Surrounding whitespace is
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::value::Numeric;
    ///
    /// assert_eq!(Numeric::parse("42"), Some(Numeric::Integer(42)));
    /// assert_eq!(Numeric::parse("4,5"), Some(Numeric::Float(4.5)));
    /// assert_eq!(Numeric::parse("4,5,6"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let bytes = text.as_bytes();
        let digits = |mut i: usize| {
            let from = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            (i, i - from)
        };

        let mut i = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            i += 1;
        }
        let (next, whole) = digits(i);
        i = next;

        let mut fraction = 0;
        let mut is_float = false;
        if matches!(bytes.get(i), Some(b'.' | b',')) {
            is_float = true;
            (i, fraction) = digits(i + 1);
        }
        if whole + fraction == 0 {
            return None;
        }

        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            is_float = true;
            i += 1;
            if matches!(bytes.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            let (next, exponent) = digits(i);
            if exponent == 0 {
                return None;
            }
            i = next;
        }
        if i != bytes.len() {
            return None;
        }

        let normalized = text.replace(',', ".");
        if !is_float {
            if let Ok(integer) = normalized.parse::<i64>() {
                return Some(Numeric::Integer(integer));
            }
        }

        normalized
            .parse::<f64>()
            .ok()
            .filter(|float| float.is_finite())
            .map(Numeric::Float)
    }

    /// Convert a [`Number`] into a [`Numeric`].
    pub fn from_number(number: &Number) -> Self {
        match number.as_i64() {
            Some(integer) => Numeric::Integer(integer),
            None => Numeric::Float(number.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Return the value as a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(integer) => integer as f64,
            Numeric::Float(float) => float,
        }
    }

    /// Return true if the value is zero.
    pub fn is_zero(self) -> bool {
        match self {
            Numeric::Integer(integer) => integer == 0,
            Numeric::Float(float) => float == 0.0,
        }
    }

    /// Convert into a [`Value`].
    ///
    /// Non-finite floats have no JSON representation and become [`Value::Null`].
    pub fn into_value(self) -> Value {
        match self {
            Numeric::Integer(integer) => Value::Number(integer.into()),
            Numeric::Float(float) => Number::from_f64(float)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

/// Return the number a [`Value`] stands for, if any.
///
/// Booleans count as `0` and `1`, strings must be numeric literals. Null,
/// lists and maps have no number.
pub fn to_number(value: &Value) -> Option<Numeric> {
    match value {
        Value::Bool(boolean) => Some(Numeric::Integer(*boolean as i64)),
        Value::Number(number) => Some(Numeric::from_number(number)),
        Value::String(string) => Numeric::parse(string),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Return the textual form of a [`Value`], if it has one.
///
/// Null renders as an empty string and booleans as `1` or an empty string.
/// Lists and maps have no textual form.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_owned()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(number) => Some(format_number(number)),
        Value::String(string) => Some(string.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Return the map key or list index a [`Value`] addresses, if any.
///
/// Floats are truncated toward zero and booleans become `0` or `1`.
pub fn to_key(value: &Value) -> Option<String> {
    match value {
        Value::String(string) => Some(string.clone()),
        Value::Bool(boolean) => Some((*boolean as u8).to_string()),
        Value::Number(number) => match Numeric::from_number(number) {
            Numeric::Integer(integer) => Some(integer.to_string()),
            Numeric::Float(float) => Some((float.trunc() as i64).to_string()),
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render a [`Number`] as text.
pub fn format_number(number: &Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(unsigned) = number.as_u64() {
        return unsigned.to_string();
    }

    format_float(number.as_f64().unwrap_or_default())
}

/// Render a float with [`FLOAT_PRECISION`] significant digits.
///
/// Integral values print without a fractional part, and trailing zeros are
/// removed.
///
/// # Examples
///
/// ```
/// use brace::value::format_float;
///
/// assert_eq!(format_float(10.0), "10");
/// assert_eq!(format_float(0.0124 * 100.0), "1.24");
/// ```
pub fn format_float(float: f64) -> String {
    if float == float.trunc() && float.abs() < 1e15 {
        return format!("{}", float as i64);
    }

    let rounded = format!("{:.*e}", FLOAT_PRECISION - 1, float)
        .parse::<f64>()
        .unwrap_or(float);

    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_integer_and_float() {
        assert_eq!(Numeric::parse("10"), Some(Numeric::Integer(10)));
        assert_eq!(Numeric::parse(" -3 "), Some(Numeric::Integer(-3)));
        assert_eq!(Numeric::parse("3.5"), Some(Numeric::Float(3.5)));
        assert_eq!(Numeric::parse(".5"), Some(Numeric::Float(0.5)));
        assert_eq!(Numeric::parse("1e3"), Some(Numeric::Float(1000.0)));
        assert_eq!(
            Numeric::parse("99999999999999999999"),
            Some(Numeric::Float(1e20))
        );
    }

    #[test]
    fn test_parse_rejects() {
        for text in ["", "-", ".", "abc", "1a", "1e", "1..2", "1 2", "0x10"] {
            assert_eq!(Numeric::parse(text), None, "{text:?}");
        }
    }

    #[test]
    fn test_into_value_non_finite() {
        assert_eq!(Numeric::Float(f64::INFINITY).into_value(), Value::Null);
        assert_eq!(Numeric::Float(f64::NAN).into_value(), Value::Null);
        assert_eq!(Numeric::Integer(3).into_value(), json!(3));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(true)), Some(Numeric::Integer(1)));
        assert_eq!(to_number(&json!("10.3")), Some(Numeric::Float(10.3)));
        assert_eq!(to_number(&json!("ten")), None);
        assert_eq!(to_number(&json!([1])), None);
        assert_eq!(to_number(&Value::Null), None);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&Value::Null).as_deref(), Some(""));
        assert_eq!(to_text(&json!(true)).as_deref(), Some("1"));
        assert_eq!(to_text(&json!(false)).as_deref(), Some(""));
        assert_eq!(to_text(&json!(10.4)).as_deref(), Some("10.4"));
        assert_eq!(to_text(&json!([1, 2])), None);
        assert_eq!(to_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_to_key() {
        assert_eq!(to_key(&json!("title")).as_deref(), Some("title"));
        assert_eq!(to_key(&json!(2)).as_deref(), Some("2"));
        assert_eq!(to_key(&json!(2.9)).as_deref(), Some("2"));
        assert_eq!(to_key(&json!(true)).as_deref(), Some("1"));
        assert_eq!(to_key(&Value::Null), None);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(10.4), "10.4");
        assert_eq!(format_float(-2.0), "-2");
        assert_eq!(format_float(21.630000000000003), "21.63");
        assert_eq!(format_float(3309.3333333333335), "3309.3333333333");
    }
}
