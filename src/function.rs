//! The functions an expression may call with `fn.<name>(...)`.
//!
//! The set of functions is fixed. A name that is not listed here is never
//! called, whatever the template contains, and evaluates to null:
//!
//! ```
//! use brace::{compile, Flags, Scope};
//!
//! let scope = Scope::new().with_must("name", "ahoj");
//!
//! assert_eq!(compile("{{fn.strtoupper(name)}}", &scope, Flags::empty()), "AHOJ");
//! assert_eq!(compile("{{fn.system(name)}}", &scope, Flags::empty()), "");
//! ```
//!
//! Every function declares how many arguments it accepts. A call with too few
//! or too many arguments, or with an argument of the wrong kind, fails, and a
//! failure evaluates to null as well:
//!
//! ```
//! use brace::{compile, Flags, Scope};
//!
//! assert_eq!(compile("Hi ({{fn.date()}})", &Scope::new(), Flags::empty()), "Hi ()");
//! ```
mod array;
mod date;
mod math;
mod string;

use crate::{
    log::{error_argument, error_arity, Error},
    value::{to_number, to_text, Numeric},
};
use serde_json::Value;

/// A function that can be called from an expression.
pub struct Builtin {
    /// Name used after `fn.`.
    pub name: &'static str,
    /// Least number of arguments accepted.
    pub min: usize,
    /// Greatest number of arguments accepted.
    pub max: usize,
    apply: fn(&Arguments) -> Result<Value, Error>,
}

impl Builtin {
    /// Call the function with already evaluated arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the number of arguments is outside of the
    /// accepted range, or the function itself fails.
    pub fn call(&self, values: Vec<Value>) -> Result<Value, Error> {
        if values.len() < self.min || values.len() > self.max {
            return Err(error_arity(self.name, self.min, self.max, values.len()));
        }

        (self.apply)(&Arguments {
            name: self.name,
            values,
        })
    }
}

const UNBOUNDED: usize = usize::MAX;

const BUILTINS: &[Builtin] = &[
    // Math
    builtin("round", 1, 2, math::round),
    builtin("rand", 0, 2, math::rand),
    builtin("pow", 2, 2, math::pow),
    builtin("floor", 1, 1, math::floor),
    builtin("abs", 1, 1, math::abs),
    // Date and time
    builtin("time", 0, 0, date::time),
    builtin("date", 1, 2, date::date),
    builtin("gmdate", 1, 2, date::gmdate),
    builtin("strtotime", 1, 2, date::strtotime),
    builtin("strtodate", 1, 2, date::strtodate),
    // Lists
    builtin("explode", 2, 3, array::explode),
    builtin("implode", 1, 2, array::implode),
    builtin("array_column", 2, 3, array::array_column),
    // Strings
    builtin("trim", 1, 2, string::trim),
    builtin("strlen", 1, 1, string::strlen),
    builtin("substr", 2, 3, string::substr),
    builtin("strpos", 2, 3, string::strpos),
    builtin("strstr", 2, 3, string::strstr),
    builtin("sprintf", 1, UNBOUNDED, string::sprintf),
    builtin("ucfirst", 1, 1, string::ucfirst),
    builtin("ucwords", 1, 2, string::ucwords),
    builtin("strtoupper", 1, 1, string::strtoupper),
    builtin("strtolower", 1, 1, string::strtolower),
    builtin("strip_tags", 1, 2, string::strip_tags),
    builtin("str_replace", 3, 3, string::str_replace),
    builtin("urlencode", 1, 1, string::urlencode),
    builtin("rawurlencode", 1, 1, string::rawurlencode),
];

const fn builtin(
    name: &'static str,
    min: usize,
    max: usize,
    apply: fn(&Arguments) -> Result<Value, Error>,
) -> Builtin {
    Builtin {
        name,
        min,
        max,
        apply,
    }
}

/// Return the function with the given name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Return true if a function with the given name may be called.
#[inline]
pub fn is_allowed(name: &str) -> bool {
    lookup(name).is_some()
}

/// Return the names of every function that may be called.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// Call the named function.
///
/// Any failure, including an unknown name, results in [`Value::Null`].
pub fn call(name: &str, values: Vec<Value>) -> Value {
    let Some(builtin) = lookup(name) else {
        tracing::debug!(name, "function is not allowed");
        return Value::Null;
    };

    match builtin.call(values) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(name, %error, help = error.help(), "function call failed");
            Value::Null
        }
    }
}

/// Arguments passed to a [`Builtin`], with conversions that fail with an
/// [`Error`] naming the function and the argument.
pub struct Arguments {
    name: &'static str,
    values: Vec<Value>,
}

impl Arguments {
    /// Return the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return true if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the name of the called function.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the argument at `index`, if it was given.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Return the arguments starting at `index`.
    pub fn rest(&self, index: usize) -> &[Value] {
        self.values.get(index..).unwrap_or_default()
    }

    /// Return the argument at `index` as text.
    pub fn text(&self, index: usize) -> Result<String, Error> {
        self.value(index)
            .and_then(to_text)
            .ok_or_else(|| error_argument(self.name, index, "text"))
    }

    /// Return the argument at `index` as text, if it was given.
    pub fn text_or_none(&self, index: usize) -> Result<Option<String>, Error> {
        self.optional(index, Self::text)
    }

    /// Return the argument at `index` as a number.
    pub fn number(&self, index: usize) -> Result<Numeric, Error> {
        self.value(index)
            .and_then(to_number)
            .ok_or_else(|| error_argument(self.name, index, "a number"))
    }

    /// Return the argument at `index` as a number, if it was given.
    pub fn number_or_none(&self, index: usize) -> Result<Option<Numeric>, Error> {
        self.optional(index, Self::number)
    }

    /// Return the argument at `index` as an integer, truncating a float.
    pub fn integer(&self, index: usize) -> Result<i64, Error> {
        match self.number(index)? {
            Numeric::Integer(integer) => Ok(integer),
            Numeric::Float(float) if float.is_finite() => Ok(float.trunc() as i64),
            Numeric::Float(_) => Err(error_argument(self.name, index, "a finite number")),
        }
    }

    /// Return the argument at `index` as an integer, if it was given.
    pub fn integer_or_none(&self, index: usize) -> Result<Option<i64>, Error> {
        self.optional(index, Self::integer)
    }

    /// Return the argument at `index` as a list.
    pub fn list(&self, index: usize) -> Result<&Vec<Value>, Error> {
        match self.value(index) {
            Some(Value::Array(list)) => Ok(list),
            _ => Err(error_argument(self.name, index, "a list")),
        }
    }

    fn optional<'a, T>(
        &'a self,
        index: usize,
        convert: fn(&'a Self, usize) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        match self.value(index) {
            Some(_) => convert(self, index).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub(crate) fn call_with(name: &str, values: Vec<Value>) -> Result<Value, Error> {
    lookup(name)
        .ok_or_else(|| Error::build("unknown function"))?
        .call(values)
}

#[cfg(test)]
mod tests {
    use super::{call, call_with, is_allowed, lookup, names};
    use crate::log::INVALID_ARITY;
    use serde_json::{json, Value};

    const WHITELIST: &[&str] = &[
        "round", "rand", "pow", "floor", "abs", "time", "date", "gmdate", "strtotime",
        "strtodate", "explode", "implode", "array_column", "trim", "strlen", "substr",
        "strpos", "strstr", "sprintf", "ucfirst", "ucwords", "strtoupper", "strtolower",
        "strip_tags", "str_replace", "urlencode", "rawurlencode",
    ];

    #[test]
    fn test_whitelist_is_exact() {
        let mut listed: Vec<_> = names().collect();
        let mut expected = WHITELIST.to_vec();
        listed.sort_unstable();
        expected.sort_unstable();

        assert_eq!(listed, expected);
    }

    #[test]
    fn test_unknown_names() {
        for name in ["system", "exec", "eval", "mb_strlen", "Round", "", "round "] {
            assert!(!is_allowed(name), "{name}");
            assert!(lookup(name).is_none());
            assert_eq!(call(name, vec![json!(1)]), Value::Null);
        }
    }

    #[test]
    fn test_arity() {
        let error = call_with("date", vec![]).unwrap_err();
        assert_eq!(error.reason(), INVALID_ARITY);

        assert!(call_with("time", vec![json!(1)]).is_err());
        assert!(call_with("str_replace", vec![json!("a"), json!("b")]).is_err());
        assert_eq!(call("pow", vec![json!(2)]), Value::Null);
    }

    #[test]
    fn test_argument_kinds() {
        assert!(call_with("strlen", vec![json!([1, 2])]).is_err());
        assert!(call_with("abs", vec![json!("ten")]).is_err());
        assert!(call_with("implode", vec![json!(","), json!("abc")]).is_err());
        assert_eq!(call("strlen", vec![json!(true)]), json!(1));
    }
}
