use super::Error;
use std::fmt::Display;

pub const INVALID_ARGUMENT: &str = "invalid argument";
pub const INVALID_ARITY: &str = "wrong number of arguments";
pub const INVALID_DATE: &str = "invalid date";
pub const INVALID_RESULT: &str = "invalid result";
pub const UNSERIALIZABLE: &str = "unserializable value";

/// Return an [`Error`] explaining that a function received the wrong number
/// of arguments.
pub fn error_arity(name: &str, min: usize, max: usize, received: usize) -> Error {
    let expected = match (min, max) {
        (min, max) if min == max => format!("`{min}`"),
        (min, usize::MAX) => format!("at least `{min}`"),
        (min, max) => format!("`{min}` to `{max}`"),
    };

    Error::build(INVALID_ARITY).with_help(format!(
        "function `{name}` expects {expected} argument(s), received `{received}`"
    ))
}

/// Return an [`Error`] explaining that the argument at `position` could not
/// be used as the expected kind of value.
pub fn error_argument<T>(name: &str, position: usize, expected: T) -> Error
where
    T: Display,
{
    Error::build(INVALID_ARGUMENT).with_help(format!(
        "argument `{}` of function `{name}` must be {expected}",
        position + 1
    ))
}

/// Return an [`Error`] explaining that a number could not be represented,
/// which happens with infinite or NaN results.
pub fn error_non_finite(name: &str) -> Error {
    Error::build(INVALID_RESULT).with_help(format!("function `{name}` produced a non-finite number"))
}
