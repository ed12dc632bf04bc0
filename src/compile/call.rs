use super::{scan::find_closing, split::split, ARGUMENT};
use crate::log::Error;

/// Prefix that marks a function call.
const PREFIX: &str = "fn.";

/// A function call recognized in an operand, `fn.<name>(<arguments>)<rest>`.
#[derive(Debug, PartialEq, Clone)]
pub struct Call<'source> {
    /// Name of the function.
    pub name: &'source str,
    /// Unevaluated argument expressions, trimmed, empty ones left out.
    pub arguments: Vec<&'source str>,
    /// Path or index syntax following the closing parenthesis, such as `[0]`
    /// or `.name`. Empty when the call stands alone.
    pub rest: &'source str,
}

impl<'source> Call<'source> {
    /// Recognize a function call at the beginning of `source`.
    ///
    /// Returns `None` when `source` is not shaped like a call at all, which
    /// leaves `fn.name` free to be read as an ordinary path. Returns an
    /// [`Error`] when it starts like a call but is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::compile::call::Call;
    ///
    /// let call = Call::parse("fn.explode(',', list)[1]").unwrap().unwrap();
    ///
    /// assert_eq!(call.name, "explode");
    /// assert_eq!(call.arguments, vec!["','", "list"]);
    /// assert_eq!(call.rest, "[1]");
    /// ```
    pub fn parse(source: &'source str) -> Option<Result<Self, Error>> {
        let body = source.strip_prefix(PREFIX)?;
        let open = body.find(|c: char| !is_ident_continue(c)).unwrap_or(body.len());
        if !body[open..].starts_with('(') {
            return None;
        }

        let name = &body[..open];
        if !name.chars().next().is_some_and(is_ident_start) {
            return Some(Err(Error::build("invalid function name")
                .with_help(format!("`{name}` is not a valid identifier"))));
        }

        let Some(close) = find_closing(body, open) else {
            return Some(Err(Error::build("unclosed function call")
                .with_help(format!("call to `{name}` is missing a closing `)`"))));
        };

        let rest = &body[close + 1..];
        if !rest.is_empty() && !rest.starts_with(['.', '[']) {
            return Some(Err(Error::build("unexpected text after function call")
                .with_help(format!("expected `.` or `[` after `{name}(...)`, found `{rest}`"))));
        }

        let arguments = split(&body[open + 1..close], ARGUMENT, false)
            .into_iter()
            .map(|piece| piece.as_str().trim())
            .filter(|argument| !argument.is_empty())
            .collect();

        Some(Ok(Call {
            name,
            arguments,
            rest,
        }))
    }
}

/// Return true if the given character is a recognized beginning identifier,
/// meaning '_' or an `xid_start`.
pub fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Return true if the given character is a recognized continue identifier,
/// meaning an `xid_continue`.
pub fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::Call;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> Call<'_> {
        Call::parse(source)
            .expect("source should be a call")
            .expect("call should be well formed")
    }

    #[test]
    fn test_parse_without_arguments() {
        let call = parse_ok("fn.time()");

        assert_eq!(call.name, "time");
        assert!(call.arguments.is_empty());
        assert_eq!(call.rest, "");
    }

    #[test]
    fn test_parse_nested_arguments() {
        let call = parse_ok("fn.date('H:i, s',fn.strtotime('today'))");

        assert_eq!(call.name, "date");
        assert_eq!(call.arguments, vec!["'H:i, s'", "fn.strtotime('today')"]);
    }

    #[test]
    fn test_parse_trailing_path() {
        assert_eq!(parse_ok("fn.array_column(rows,'name')[1].x").rest, "[1].x");
        assert_eq!(parse_ok("fn.x(a).name").rest, ".name");
    }

    #[test]
    fn test_not_a_call() {
        assert!(Call::parse("fn.name").is_none());
        assert!(Call::parse("object.fn(1)").is_none());
        assert!(Call::parse("'fn.x()'").is_none());
    }

    #[test]
    fn test_malformed_call() {
        assert!(Call::parse("fn.(1)").unwrap().is_err());
        assert!(Call::parse("fn.round(1").unwrap().is_err());
        assert!(Call::parse("fn.round(1)x").unwrap().is_err());
    }
}
