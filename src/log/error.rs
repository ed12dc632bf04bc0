use super::{RED, RESET};
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes an error, and allows adding a contextual help text.
///
/// Errors never escape an expression: a primitive function that fails returns
/// an [`Error`], which the dispatcher logs and turns into a null value. The
/// only public surface that returns an `Error` is scope construction.
///
/// # Examples
///
/// ```
/// use brace::Error;
///
/// let error = Error::build("invalid date")
///     .with_help("`strtotime` could not understand `next blursday`");
///
/// assert_eq!(error.reason(), "invalid date");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: invalid date
///   = help: `strtotime` could not understand `next blursday`
/// ```
#[derive(Clone)]
pub struct Error {
    /// Describes the cause of the [`Error`].
    reason: String,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Error;
    ///
    /// Error::build("function `substr` expects a string")
    ///     .with_help("lists and maps cannot be used as text");
    /// ```
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            reason: reason.into(),
            help: None,
        }
    }

    /// Set the reason text, which is a short summary of the [`Error`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = text.into();

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Error")
            .field("reason", &self.reason)
            .field("help", &self.help)
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if f.alternate() {
            write!(f, "{RED}error{RESET}: {}", self.reason)?;
            if let Some(help) = &self.help {
                write!(f, "\n  = help: {help}")?;
            }
            return Ok(());
        }

        write!(f, "error: {}", self.reason)
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason && self.help == other.help
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display_plain() {
        let error = Error::build("unknown function").with_help("ignored without `{:#}`");

        assert_eq!(error.to_string(), "error: unknown function");
    }

    #[test]
    fn test_display_alternate_includes_help() {
        let error = Error::build("unknown function").with_help("check the name");
        let printed = format!("{error:#}");

        assert!(printed.contains("unknown function"));
        assert!(printed.ends_with("= help: check the name"));
    }

    #[test]
    fn test_with_reason_overwrites() {
        let error = Error::build("").with_reason("something else");

        assert_eq!(error.reason(), "something else");
        assert_eq!(error.help(), None);
    }
}
