use morel::Syntax;

/// Markers that identify expressions within text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Beginning of an expression, `{{` by default.
    BeginExpression = 0,
    /// End of an expression, `}}` by default.
    EndExpression = 1,
}

impl From<usize> for Marker {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::BeginExpression,
            1 => Self::EndExpression,
            _ => unreachable!("syntax only registers expression markers"),
        }
    }
}

impl From<Marker> for usize {
    fn from(k: Marker) -> Self {
        k as usize
    }
}

/// Provides methods to build a `Syntax`.
///
/// # Example
///
/// ```
/// use brace::syntax::Builder;
///
/// let syntax = Builder::new()
///     .with_expression("<%", "%>")
///     .to_syntax();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Builder<'marker> {
    expression: (&'marker str, &'marker str),
}

impl<'marker> Builder<'marker> {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` has default markers:
    ///
    /// ```text
    /// Expressions: {{ name }}
    /// ```
    ///
    /// To proceed with these defaults, you may immediately call `to_syntax` to receive the
    /// [`Syntax`] instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            expression: ("{{", "}}"),
        }
    }

    /// Set the expression markers.
    ///
    /// # Panics
    ///
    /// Panics if either marker is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::syntax::Builder;
    ///
    /// let mut builder = Builder::new();
    /// builder.set_expression("<%", "%>");
    /// ```
    #[inline]
    pub fn set_expression(&mut self, begin: &'marker str, end: &'marker str) {
        assert!(!begin.is_empty() && !end.is_empty(), "markers must not be empty");
        self.expression = (begin, end);
    }

    /// Set the expression markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    ///
    /// ```
    /// use brace::syntax::Builder;
    ///
    /// Builder::new()
    ///     .with_expression("<%", "%>");
    /// ```
    #[inline]
    pub fn with_expression(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_expression(begin, end);

        self
    }

    /// Return the expression markers.
    #[inline]
    pub fn expression(&self) -> (&'marker str, &'marker str) {
        self.expression
    }

    /// Return a Syntax instance from the markers in this [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::syntax::Builder;
    ///
    /// let syntax = Builder::new()
    ///     .with_expression("[[", "]]")
    ///     .to_syntax();
    /// ```
    pub fn to_syntax(self) -> Syntax {
        let (begin, end) = self.expression;

        Syntax::new(vec![
            (Marker::BeginExpression.into(), begin.into()),
            (Marker::EndExpression.into(), end.into()),
        ])
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Builder, Marker};

    #[test]
    fn test_marker_round_trip() {
        assert_eq!(Marker::from(usize::from(Marker::BeginExpression)), Marker::BeginExpression);
        assert_eq!(Marker::from(usize::from(Marker::EndExpression)), Marker::EndExpression);
    }

    #[test]
    fn test_default_expression() {
        assert_eq!(Builder::new().expression(), ("{{", "}}"));
        assert_eq!(
            Builder::new().with_expression("<%", "%>").expression(),
            ("<%", "%>")
        );
    }

    #[test]
    #[should_panic(expected = "markers must not be empty")]
    fn test_empty_marker() {
        Builder::new().with_expression("", "}}");
    }
}
