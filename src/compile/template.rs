use crate::{region::Region, syntax::Marker};
use morel::Finder;

/// An expression token found in a template.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Token {
    /// Region spanning the token, delimiters included.
    pub outer: Region,
    /// Region spanning the expression between the delimiters.
    pub inner: Region,
}

/// A template split into its expression tokens.
///
/// Text outside of the tokens is never interpreted and is copied to the
/// output as it is.
#[derive(Debug, Clone)]
pub struct Template<'source> {
    /// Reference to the source data from which this [`Template`] was generated.
    pub source: &'source str,
    /// Tokens in the order they appear in the source.
    pub tokens: Vec<Token>,
}

impl<'source> Template<'source> {
    /// Find every expression token in `source`.
    ///
    /// Tokens do not nest: when a second beginning marker shows up before the
    /// first one is closed, the first one is treated as plain text. A
    /// beginning marker that is never closed is plain text as well.
    pub fn parse(source: &'source str, finder: &Finder) -> Self {
        let mut tokens = Vec::new();
        let mut open: Option<Region> = None;
        let mut cursor = 0;

        while let Some((id, begin, end)) = finder.next(source, cursor) {
            match Marker::from(id) {
                Marker::BeginExpression => open = Some((begin..end).into()),
                Marker::EndExpression => {
                    if let Some(marker) = open.take() {
                        tokens.push(Token {
                            outer: (marker.begin..end).into(),
                            inner: (marker.end..begin).into(),
                        });
                    }
                }
            }
            cursor = end;
        }

        Self { source, tokens }
    }

    /// Return true if the source, once trimmed, is exactly one token.
    pub fn is_single(&self) -> bool {
        match self.tokens.as_slice() {
            [token] => token.outer.spans_trimmed(self.source),
            _ => false,
        }
    }
}
