use super::scan::{is_quote, scan_quoted};

/// A piece of an expression produced by [`split`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Piece<'source> {
    /// Text between two operators.
    Operand(&'source str),
    /// An operator symbol that was matched at the top level.
    Operator(&'source str),
}

impl<'source> Piece<'source> {
    /// Return the text of the piece.
    #[inline]
    pub fn as_str(&self) -> &'source str {
        match self {
            Piece::Operand(text) | Piece::Operator(text) => text,
        }
    }

    /// Return true if the piece is an operand made only of whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, Piece::Operand(text) if text.trim().is_empty())
    }
}

/// Split `source` at every top-level occurrence of one of `operators`.
///
/// Top level means outside of parentheses and square brackets, and outside of
/// single- or double-quoted literals. At each position the operators are
/// tried in the given order, so longer symbols that share a prefix with
/// shorter ones must be listed first.
///
/// When `keep` is true the matched operators are part of the output and the
/// pieces alternate, beginning and ending with an operand. Otherwise only the
/// operands are returned.
///
/// An unbalanced closing bracket never drops the depth below zero, and an
/// unterminated quoted literal runs to the end of the source.
///
/// # Examples
///
/// ```
/// use brace::compile::split::{split, Piece};
///
/// let pieces = split("a + fn.pow(2, 3) - 'x-y'", &["+", "-"], true);
///
/// assert_eq!(
///     pieces,
///     vec![
///         Piece::Operand("a "),
///         Piece::Operator("+"),
///         Piece::Operand(" fn.pow(2, 3) "),
///         Piece::Operator("-"),
///         Piece::Operand(" 'x-y'"),
///     ]
/// );
/// ```
pub fn split<'source>(source: &'source str, operators: &[&str], keep: bool) -> Vec<Piece<'source>> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut index = 0;

    'scan: while let Some(c) = source[index..].chars().next() {
        if is_quote(c) {
            index = scan_quoted(source, index).unwrap_or(source.len());
            continue;
        }

        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                for operator in operators {
                    if source[index..].starts_with(operator) {
                        let end = index + operator.len();
                        pieces.push(Piece::Operand(&source[start..index]));
                        if keep {
                            pieces.push(Piece::Operator(&source[index..end]));
                        }
                        start = end;
                        index = end;
                        continue 'scan;
                    }
                }
            }
            _ => {}
        }
        index += c.len_utf8();
    }
    pieces.push(Piece::Operand(&source[start..]));

    pieces
}

/// Join pieces back into a single string.
pub fn join(pieces: &[Piece]) -> String {
    pieces.iter().map(Piece::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::{join, split, Piece};
    use pretty_assertions::assert_eq;

    const COMPARISON: &[&str] = &["===", "!==", "==", "!=", "<>", ">=", "<=", ">", "<"];

    #[test]
    fn test_split_without_operators() {
        assert_eq!(split("name", &["+"], true), vec![Piece::Operand("name")]);
        assert_eq!(split("", &["+"], true), vec![Piece::Operand("")]);
    }

    #[test]
    fn test_split_keeps_operators() {
        assert_eq!(
            split("1+2*3", &["*", "+"], true),
            vec![
                Piece::Operand("1"),
                Piece::Operator("+"),
                Piece::Operand("2"),
                Piece::Operator("*"),
                Piece::Operand("3"),
            ]
        );
    }

    #[test]
    fn test_split_discards_operators() {
        assert_eq!(
            split("',', list, fn.x(a, b)", &[","], false),
            vec![
                Piece::Operand("','"),
                Piece::Operand(" list"),
                Piece::Operand(" fn.x(a, b)"),
            ]
        );
    }

    #[test]
    fn test_split_longest_match() {
        assert_eq!(
            split("a !== b", COMPARISON, true),
            vec![
                Piece::Operand("a "),
                Piece::Operator("!=="),
                Piece::Operand(" b"),
            ]
        );
        assert_eq!(
            split("a<>b", COMPARISON, true),
            vec![Piece::Operand("a"), Piece::Operator("<>"), Piece::Operand("b")]
        );
    }

    #[test]
    fn test_split_leading_operator() {
        assert_eq!(
            split("-3", &["-"], true),
            vec![Piece::Operand(""), Piece::Operator("-"), Piece::Operand("3")]
        );
    }

    #[test]
    fn test_split_respects_depth() {
        assert_eq!(split("(1 + 2", &["+"], true), vec![Piece::Operand("(1 + 2")]);
        assert_eq!(split("a[b - 1]", &["-"], true), vec![Piece::Operand("a[b - 1]")]);
        assert_eq!(
            split("(1)) + 2", &["+"], true),
            vec![Piece::Operand("(1)) "), Piece::Operator("+"), Piece::Operand(" 2")]
        );
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split(r"'a \' + b' + c", &["+"], true),
            vec![
                Piece::Operand(r"'a \' + b' "),
                Piece::Operator("+"),
                Piece::Operand(" c"),
            ]
        );
        assert_eq!(split("'a + b", &["+"], true), vec![Piece::Operand("'a + b")]);
        assert_eq!(
            split(r#""x ? y" ? a : b"#, &["?", ":"], true).len(),
            5
        );
    }

    #[test]
    fn test_join_reconstructs() {
        let source = "a && (b || c) || 'd && e'";
        assert_eq!(join(&split(source, &["&&", "||"], true)), source);
    }

    #[test]
    fn test_is_blank() {
        assert!(Piece::Operand("  ").is_blank());
        assert!(Piece::Operand("").is_blank());
        assert!(!Piece::Operand(" a ").is_blank());
        assert!(!Piece::Operator("&&").is_blank());
    }
}
