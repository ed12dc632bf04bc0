//! Character-level scanning shared by the splitter, the call recognizer and
//! the path resolver.
use std::borrow::Cow;

/// Return true if the character opens a quoted literal.
#[inline]
pub fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Scan the quoted literal whose opening quote sits at `open`.
///
/// A backslash escapes the character after it, so `\'` and `\"` never end
/// the literal. Returns the index just past the closing quote, or `None` if
/// the literal runs to the end of `source`.
pub fn scan_quoted(source: &str, open: usize) -> Option<usize> {
    let mut chars = source[open..].char_indices();
    let (_, quote) = chars.next()?;
    let mut escaped = false;

    for (index, c) in chars {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(open + index + c.len_utf8());
        }
    }

    None
}

/// Return the index of the bracket closing the one at `open`.
///
/// Parentheses and square brackets share one depth counter, and anything
/// inside a quoted literal is skipped. Returns `None` when the bracket is
/// never closed.
pub fn find_closing(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut index = open;

    while let Some(c) = source[index..].chars().next() {
        match c {
            c if is_quote(c) => {
                index = scan_quoted(source, index)?;
                continue;
            }
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
        index += c.len_utf8();
    }

    None
}

/// Remove every layer of parentheses that encloses the whole expression.
///
/// # Examples
///
/// ```
/// use brace::compile::scan::strip_group;
///
/// assert_eq!(strip_group(" ((1 + 2)) "), "1 + 2");
/// assert_eq!(strip_group("(1) + (2)"), "(1) + (2)");
/// ```
pub fn strip_group(source: &str) -> &str {
    let mut text = source.trim();
    while text.starts_with('(') && find_closing(text, 0) == Some(text.len() - 1) {
        text = text[1..text.len() - 1].trim();
    }

    text
}

/// Remove whitespace that is not inside a quoted literal.
pub fn strip_whitespace(source: &str) -> Cow<'_, str> {
    if !source.chars().any(char::is_whitespace) {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut index = 0;
    while let Some(c) = source[index..].chars().next() {
        if is_quote(c) {
            let end = scan_quoted(source, index).unwrap_or(source.len());
            out.push_str(&source[index..end]);
            index = end;
            continue;
        }
        if !c.is_whitespace() {
            out.push(c);
        }
        index += c.len_utf8();
    }

    Cow::Owned(out)
}

/// Return the content of a quoted literal that spans all of `source`,
/// with escaped quotes and backslashes resolved.
///
/// # Examples
///
/// ```
/// use brace::compile::scan::unquote;
///
/// assert_eq!(unquote(r"'it\'s'").as_deref(), Some("it's"));
/// assert_eq!(unquote("'a' + 'b'"), None);
/// ```
pub fn unquote(source: &str) -> Option<String> {
    let quote = source.chars().next().filter(|c| is_quote(*c))?;
    if scan_quoted(source, 0)? != source.len() {
        return None;
    }

    let inner = &source[1..source.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if next == quote || next == '\\' => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_quoted() {
        assert_eq!(scan_quoted("'abc' + 1", 0), Some(5));
        assert_eq!(scan_quoted(r#"x "a\"b" y"#, 2), Some(8));
        assert_eq!(scan_quoted("'abc", 0), None);
        assert_eq!(scan_quoted(r"'abc\'", 0), None);
    }

    #[test]
    fn test_find_closing() {
        assert_eq!(find_closing("(1 + (2)) * 3", 0), Some(8));
        assert_eq!(find_closing("a[b[0]]", 1), Some(6));
        assert_eq!(find_closing("(')')", 0), Some(4));
        assert_eq!(find_closing("((1)", 0), None);
    }

    #[test]
    fn test_strip_group_unbalanced() {
        assert_eq!(strip_group("(1"), "(1");
        assert_eq!(strip_group("()"), "");
        assert_eq!(strip_group("('(')"), "'('");
    }

    #[test]
    fn test_strip_whitespace_keeps_quotes() {
        assert_eq!(strip_whitespace("object . name"), "object.name");
        assert_eq!(strip_whitespace("3 334"), "3334");
        assert_eq!(
            strip_whitespace("fn.sprintf( 'Test %s' , x )"),
            "fn.sprintf('Test %s',x)"
        );
        assert!(matches!(strip_whitespace("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'ahoj'").as_deref(), Some("ahoj"));
        assert_eq!(unquote(r#""say \"hi\"""#).as_deref(), Some(r#"say "hi""#));
        assert_eq!(unquote(r"'a\\b'").as_deref(), Some(r"a\b"));
        assert_eq!(unquote(r"'a\nb'").as_deref(), Some(r"a\nb"));
        assert_eq!(unquote("''").as_deref(), Some(""));
        assert_eq!(unquote("'open"), None);
        assert_eq!(unquote("plain"), None);
    }
}
