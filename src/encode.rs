//! Percent-encoding of rendered text.
use std::fmt::Write;

/// Percent-encode text following RFC 3986.
///
/// Only unreserved characters (`A-Z a-z 0-9 - _ . ~`) are kept, every other
/// byte of the UTF-8 encoding is written as `%XX`, so a space becomes `%20`.
///
/// # Examples
///
/// ```
/// use brace::encode::rawurlencode;
///
/// assert_eq!(rawurlencode("Jakub Miškech"), "Jakub%20Mi%C5%A1kech");
/// ```
pub fn rawurlencode(text: &str) -> String {
    encode(text, |byte| matches!(byte, b'-' | b'_' | b'.' | b'~'), false)
}

/// Percent-encode text the way HTML forms do.
///
/// Like [`rawurlencode`], except that `~` is encoded and a space becomes `+`.
///
/// # Examples
///
/// ```
/// use brace::encode::urlencode;
///
/// assert_eq!(urlencode("Jakub Miškech"), "Jakub+Mi%C5%A1kech");
/// ```
pub fn urlencode(text: &str) -> String {
    encode(text, |byte| matches!(byte, b'-' | b'_' | b'.'), true)
}

fn encode(text: &str, keep: impl Fn(u8) -> bool, plus_for_space: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if byte.is_ascii_alphanumeric() || keep(byte) {
            out.push(byte as char);
        } else if byte == b' ' && plus_for_space {
            out.push('+');
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "%{byte:02X}");
        }
    }

    out
}
