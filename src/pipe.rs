use crate::{encode::rawurlencode, engine::Flags, value::to_text};
use serde_json::Value;
use std::fmt::{Arguments, Result, Write};

/// Wraps the output buffer of a compile by providing methods that write
/// to it in different formats.
pub struct Pipe<'buffer> {
    buffer: &'buffer mut (dyn Write + 'buffer),
    flags: Flags,
}

impl<'buffer> Pipe<'buffer> {
    /// Create a new Pipe that writes to the given buffer.
    pub fn new(buffer: &'buffer mut String, flags: Flags) -> Self {
        Self { buffer, flags }
    }

    /// Write the given Value to the Pipe buffer.
    ///
    /// The Pipe will handle formatting the value. A value without a textual
    /// form, meaning a list or a map, is written as nothing at all. With
    /// [`Flags::USE_URLENCODE`] the text is percent-encoded first.
    ///
    /// # Errors
    ///
    /// The only error that will be returned is propagated from the
    /// underlying buffer.
    pub fn write_value(&mut self, value: &Value) -> Result {
        let text = to_text(value).unwrap_or_default();
        if self.flags.contains(Flags::USE_URLENCODE) {
            return self.buffer.write_str(&rawurlencode(&text));
        }

        self.buffer.write_str(&text)
    }
}

impl Write for Pipe<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result {
        Write::write_str(self.buffer, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> Result {
        Write::write_char(self.buffer, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
        Write::write_fmt(self.buffer, args)
    }
}

#[cfg(test)]
mod tests {
    use super::Pipe;
    use crate::engine::Flags;
    use serde_json::{json, Value};
    use std::fmt::Write;

    fn render(value: &Value, flags: Flags) -> String {
        let mut buffer = String::new();
        Pipe::new(&mut buffer, flags).write_value(value).unwrap();
        buffer
    }

    #[test]
    fn test_write_scalars() {
        assert_eq!(render(&json!("ahoj"), Flags::empty()), "ahoj");
        assert_eq!(render(&json!(1833), Flags::empty()), "1833");
        assert_eq!(render(&json!(true), Flags::empty()), "1");
        assert_eq!(render(&json!(false), Flags::empty()), "");
        assert_eq!(render(&Value::Null, Flags::empty()), "");
    }

    #[test]
    fn test_write_composites_as_nothing() {
        assert_eq!(render(&json!([1, 2]), Flags::empty()), "");
        assert_eq!(render(&json!({"a": "b"}), Flags::USE_URLENCODE), "");
    }

    #[test]
    fn test_write_urlencoded() {
        assert_eq!(
            render(&json!("Jakub Miškech"), Flags::USE_URLENCODE),
            "Jakub%20Mi%C5%A1kech"
        );
    }

    #[test]
    fn test_write_raw_text_is_untouched() {
        let mut buffer = String::new();
        let mut pipe = Pipe::new(&mut buffer, Flags::USE_URLENCODE);
        pipe.write_str("a b").unwrap();
        pipe.write_value(&json!("c d")).unwrap();

        assert_eq!(buffer, "a bc%20d");
    }
}
