use crate::value::Value;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result};

/// The outcome of compiling a template.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileResult {
    /// The rendered text.
    pub(crate) output: String,
    /// Every scope path looked up during the compile, in first-use order.
    pub(crate) used_paths: Vec<String>,
    /// The unrendered value of the only token, when the template is exactly
    /// one token.
    pub(crate) value: Option<Value>,
}

impl CompileResult {
    /// Return the rendered text.
    #[inline]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the [`CompileResult`] and return the rendered text.
    #[inline]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Return every scope path that was looked up, in the order it was first
    /// looked up.
    ///
    /// Paths are recorded as written, without whitespace, whether or not they
    /// resolved to a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{compile, Flags, Scope};
    ///
    /// let scope = Scope::new().with_must("a", false);
    /// let result = compile("{{ a && b }} {{ a }}", &scope, Flags::empty());
    ///
    /// assert_eq!(result.used_paths(), ["a"]);
    /// ```
    #[inline]
    pub fn used_paths(&self) -> &[String] {
        &self.used_paths
    }

    /// Return the unrendered value of the token, if the template (once
    /// trimmed) consists of exactly one token.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{compile, Flags, Scope};
    /// use serde_json::json;
    ///
    /// let scope = Scope::new().with_must("array", json!([{"name": "test"}]));
    /// let result = compile("{{array[0]}}", &scope, Flags::empty());
    ///
    /// assert_eq!(result.value(), Some(&json!({"name": "test"})));
    /// assert_eq!(result.output(), "");
    /// ```
    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl Display for CompileResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.output)
    }
}

/// A [`CompileResult`] serializes as its rendered text.
impl Serialize for CompileResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.output)
    }
}

impl PartialEq<str> for CompileResult {
    fn eq(&self, other: &str) -> bool {
        self.output == other
    }
}

impl PartialEq<&str> for CompileResult {
    fn eq(&self, other: &&str) -> bool {
        self.output == *other
    }
}
