use crate::{
    compile::{CompileResult, Template},
    pipe::Pipe,
    render::Renderer,
    scope::Scope,
    syntax::Builder,
};
use bitflags::bitflags;
use morel::{Finder, Syntax};
use std::fmt::Write;

bitflags! {
    /// Options that change how a compile renders its output.
    ///
    /// An integer bitmask converts with [`Flags::from_bits_truncate`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Flags: u32 {
        /// Percent-encode the text of every token, with a space as `%20`.
        const USE_URLENCODE = 1;
    }
}

/// Facilitates compiling templates with a fixed delimiter syntax.
///
/// The markers are compiled into a [`Finder`] once, when the engine is
/// created, and reused by every compile.
pub struct Engine {
    /// Compiled [`Finder`] used to search for markers.
    finder: Finder,
    /// Flags applied to every compile.
    flags: Flags,
}

impl Engine {
    /// Create a new instance of [`Engine`] with the given `Syntax`.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{syntax::Builder, Engine, Scope};
    ///
    /// let syntax = Builder::new().with_expression("<%", "%>").to_syntax();
    /// let engine = Engine::new(syntax);
    /// let result = engine.compile("Hi <%name%>", &Scope::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.output(), "Hi taylor");
    /// ```
    #[inline]
    pub fn new(syntax: Syntax) -> Self {
        Self {
            finder: Finder::new(syntax),
            flags: Flags::empty(),
        }
    }

    /// Set the [`Flags`] used by every compile.
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    #[inline]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.set_flags(flags);

        self
    }

    /// Set the [`Flags`] used by every compile.
    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Return the [`Flags`] used by every compile.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Compile a template against a [`Scope`].
    ///
    /// Compiling never fails. Text outside of the tokens is copied as it is,
    /// and a token that cannot be evaluated renders as an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{Engine, Scope};
    ///
    /// let scope = Scope::new().with_must("name", "taylor");
    /// let result = Engine::default().compile("hello, {{ name }}!", &scope);
    ///
    /// assert_eq!(result.output(), "hello, taylor!");
    /// assert_eq!(result.used_paths(), ["name"]);
    /// ```
    pub fn compile(&self, template: &str, scope: &Scope) -> CompileResult {
        let template = Template::parse(template, &self.finder);
        let _span = tracing::trace_span!(
            "compile",
            length = template.source.len(),
            tokens = template.tokens.len()
        )
        .entered();

        let mut renderer = Renderer::new(scope);
        let mut output = String::with_capacity(template.source.len());
        let single = template.is_single();
        let mut value = None;
        let mut pipe = Pipe::new(&mut output, self.flags);
        let mut cursor = 0;

        for token in &template.tokens {
            let inner = token.inner.literal(template.source);
            let result = renderer.evaluate(inner);
            tracing::trace!(expression = inner, ?result, "evaluated token");

            // Writing into a String never fails.
            let _ = pipe.write_str(&template.source[cursor..token.outer.begin]);
            let _ = pipe.write_value(&result);
            cursor = token.outer.end;

            if single {
                value = Some(result);
            }
        }
        let _ = pipe.write_str(&template.source[cursor..]);

        CompileResult {
            output,
            used_paths: renderer.into_used_paths(),
            value,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Builder::new().to_syntax())
    }
}
