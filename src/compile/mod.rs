//! Breaking a template and its expressions into pieces.
//!
//! Expressions are never turned into a syntax tree. Each precedence level
//! splits the text it receives with [`split::split`] and hands the pieces to
//! the next level, so the lexical helpers here are shared by every level of
//! the evaluator.
pub mod call;
pub mod scan;
pub mod split;

mod result;
mod template;

pub use result::CompileResult;
pub use template::{Template, Token};

use crate::{engine::Engine, scope::Scope, Flags};
use std::fmt::Display;

/// Symbols of the ternary conditional.
pub const TERNARY: &[&str] = &["?", ":"];
/// Symbols of the logical operators.
pub const LOGICAL: &[&str] = &["&&", "||"];
/// Symbols of the comparison operators, longest first.
pub const COMPARISON: &[&str] = &["===", "!==", "==", "!=", "<>", ">=", "<=", ">", "<"];
/// Symbols of the arithmetic operators.
pub const ARITHMETIC: &[&str] = &["*", "/", "+", "-"];
/// Separator of function arguments.
pub const ARGUMENT: &[&str] = &[","];

/// Compile a template against a [`Scope`].
///
/// Provides a shortcut to compile with the default `{{ }}` delimiters without
/// creating an [`Engine`].
///
/// # Examples
///
/// ```
/// use brace::{compile, Flags, Scope};
///
/// let scope = Scope::new().with_must("variable", "ahoj");
/// let result = compile("Hi ({{variable}})", &scope, Flags::empty());
///
/// assert_eq!(result.output(), "Hi (ahoj)");
/// ```
pub fn compile(template: &str, scope: &Scope, flags: Flags) -> CompileResult {
    Engine::default().with_flags(flags).compile(template, scope)
}

/// Operators recognized by the evaluator.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Operator {
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
    /// ===
    Identical,
    /// !==
    NotIdentical,
    /// ==
    Equal,
    /// != or <>
    NotEqual,
    /// >
    Greater,
    /// <
    Lesser,
    /// >=
    GreaterOrEqual,
    /// <=
    LesserOrEqual,
    /// &&
    And,
    /// ||
    Or,
}

impl Operator {
    /// Return the [`Operator`] written as `symbol`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let operator = match symbol {
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "*" => Operator::Multiply,
            "/" => Operator::Divide,
            "===" => Operator::Identical,
            "!==" => Operator::NotIdentical,
            "==" => Operator::Equal,
            "!=" | "<>" => Operator::NotEqual,
            ">" => Operator::Greater,
            "<" => Operator::Lesser,
            ">=" => Operator::GreaterOrEqual,
            "<=" => Operator::LesserOrEqual,
            "&&" => Operator::And,
            "||" => Operator::Or,
            _ => return None,
        };

        Some(operator)
    }

    /// Return true if `*` or `/`, which bind tighter than `+` and `-`.
    #[inline]
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Subtract => write!(f, "-"),
            Operator::Multiply => write!(f, "*"),
            Operator::Divide => write!(f, "/"),
            Operator::Identical => write!(f, "==="),
            Operator::NotIdentical => write!(f, "!=="),
            Operator::Equal => write!(f, "=="),
            Operator::NotEqual => write!(f, "!="),
            Operator::Greater => write!(f, ">"),
            Operator::Lesser => write!(f, "<"),
            Operator::GreaterOrEqual => write!(f, ">="),
            Operator::LesserOrEqual => write!(f, "<="),
            Operator::And => write!(f, "&&"),
            Operator::Or => write!(f, "||"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Operator, ARITHMETIC, COMPARISON, LOGICAL};

    #[test]
    fn test_every_symbol_is_an_operator() {
        for symbol in ARITHMETIC.iter().chain(COMPARISON).chain(LOGICAL) {
            assert!(Operator::from_symbol(symbol).is_some(), "{symbol}");
        }
        assert_eq!(Operator::from_symbol("<>"), Some(Operator::NotEqual));
        assert_eq!(Operator::from_symbol("?"), None);
    }

    #[test]
    fn test_display_round_trip() {
        for symbol in ARITHMETIC.iter().chain(LOGICAL) {
            let operator = Operator::from_symbol(symbol).unwrap();
            assert_eq!(operator.to_string(), *symbol);
        }
    }
}
