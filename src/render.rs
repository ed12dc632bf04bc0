mod arithmetic;
mod compare;
mod path;

pub use compare::{compare, is_truthy, loose_compare, loose_equals, strict_equals};

use crate::{
    compile::{
        call::Call,
        scan::{strip_group, strip_whitespace, unquote},
        split::{split, Piece},
        Operator, ARITHMETIC, COMPARISON, LOGICAL, TERNARY,
    },
    function,
    scope::Scope,
    value::{to_number, Numeric},
};
use serde_json::Value;

/// Evaluates the expressions of a single compile against a [`Scope`].
///
/// Expressions are evaluated straight from their text. Every precedence level
/// splits the text it receives at its own operators and evaluates the pieces,
/// so an operand is itself a complete expression that can be evaluated again.
/// Any malformed expression evaluates to [`Value::Null`].
pub struct Renderer<'scope> {
    /// The Scope that expressions are evaluated against.
    scope: &'scope Scope,
    /// Every scope path looked up so far, in the order of the first lookup.
    used: Vec<String>,
}

impl<'scope> Renderer<'scope> {
    /// Create a new Renderer.
    pub fn new(scope: &'scope Scope) -> Self {
        Self {
            scope,
            used: Vec::new(),
        }
    }

    /// Consume the Renderer and return the scope paths it looked up.
    pub fn into_used_paths(self) -> Vec<String> {
        self.used
    }

    /// Evaluate an expression.
    pub fn evaluate(&mut self, source: &str) -> Value {
        self.evaluate_ternary(strip_group(source))
    }

    /// Evaluate a conditional, `condition ? when_truthy : when_falsy`.
    fn evaluate_ternary(&mut self, source: &str) -> Value {
        let pieces = split(source, TERNARY, true);
        match pieces.as_slice() {
            [_] => self.evaluate_logical(source),
            [Piece::Operand(condition), Piece::Operator("?"), Piece::Operand(truthy), Piece::Operator(":"), Piece::Operand(falsy)] =>
            {
                let condition = self.evaluate(condition);
                if condition.is_null() {
                    return Value::Null;
                }
                if is_truthy(&condition) {
                    self.evaluate(truthy)
                } else {
                    self.evaluate(falsy)
                }
            }
            _ => {
                tracing::debug!(expression = source, "malformed conditional");
                Value::Null
            }
        }
    }

    /// Evaluate a chain of `&&` and `||`, left to right.
    ///
    /// Evaluation stops at the first operand that decides the chain, and that
    /// operand is the result. Operands after it are never evaluated.
    fn evaluate_logical(&mut self, source: &str) -> Value {
        let pieces: Vec<_> = split(source, LOGICAL, true)
            .into_iter()
            .filter(|piece| !piece.is_blank())
            .collect();
        if pieces.len() <= 1 {
            return self.evaluate_comparison(source);
        }

        let alternates = pieces.len() % 2 == 1
            && pieces.iter().enumerate().all(|(index, piece)| {
                matches!(
                    (index % 2, piece),
                    (0, Piece::Operand(_)) | (1, Piece::Operator(_))
                )
            });
        if !alternates {
            tracing::debug!(expression = source, "malformed logical expression");
            return Value::Null;
        }

        let mut result = self.evaluate(pieces[0].as_str());
        for pair in pieces[1..].chunks(2) {
            let decided = match Operator::from_symbol(pair[0].as_str()) {
                Some(Operator::And) => !is_truthy(&result),
                Some(Operator::Or) => is_truthy(&result),
                _ => return Value::Null,
            };
            if decided {
                return result;
            }
            result = self.evaluate(pair[1].as_str());
        }

        result
    }

    /// Evaluate a single comparison of two operands.
    fn evaluate_comparison(&mut self, source: &str) -> Value {
        let pieces = split(source, COMPARISON, true);
        match pieces.as_slice() {
            [_] => self.evaluate_arithmetic(source),
            [left @ Piece::Operand(_), Piece::Operator(symbol), right @ Piece::Operand(_)]
                if !left.is_blank() && !right.is_blank() =>
            {
                let Some(operator) = Operator::from_symbol(symbol) else {
                    return Value::Null;
                };
                let left = self.evaluate(left.as_str());
                let right = self.evaluate(right.as_str());

                compare(&left, operator, &right)
            }
            _ => {
                tracing::debug!(expression = source, "malformed comparison");
                Value::Null
            }
        }
    }

    /// Evaluate a chain of `*`, `/`, `+` and `-`.
    ///
    /// An operand that is left empty before a `-` or `+` makes that sign
    /// unary, so `2 * -3` multiplies by negative three. `*` and `/` are
    /// reduced first, then `+` and `-`, both from left to right.
    fn evaluate_arithmetic(&mut self, source: &str) -> Value {
        let pieces = split(source, ARITHMETIC, true);
        if let [_] = pieces.as_slice() {
            return self.evaluate_operand(source);
        }

        let mut terms: Vec<(bool, &str)> = Vec::new();
        let mut operators = Vec::new();
        let mut negate = false;
        let mut expect_term = true;
        for piece in pieces.iter().copied() {
            match piece {
                Piece::Operand(_) if piece.is_blank() => {}
                Piece::Operand(text) => {
                    terms.push((negate, text));
                    negate = false;
                    expect_term = false;
                }
                Piece::Operator("-") if expect_term => negate = !negate,
                Piece::Operator("+") if expect_term => {}
                Piece::Operator(symbol) if !expect_term => {
                    let Some(operator) = Operator::from_symbol(symbol) else {
                        return Value::Null;
                    };
                    operators.push(operator);
                    expect_term = true;
                }
                Piece::Operator(_) => {
                    tracing::debug!(expression = source, "operator is missing an operand");
                    return Value::Null;
                }
            }
        }
        if expect_term {
            tracing::debug!(expression = source, "operator is missing an operand");
            return Value::Null;
        }

        let mut numbers = Vec::with_capacity(terms.len());
        for (negate, text) in terms {
            let Some(number) = to_number(&self.evaluate(text)) else {
                return Value::Null;
            };
            numbers.push(if negate {
                arithmetic::negate(number)
            } else {
                number
            });
        }

        arithmetic::reduce(&numbers, &operators)
            .map(Numeric::into_value)
            .unwrap_or(Value::Null)
    }

    /// Evaluate an operand: a negation, a function call, a literal or a
    /// scope path.
    ///
    /// Whitespace outside of quoted literals carries no meaning here and is
    /// removed first.
    fn evaluate_operand(&mut self, source: &str) -> Value {
        let text = strip_whitespace(source);
        let text = text.as_ref();
        if text.is_empty() {
            return Value::Null;
        }

        let negations = text.len() - text.trim_start_matches('!').len();
        if negations > 0 {
            let value = self.evaluate(&text[negations..]);
            return Value::Bool(is_truthy(&value) == (negations % 2 == 0));
        }

        match Call::parse(text) {
            Some(Ok(call)) => return self.evaluate_call(call),
            Some(Err(error)) => {
                tracing::debug!(expression = text, %error, "malformed function call");
                return Value::Null;
            }
            None => {}
        }

        if let Some(literal) = unquote(text) {
            return Value::String(literal);
        }
        if let Some(number) = Numeric::parse(text) {
            return number.into_value();
        }

        self.resolve_path(text)
    }

    /// Evaluate a function call, and the path that follows it, if any.
    ///
    /// Names outside of the whitelist are rejected before any argument is
    /// evaluated. When an argument evaluates to null the function is not
    /// called at all.
    fn evaluate_call(&mut self, call: Call) -> Value {
        if !function::is_allowed(call.name) {
            tracing::debug!(name = call.name, "function is not allowed");
            return Value::Null;
        }

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            let value = self.evaluate(argument);
            if value.is_null() {
                return Value::Null;
            }
            arguments.push(value);
        }

        let result = function::call(call.name, arguments);
        if call.rest.is_empty() {
            return result;
        }

        self.resolve_from(&result, call.rest)
    }
}
