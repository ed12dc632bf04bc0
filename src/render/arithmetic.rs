use crate::{compile::Operator, value::Numeric};

/// Apply an arithmetic [`Operator`] to two numbers.
///
/// Integers stay integers while the result is exact and does not overflow,
/// and division only when it has no remainder. Returns `None` for a division
/// by zero, a non-finite result, or an operator that is not arithmetic.
pub fn apply(left: Numeric, operator: Operator, right: Numeric) -> Option<Numeric> {
    if let (Numeric::Integer(l), Numeric::Integer(r)) = (left, right) {
        let exact = match operator {
            Operator::Add => l.checked_add(r),
            Operator::Subtract => l.checked_sub(r),
            Operator::Multiply => l.checked_mul(r),
            Operator::Divide if r == 0 => return None,
            Operator::Divide => match l.checked_rem(r) {
                Some(0) => l.checked_div(r),
                _ => None,
            },
            _ => return None,
        };
        if let Some(integer) = exact {
            return Some(Numeric::Integer(integer));
        }
    }

    let (l, r) = (left.as_f64(), right.as_f64());
    let float = match operator {
        Operator::Add => l + r,
        Operator::Subtract => l - r,
        Operator::Multiply => l * r,
        Operator::Divide if r == 0.0 => return None,
        Operator::Divide => l / r,
        _ => return None,
    };

    float.is_finite().then_some(Numeric::Float(float))
}

/// Flip the sign of a number.
pub fn negate(number: Numeric) -> Numeric {
    match number {
        Numeric::Integer(integer) => integer
            .checked_neg()
            .map(Numeric::Integer)
            .unwrap_or(Numeric::Float(-(integer as f64))),
        Numeric::Float(float) => Numeric::Float(-float),
    }
}

/// Reduce `numbers[0] op[0] numbers[1] op[1] ...` to a single number.
///
/// `*` and `/` are applied first, then `+` and `-`, each from left to right.
/// Expects one more number than there are operators.
pub fn reduce(numbers: &[Numeric], operators: &[Operator]) -> Option<Numeric> {
    let (first, rest) = numbers.split_first()?;
    if rest.len() != operators.len() {
        return None;
    }

    let mut terms = vec![*first];
    let mut additive = Vec::new();
    for (operator, number) in operators.iter().zip(rest) {
        if operator.is_multiplicative() {
            let last = terms.last_mut()?;
            *last = apply(*last, *operator, *number)?;
        } else {
            additive.push(*operator);
            terms.push(*number);
        }
    }

    let mut result = terms[0];
    for (operator, term) in additive.into_iter().zip(&terms[1..]) {
        result = apply(result, operator, *term)?;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::{apply, negate, reduce};
    use crate::{compile::Operator, value::Numeric};

    use Numeric::{Float, Integer};

    #[test]
    fn test_apply_integers_stay_exact() {
        assert_eq!(apply(Integer(2), Operator::Add, Integer(3)), Some(Integer(5)));
        assert_eq!(apply(Integer(2), Operator::Subtract, Integer(3)), Some(Integer(-1)));
        assert_eq!(apply(Integer(6), Operator::Divide, Integer(3)), Some(Integer(2)));
        assert_eq!(apply(Integer(10), Operator::Divide, Integer(4)), Some(Float(2.5)));
        assert_eq!(
            apply(Integer(i64::MAX), Operator::Add, Integer(1)),
            Some(Float(i64::MAX as f64 + 1.0))
        );
        assert_eq!(
            apply(Integer(i64::MIN), Operator::Divide, Integer(-1)),
            Some(Float(-(i64::MIN as f64)))
        );
    }

    #[test]
    fn test_apply_floats() {
        assert_eq!(apply(Float(3.5), Operator::Add, Float(4.5)), Some(Float(8.0)));
        assert_eq!(apply(Integer(3), Operator::Multiply, Float(0.5)), Some(Float(1.5)));
    }

    #[test]
    fn test_apply_failures() {
        assert_eq!(apply(Integer(1), Operator::Divide, Integer(0)), None);
        assert_eq!(apply(Float(1.0), Operator::Divide, Float(0.0)), None);
        assert_eq!(apply(Float(f64::MAX), Operator::Multiply, Float(2.0)), None);
        assert_eq!(apply(Integer(1), Operator::Equal, Integer(1)), None);
    }

    #[test]
    fn test_negate() {
        assert_eq!(negate(Integer(3)), Integer(-3));
        assert_eq!(negate(Float(-1.5)), Float(1.5));
        assert_eq!(negate(Integer(i64::MIN)), Float(i64::MIN as f64 * -1.0));
    }

    #[test]
    fn test_reduce_precedence() {
        // 1 + 2 * 3 - 4 / 2
        let numbers = [Integer(1), Integer(2), Integer(3), Integer(4), Integer(2)];
        let operators = [
            Operator::Add,
            Operator::Multiply,
            Operator::Subtract,
            Operator::Divide,
        ];

        assert_eq!(reduce(&numbers, &operators), Some(Integer(5)));
        assert_eq!(reduce(&[Integer(7)], &[]), Some(Integer(7)));
        assert_eq!(reduce(&[Integer(7)], &[Operator::Add]), None);
        assert_eq!(reduce(&[], &[]), None);
    }
}
