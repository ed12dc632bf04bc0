use super::Arguments;
use crate::{
    log::{error_argument, error_non_finite, Error},
    value::Numeric,
};
use serde_json::Value;
use std::{
    cell::Cell,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hasher},
};

/// Significant digits a value is rounded to before `round` applies the
/// requested precision, which hides representation error such as
/// `1.005 * 100 == 100.49999999999999`.
const PRE_ROUNDING: usize = 15;

fn finite(name: &str, float: f64) -> Result<Value, Error> {
    if !float.is_finite() {
        return Err(error_non_finite(name));
    }

    Ok(Numeric::Float(float).into_value())
}

/// `round(number, precision = 0)`, half away from zero. Always a float.
pub fn round(arguments: &Arguments) -> Result<Value, Error> {
    let number = arguments.number(0)?.as_f64();
    let precision = arguments.integer_or_none(1)?.unwrap_or(0).clamp(-308, 308) as i32;

    finite(arguments.name(), round_half_away(number, precision))
}

fn round_half_away(number: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision.abs());
    let scaled = if precision >= 0 {
        number * factor
    } else {
        number / factor
    };
    if !scaled.is_finite() {
        return number;
    }

    let scaled = format!("{:.*e}", PRE_ROUNDING - 1, scaled)
        .parse::<f64>()
        .unwrap_or(scaled)
        .round();

    if precision >= 0 {
        scaled / factor
    } else {
        scaled * factor
    }
}

/// `rand()` or `rand(min, max)`, both bounds inclusive.
pub fn rand(arguments: &Arguments) -> Result<Value, Error> {
    let (min, max) = match arguments.len() {
        0 => (0, i64::from(i32::MAX)),
        2 => (arguments.integer(0)?, arguments.integer(1)?),
        _ => return Err(error_argument(arguments.name(), 1, "given together with a minimum")),
    };
    let (low, high) = if min <= max { (min, max) } else { (max, min) };

    let span = (high as i128 - low as i128 + 1) as u128;
    let offset = (next_random() as u128 % span) as i128;

    Ok(Value::from((low as i128 + offset) as i64))
}

/// Return the next number of a thread-local xorshift64 generator.
fn next_random() -> u64 {
    thread_local! {
        static STATE: Cell<u64> = const { Cell::new(0) }; // seeded on first use
    }

    STATE.with(|state| {
        let mut x = state.get();
        if x == 0 {
            let mut hasher = RandomState::new().build_hasher();
            hasher.write_u64(0x517c_c1b7_2722_0a95);
            x = hasher.finish() | 1;
        }
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        state.set(x);
        x
    })
}

/// `pow(base, exponent)`. Stays an integer for an exact integer power.
pub fn pow(arguments: &Arguments) -> Result<Value, Error> {
    let base = arguments.number(0)?;
    let exponent = arguments.number(1)?;

    if let (Numeric::Integer(base), Numeric::Integer(exponent)) = (base, exponent) {
        let exact = u32::try_from(exponent)
            .ok()
            .and_then(|exponent| base.checked_pow(exponent));
        if let Some(integer) = exact {
            return Ok(Value::from(integer));
        }
    }

    finite(arguments.name(), base.as_f64().powf(exponent.as_f64()))
}

/// `floor(number)`. Always a float.
pub fn floor(arguments: &Arguments) -> Result<Value, Error> {
    finite(arguments.name(), arguments.number(0)?.as_f64().floor())
}

/// `abs(number)`. Keeps an integer an integer.
pub fn abs(arguments: &Arguments) -> Result<Value, Error> {
    match arguments.number(0)? {
        Numeric::Integer(integer) => match integer.checked_abs() {
            Some(absolute) => Ok(Value::from(absolute)),
            None => finite(arguments.name(), (integer as f64).abs()),
        },
        Numeric::Float(float) => finite(arguments.name(), float.abs()),
    }
}
