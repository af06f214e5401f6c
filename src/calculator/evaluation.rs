//! Decimal arithmetic behind the calculator keys.
//!
//! Operands arrive as display text and results leave as display text. Any
//! undefined result (division by zero, square root of a negative number, or
//! an operand that is already an error) is reported as [`ERROR_SENTINEL`]
//! instead of an `Err`, so every key press has a value to show.

use std::fmt;

use tracing::{trace, warn};

use super::decimal::{Decimal, RoundingMode};

/// Display text standing in for an undefined result.
pub const ERROR_SENTINEL: &str = "ERR";

/// Fractional digits kept by division.
pub const DIVISION_SCALE: u32 = 16;

/// Fractional digits kept by square root iterations.
pub const SQRT_SCALE: u32 = 16;

/// Newton iterations normally settle within a handful of rounds from a float
/// seed; the cap only matters for operands far outside `f64` range.
const MAX_SQRT_ITERATIONS: usize = 512;

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The key symbol for this operation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Apply `operator` to two operands given as display text.
///
/// Addition, subtraction and multiplication are exact. Division keeps
/// [`DIVISION_SCALE`] fractional digits, rounding ties toward zero. The result
/// is not normalized.
pub fn evaluate(lhs: &str, rhs: &str, operator: Operator) -> String {
    let (Some(a), Some(b)) = (parse_operand(lhs), parse_operand(rhs)) else {
        return ERROR_SENTINEL.to_string();
    };

    let result = match operator {
        Operator::Add => &a + &b,
        Operator::Subtract => &a - &b,
        Operator::Multiply => &a * &b,
        Operator::Divide => {
            match a.div_with_scale(&b, DIVISION_SCALE, RoundingMode::HalfDown) {
                Some(quotient) => quotient,
                None => {
                    warn!(dividend = lhs, "division by zero");
                    return ERROR_SENTINEL.to_string();
                }
            }
        }
    };

    result.to_string()
}

/// Square root of an operand given as display text, at [`SQRT_SCALE`]
/// fractional digits. The result is not normalized.
///
/// Negative operands yield [`ERROR_SENTINEL`] without running the iteration.
pub fn sqrt(operand: &str) -> String {
    let Some(value) = parse_operand(operand) else {
        return ERROR_SENTINEL.to_string();
    };
    if value.is_negative() {
        warn!(operand, "square root of a negative number");
        return ERROR_SENTINEL.to_string();
    }

    newton_sqrt(&value, SQRT_SCALE).to_string()
}

/// Strip non-significant trailing fractional zeros, and the separator if
/// nothing is left after it.
///
/// Only strings of the form `[-]digits.digits` ending in `0` are touched;
/// integers, error text and anything else pass through unchanged.
pub fn normalize(text: &str) -> String {
    let Some(separator) = text.find('.') else {
        return text.to_string();
    };
    let (int_part, fraction) = (&text[..separator], &text[separator + 1..]);
    let int_digits = int_part.strip_prefix('-').unwrap_or(int_part);

    let well_formed = !int_digits.is_empty()
        && int_digits.bytes().all(|b| b.is_ascii_digit())
        && !fraction.is_empty()
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if !well_formed || !fraction.ends_with('0') {
        return text.to_string();
    }

    match fraction.bytes().rposition(|b| b != b'0') {
        Some(last) => format!("{int_part}.{}", &fraction[..=last]),
        None => int_part.to_string(),
    }
}

fn parse_operand(text: &str) -> Option<Decimal> {
    if text == ERROR_SENTINEL {
        return None;
    }
    match text.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, "operand is not a decimal");
            None
        }
    }
}

/// Newton's method at a fixed scale, rounding ties away from zero, until two
/// successive approximations are identical.
fn newton_sqrt(value: &Decimal, scale: u32) -> Decimal {
    if value.is_zero() {
        return Decimal::zero();
    }

    let two = Decimal::from(2);
    let mut approximation = sqrt_seed(value);

    for iteration in 0..MAX_SQRT_ITERATIONS {
        // A zero approximation is a fixed point: the true root is below the
        // last representable digit.
        let Some(quotient) = value.div_with_scale(&approximation, scale, RoundingMode::HalfUp)
        else {
            return Decimal::zero();
        };
        let Some(next) =
            (&quotient + &approximation).div_with_scale(&two, scale, RoundingMode::HalfUp)
        else {
            return approximation;
        };

        trace!(iteration, approximation = %next, "sqrt step");
        if next == approximation {
            return next;
        }
        approximation = next;
    }

    warn!(%value, "sqrt did not settle, returning last approximation");
    approximation
}

/// Starting point for Newton's method: the float root when the operand fits
/// in an `f64`, otherwise a power of ten of about half the operand's width.
fn sqrt_seed(value: &Decimal) -> Decimal {
    value
        .to_f64()
        .map(f64::sqrt)
        .filter(|root| root.is_finite() && *root > 0.0)
        .and_then(Decimal::from_f64)
        .filter(|seed| !seed.is_zero())
        .unwrap_or_else(|| Decimal::power_of_ten(value.integer_digits() / 2))
}
