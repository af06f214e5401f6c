//! Arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is stored as an unbounded integer coefficient and a
//! non-negative scale: `value = coefficient * 10^-scale`. Exact operations
//! keep the natural scale of their operands (trailing zeros are significant
//! until the display layer normalizes them), and division is always asked for
//! an explicit scale and rounding mode.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::error::CalcError;

/// Tie-breaking rule applied when a quotient is cut to a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Ties round away from zero.
    HalfUp,
    /// Ties round toward zero.
    HalfDown,
}

/// A decimal number with an unbounded coefficient.
///
/// Equality is structural: `1.0` and `1.00` are different values with equal
/// magnitude. Fixed-scale iteration relies on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    coefficient: BigInt,
    scale: u32,
}

impl Decimal {
    pub fn new(coefficient: BigInt, scale: u32) -> Self {
        Self { coefficient, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    /// Divide by `divisor`, producing exactly `scale` fractional digits.
    ///
    /// Returns `None` when the divisor is zero (at any scale).
    pub fn div_with_scale(&self, divisor: &Self, scale: u32, mode: RoundingMode) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }

        // self / divisor * 10^scale, kept in integers.
        let shift = i64::from(scale) + i64::from(divisor.scale) - i64::from(self.scale);
        let shift_digits = u32::try_from(shift.unsigned_abs()).ok()?;
        let (numerator, denominator) = if shift >= 0 {
            (&self.coefficient * pow10(shift_digits), divisor.coefficient.clone())
        } else {
            (self.coefficient.clone(), &divisor.coefficient * pow10(shift_digits))
        };

        Some(Self::new(round_quotient(&numerator, &denominator, mode), scale))
    }

    /// Closest `f64`, used only to seed iterative algorithms.
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string().parse().ok()
    }

    /// Decimal rendering of a finite float (shortest round-trip digits).
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{value}").parse().ok()
    }

    /// Count of digits left of the decimal point; zero when `|self| < 1`.
    pub fn integer_digits(&self) -> u32 {
        let digits = self.coefficient.magnitude().to_string().len();
        u32::try_from(digits)
            .unwrap_or(u32::MAX)
            .saturating_sub(self.scale)
    }

    /// `10^exponent` as an integer-valued decimal.
    pub fn power_of_ten(exponent: u32) -> Self {
        Self::new(pow10(exponent), 0)
    }

    fn aligned(&self, scale: u32) -> BigInt {
        &self.coefficient * pow10(scale - self.scale)
    }
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Integer division with rounding to the nearest integer.
fn round_quotient(numerator: &BigInt, denominator: &BigInt, mode: RoundingMode) -> BigInt {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        return quotient;
    }

    let twice_remainder = remainder.abs() * 2u32;
    let round_away = match twice_remainder.cmp(&denominator.abs()) {
        Ordering::Greater => true,
        Ordering::Equal => mode == RoundingMode::HalfUp,
        Ordering::Less => false,
    };

    if !round_away {
        quotient
    } else if numerator.is_negative() == denominator.is_negative() {
        quotient + 1u32
    } else {
        quotient - 1u32
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.aligned(scale) + rhs.aligned(scale), scale)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.aligned(scale) - rhs.aligned(scale), scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Self) -> Decimal {
        Decimal::new(&self.coefficient * &rhs.coefficient, self.scale + rhs.scale)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    /// Parses plain decimal literals: an optional sign, digits, and at most
    /// one `.`. Either side of the point may be empty, but not both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalcError::InvalidDecimal(s.to_string());

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let magnitude: BigInt = format!("{int_part}{frac_part}")
            .parse()
            .map_err(|_| invalid())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;

        Ok(Self::new(if negative { -magnitude } else { magnitude }, scale))
    }
}

impl fmt::Display for Decimal {
    /// Plain notation, never exponent form. All `scale` digits are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.magnitude().to_string();
        if self.coefficient.is_negative() {
            f.write_str("-")?;
        }

        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }

        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{int_part}.{frac_part}")
    }
}
