//! Calculator core.
//!
//! This module provides:
//! - The button set and token parsing
//! - The input state machine driven by button presses
//! - Arbitrary-precision decimal arithmetic behind `=`, memory and square root

mod decimal;
mod evaluation;
mod keys;
mod state;

pub use decimal::{Decimal, RoundingMode};
pub use evaluation::{
    DIVISION_SCALE, ERROR_SENTINEL, Operator, SQRT_SCALE, evaluate, normalize, sqrt,
};
pub use keys::{BUTTON_TOKENS, Button, Digit};
pub use state::{CalculatorState, EMPTY_OPERAND};
