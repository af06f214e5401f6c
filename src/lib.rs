//! A four-function memory calculator.
//!
//! The core is a pure state machine, [`CalculatorState::apply`], fed one
//! [`Button`] at a time, backed by arbitrary-precision decimal arithmetic.
//! [`Session`] wraps it for shells that deal in text tokens.

pub mod calculator;
pub mod config;
pub mod display;
pub mod error;
pub mod session;

pub use calculator::{Button, CalculatorState, ERROR_SENTINEL, Operator};
pub use config::{Config, OutputFormat};
pub use display::DisplayFields;
pub use error::CalcError;
pub use session::Session;
