//! Calculator buttons and their text tokens.
//!
//! The shell maps physical controls to tokens (`"7"`, `"+"`, `"mr"`, ...);
//! everything past this module works with the closed [`Button`] type.

use std::fmt;
use std::str::FromStr;

use super::evaluation::Operator;
use crate::error::CalcError;

/// Every token accepted by [`Button::from_str`], in keypad order.
pub const BUTTON_TOKENS: [&str; 23] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "=", "d", "c", "mp",
    "mm", "mc", "mr", "s",
];

/// A single decimal digit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` unless `value` is in `0..=9`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// A calculator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Digit(Digit),
    /// The decimal separator.
    Point,
    Operator(Operator),
    Equals,
    /// Backspace.
    Delete,
    /// Reset operands and pending operation; memory is kept.
    Clear,
    /// M+
    MemoryAdd,
    /// M-
    MemorySubtract,
    /// MC
    MemoryClear,
    /// MR
    MemoryRecall,
    SquareRoot,
}

impl Button {
    /// The token the shell sends for this key.
    pub fn token(&self) -> String {
        match self {
            Self::Digit(digit) => digit.as_char().to_string(),
            Self::Point => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Delete => "d".to_string(),
            Self::Clear => "c".to_string(),
            Self::MemoryAdd => "mp".to_string(),
            Self::MemorySubtract => "mm".to_string(),
            Self::MemoryClear => "mc".to_string(),
            Self::MemoryRecall => "mr".to_string(),
            Self::SquareRoot => "s".to_string(),
        }
    }
}

impl FromStr for Button {
    type Err = CalcError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::from_symbol(token) {
            return Ok(Self::Operator(op));
        }

        let button = match token {
            "." => Self::Point,
            "=" => Self::Equals,
            "d" => Self::Delete,
            "c" => Self::Clear,
            "mp" => Self::MemoryAdd,
            "mm" => Self::MemorySubtract,
            "mc" => Self::MemoryClear,
            "mr" => Self::MemoryRecall,
            "s" => Self::SquareRoot,
            _ => match token.as_bytes() {
                &[b] if b.is_ascii_digit() => Digit::new(b - b'0').map(Self::Digit),
                _ => None,
            }
            .ok_or_else(|| CalcError::UnknownButton(token.to_string()))?,
        };
        Ok(button)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}
