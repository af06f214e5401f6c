//! A calculator session: the single mutable state a shell drives.

use std::mem;

use tracing::debug;

use crate::calculator::{Button, CalculatorState};
use crate::display::DisplayFields;
use crate::error::CalcError;

/// Owns one [`CalculatorState`] and advances it one key press at a time.
#[derive(Debug, Default)]
pub struct Session {
    state: CalculatorState,
    presses: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an existing state.
    pub fn with_state(state: CalculatorState) -> Self {
        Self { state, presses: 0 }
    }

    /// Press the key named by `token`.
    ///
    /// Unknown tokens are rejected without touching the state.
    pub fn press(&mut self, token: &str) -> Result<&CalculatorState, CalcError> {
        let button: Button = token.parse()?;
        Ok(self.press_button(button))
    }

    pub fn press_button(&mut self, button: Button) -> &CalculatorState {
        let state = mem::take(&mut self.state);
        self.state = state.apply(button);
        self.presses += 1;

        debug!(
            press = self.presses,
            %button,
            current = %self.state.current,
            previous = %self.state.previous,
            operation = ?self.state.operation,
            is_result = self.state.is_result,
            memory = ?self.state.memory,
            "key pressed"
        );
        &self.state
    }

    /// Press every token in order, stopping at the first unknown one.
    pub fn press_all<'a, I>(&mut self, tokens: I) -> Result<&CalculatorState, CalcError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for token in tokens {
            self.press(token)?;
        }
        Ok(&self.state)
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Number of buttons applied so far.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    pub fn display(&self) -> DisplayFields {
        DisplayFields::from_state(&self.state)
    }
}
