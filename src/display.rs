//! The four display fields a shell redraws after every key press.

use serde::Serialize;

use crate::calculator::CalculatorState;

/// Text shown by the memory indicator while the register holds a value.
pub const MEMORY_INDICATOR: &str = "M";

/// Rendered view of a [`CalculatorState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    /// Main display line.
    pub current: String,
    /// First operand of the pending operation.
    pub previous: String,
    /// Symbol of the pending operation, empty when none.
    pub operation: String,
    /// [`MEMORY_INDICATOR`] or empty.
    pub memory: String,
}

impl DisplayFields {
    /// Create the display for a state.
    pub fn from_state(state: &CalculatorState) -> Self {
        Self {
            current: state.current.clone(),
            previous: state.previous.clone(),
            operation: state
                .operation
                .map(|op| op.symbol().to_string())
                .unwrap_or_default(),
            memory: if state.memory.is_some() {
                MEMORY_INDICATOR.to_string()
            } else {
                String::new()
            },
        }
    }

    /// One-line rendering: `[M] [previous operation] | current`.
    pub fn render_plain(&self) -> String {
        let mut line = String::new();
        for field in [&self.memory, &self.previous, &self.operation] {
            if !field.is_empty() {
                line.push_str(field);
                line.push(' ');
            }
        }
        line.push_str("| ");
        line.push_str(&self.current);
        line
    }
}
