//! The calculator's input interpreter.
//!
//! [`CalculatorState`] is the whole observable state of the keypad. A key
//! press is a pure transition, [`CalculatorState::apply`], which consumes the
//! old state and returns the next one. Every state/button pair has a
//! successor; arithmetic failures show up as the `"ERR"` operand.

use std::mem;

use super::evaluation::{ERROR_SENTINEL, Operator, evaluate, normalize, sqrt};
use super::keys::{Button, Digit};

/// Operand text shown when nothing has been typed.
pub const EMPTY_OPERAND: &str = "0";

/// Operands, pending operation and memory register of one calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    /// Operand being typed, or the last result. Never empty.
    pub current: String,
    /// First operand once an operation has been chosen and the second is
    /// being typed; empty otherwise.
    pub previous: String,
    /// Operation waiting for its second operand.
    pub operation: Option<Operator>,
    /// Set after `=` or square root: the next digit starts a new number.
    pub is_result: bool,
    /// Memory register; `None` when cleared.
    pub memory: Option<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current: EMPTY_OPERAND.to_string(),
            previous: String::new(),
            operation: None,
            is_result: false,
            memory: None,
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state that follows pressing `button`.
    pub fn apply(mut self, button: Button) -> Self {
        match button {
            Button::Digit(digit) => self.press_digit(digit),
            Button::Point => self.press_point(),
            Button::Operator(op) => {
                if !self.is_error() {
                    self.operation = Some(op);
                }
            }
            Button::Equals => self.press_equals(),
            Button::Delete => self.press_delete(),
            Button::Clear => {
                self = Self {
                    memory: self.memory.take(),
                    ..Self::default()
                }
            }
            Button::MemoryAdd => self.update_memory(Operator::Add),
            Button::MemorySubtract => self.update_memory(Operator::Subtract),
            Button::MemoryClear => self.memory = None,
            Button::MemoryRecall => self.recall_memory(),
            Button::SquareRoot => {
                self.current = normalize(&sqrt(&self.current));
                self.is_result = true;
            }
        }
        self
    }

    /// Whether `current` holds the error sentinel.
    pub fn is_error(&self) -> bool {
        self.current == ERROR_SENTINEL
    }

    /// An operation was chosen but its second operand has not started yet.
    fn awaiting_second_operand(&self) -> bool {
        self.operation.is_some() && self.previous.is_empty()
    }

    /// Move `current` into `previous` to begin the second operand.
    fn stash_operand(&mut self) {
        self.previous = mem::take(&mut self.current);
    }

    fn press_digit(&mut self, digit: Digit) {
        let digit = digit.as_char();

        if self.is_result && self.operation.is_none() {
            self.current = digit.to_string();
        } else if self.awaiting_second_operand() {
            self.stash_operand();
            self.current = digit.to_string();
        } else if self.current == EMPTY_OPERAND {
            self.current = digit.to_string();
        } else {
            self.current.push(digit);
        }
        self.is_result = false;
    }

    fn press_point(&mut self) {
        if self.is_result || self.is_error() || self.current.contains('.') {
            return;
        }

        if self.awaiting_second_operand() {
            self.current = "0.".to_string();
        } else {
            self.current.push('.');
        }
    }

    fn press_equals(&mut self) {
        let Some(op) = self.operation else {
            return;
        };
        if self.previous.is_empty() {
            return;
        }

        let result = normalize(&evaluate(&self.previous, &self.current, op));
        self.previous.clear();
        self.operation = None;
        self.current = result;
        self.is_result = true;
    }

    fn press_delete(&mut self) {
        if self.is_result {
            self.current = EMPTY_OPERAND.to_string();
        } else if !self.previous.is_empty()
            && self.operation.is_some()
            && self.current == EMPTY_OPERAND
        {
            // Undo the operator choice.
            self.current = mem::take(&mut self.previous);
            self.operation = None;
        } else if self.awaiting_second_operand() {
            self.operation = None;
        } else if self.current.len() > 1 && !self.is_error() {
            self.current.pop();
            if self.current == "-" {
                self.current = EMPTY_OPERAND.to_string();
            }
        } else {
            self.current = EMPTY_OPERAND.to_string();
        }
        self.is_result = false;
    }

    fn update_memory(&mut self, op: Operator) {
        let base = self.memory.as_deref().unwrap_or(EMPTY_OPERAND);
        let updated = evaluate(base, &self.current, op);
        if updated != ERROR_SENTINEL {
            self.memory = Some(updated);
        }
    }

    fn recall_memory(&mut self) {
        let Some(memory) = self.memory.clone() else {
            return;
        };

        if self.awaiting_second_operand() {
            self.stash_operand();
        }
        self.current = memory;
        self.is_result = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: CalculatorState, tokens: &[&str]) -> CalculatorState {
        tokens
            .iter()
            .fold(state, |state, token| state.apply(token.parse().unwrap()))
    }

    fn run(tokens: &[&str]) -> CalculatorState {
        press(CalculatorState::new(), tokens)
    }

    #[test]
    fn test_initial_state() {
        let state = CalculatorState::new();
        assert_eq!(state.current, "0");
        assert_eq!(state.previous, "");
        assert_eq!(state.operation, None);
        assert!(!state.is_result);
        assert_eq!(state.memory, None);
    }

    #[test]
    fn test_leading_zero_replacement() {
        assert_eq!(run(&["0"]).current, "0");
        assert_eq!(run(&["0", "0"]).current, "0");
        assert_eq!(run(&["5"]).current, "5");
        assert_eq!(run(&["0", "5"]).current, "5");
        assert_eq!(run(&["5", "0"]).current, "50");
    }

    #[test]
    fn test_digit_after_result_starts_new_number() {
        let state = run(&["1", "+", "2", "=", "7"]);
        assert_eq!(state.current, "7");
        assert!(!state.is_result);
    }

    #[test]
    fn test_operator_on_result_chains() {
        let state = run(&["1", "+", "2", "=", "*", "4"]);
        assert_eq!(state.previous, "3");
        assert_eq!(state.current, "4");
        assert!(!state.is_result);
        assert_eq!(run(&["1", "+", "2", "=", "*", "4", "="]).current, "12");
    }

    #[test]
    fn test_second_operand_starts_on_digit() {
        let state = run(&["1", "2", "+"]);
        assert_eq!(state.current, "12");
        assert_eq!(state.previous, "");
        assert_eq!(state.operation, Some(Operator::Add));

        let state = press(state, &["3"]);
        assert_eq!(state.previous, "12");
        assert_eq!(state.current, "3");
    }

    #[test]
    fn test_operator_overwrites_pending_operator() {
        let state = run(&["6", "+", "-", "*"]);
        assert_eq!(state.operation, Some(Operator::Multiply));
        assert_eq!(state.previous, "");

        let state = run(&["6", "+", "2", "/"]);
        assert_eq!(state.operation, Some(Operator::Divide));
        assert_eq!(state.previous, "6");
        assert_eq!(state.current, "2");
        assert_eq!(press(state, &["="]).current, "3");
    }

    #[test]
    fn test_equals_without_pending_operation_is_noop() {
        let state = run(&["4", "2"]);
        assert_eq!(state.clone().apply(Button::Equals), state);

        let state = run(&["4", "+"]);
        assert_eq!(state.clone().apply(Button::Equals), state);
    }

    #[test]
    fn test_equals_normalizes() {
        assert_eq!(run(&["1", ".", "5", "*", "2", "="]).current, "3");
        assert_eq!(run(&["1", "/", "4", "="]).current, "0.25");
        assert_eq!(run(&["1", "/", "3", "="]).current, "0.3333333333333333");
        assert_eq!(run(&["2", "-", "5", "="]).current, "-3");
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(run(&["."]).current, "0.");
        assert_eq!(run(&["1", ".", ".", "5"]).current, "1.5");
        assert_eq!(run(&["1", "+", "2", "=", "."]).current, "3");

        let state = run(&["5", "+", "."]);
        assert_eq!(state.current, "0.");
        assert_eq!(state.previous, "");
    }

    #[test]
    fn test_delete_digits() {
        let state = run(&["1", "2"]);
        let state = press(state, &["d"]);
        assert_eq!(state.current, "1");
        let state = press(state, &["d"]);
        assert_eq!(state.current, "0");
        assert_eq!(press(state, &["d"]).current, "0");
    }

    #[test]
    fn test_delete_result_resets() {
        let state = run(&["1", "2", "+", "3", "=", "d"]);
        assert_eq!(state.current, "0");
        assert!(!state.is_result);
    }

    #[test]
    fn test_delete_pending_operator() {
        let state = run(&["9", "*", "d"]);
        assert_eq!(state.operation, None);
        assert_eq!(state.current, "9");
    }

    #[test]
    fn test_delete_undoes_operator_choice() {
        let state = run(&["9", "*", "4", "d"]);
        assert_eq!(state.current, "0");
        assert_eq!(state.previous, "9");

        let state = press(state, &["d"]);
        assert_eq!(state.current, "9");
        assert_eq!(state.previous, "");
        assert_eq!(state.operation, None);
    }

    #[test]
    fn test_delete_never_leaves_bare_sign() {
        let state = CalculatorState {
            current: "-5".to_string(),
            ..CalculatorState::new()
        };
        assert_eq!(state.apply(Button::Delete).current, "0");
    }

    #[test]
    fn test_clear_keeps_memory() {
        let state = run(&["3", "mp", "4", "+", "5", "c"]);
        assert_eq!(state.current, "0");
        assert_eq!(state.previous, "");
        assert_eq!(state.operation, None);
        assert!(!state.is_result);
        assert_eq!(state.memory.as_deref(), Some("3"));
    }

    #[test]
    fn test_division_by_zero_blocks_operators() {
        let state = run(&["5", "/", "0", "="]);
        assert_eq!(state.current, "ERR");
        assert!(state.is_result);

        let state = press(state, &["+"]);
        assert_eq!(state.operation, None);

        let state = press(state, &["8"]);
        assert_eq!(state.current, "8");
        let state = press(state, &["+"]);
        assert_eq!(state.operation, Some(Operator::Add));
    }

    #[test]
    fn test_error_escapes() {
        assert_eq!(run(&["5", "/", "0", "=", "c"]).current, "0");
        assert_eq!(run(&["5", "/", "0", "=", "d"]).current, "0");
        assert_eq!(run(&["5", "/", "0", "=", "."]).current, "ERR");
    }

    #[test]
    fn test_memory_accumulates() {
        let state = run(&["7", "mp", "c", "2", "mm", "c", "mr"]);
        assert_eq!(state.current, "5");
        assert_eq!(state.memory.as_deref(), Some("5"));

        let state = press(state, &["mc"]);
        assert_eq!(state.memory, None);
        assert_eq!(state.current, "5");
    }

    #[test]
    fn test_memory_keeps_exact_scale() {
        let state = run(&["1", ".", "5", "mp", "c", "1", ".", "5", "mp"]);
        assert_eq!(state.memory.as_deref(), Some("3.0"));
        let state = run(&["1", ".", "5", "0", "mp", "c", "mr"]);
        assert_eq!(state.current, "1.50");
    }

    #[test]
    fn test_point_with_pending_operator_replaces_first_operand() {
        // "0." is shown without stashing the first operand, so the next
        // digit moves "0." into the pending slot.
        let state = run(&["5", "+", ".", "3"]);
        assert_eq!(state.previous, "0.");
        assert_eq!(state.current, "3");

        let state = press(state, &["="]);
        assert_eq!(state.current, "3");
        assert_eq!(state.previous, "");
        assert!(state.is_result);
    }

    #[test]
    fn test_memory_subtract_from_empty_register() {
        let state = run(&["7", "mm"]);
        assert_eq!(state.memory.as_deref(), Some("-7"));
        assert_eq!(state.current, "7");
    }

    #[test]
    fn test_memory_ignores_error_operand() {
        let state = run(&["4", "mp", "c", "1", "/", "0", "=", "mp"]);
        assert_eq!(state.memory.as_deref(), Some("4"));
        let state = run(&["1", "/", "0", "=", "mp"]);
        assert_eq!(state.memory, None);
    }

    #[test]
    fn test_memory_recall_empty_is_noop() {
        let state = run(&["4", "+"]);
        assert_eq!(state.clone().apply(Button::MemoryRecall), state);
    }

    #[test]
    fn test_memory_recall_starts_second_operand() {
        let state = run(&["6", "mp", "c", "2", "*", "mr"]);
        assert_eq!(state.previous, "2");
        assert_eq!(state.current, "6");
        assert_eq!(press(state, &["="]).current, "12");
    }

    #[test]
    fn test_memory_recall_leaves_result_state() {
        let state = run(&["6", "mp", "s", "mr"]);
        assert_eq!(state.current, "6");
        assert!(!state.is_result);
        assert_eq!(press(state, &["1"]).current, "61");
    }

    #[test]
    fn test_square_root() {
        let state = run(&["9", "s"]);
        assert_eq!(state.current, "3");
        assert!(state.is_result);
        assert_eq!(press(state, &["4"]).current, "4");
    }

    #[test]
    fn test_square_root_of_negative_is_error() {
        let state = run(&["3", "-", "7", "=", "s"]);
        assert_eq!(state.current, "ERR");
        assert!(state.is_result);
    }

    #[test]
    fn test_square_root_of_error_stays_error() {
        let state = run(&["1", "/", "0", "=", "s"]);
        assert_eq!(state.current, "ERR");
        assert!(state.is_result);
    }

    #[test]
    fn test_square_root_of_second_operand() {
        let state = run(&["2", "+", "1", "6", "s", "="]);
        assert_eq!(state.current, "6");
    }
}
