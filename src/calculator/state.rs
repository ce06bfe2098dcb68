//! The calculator state machine.
//!
//! Holds the operand being typed, the pending left operand and operator,
//! and the history line. Every transition either completes or, when an
//! evaluation fails, leaves the state exactly as it was.

use serde::Serialize;

use super::evaluation::{CalcError, evaluate, number_to_string, parse_operand};
use super::event::{Digit, Input};
use super::format::{NumberFormat, strip_separators};
use super::operator::Operator;
use crate::screen::Screen;

/// Serializable view of the calculator state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub current_input: String,
    pub previous_input: String,
    pub pending_operator: Option<Operator>,
    pub waiting_for_operand: bool,
    pub history: String,
    pub display: String,
}

/// A two-operand keypad calculator.
#[derive(Clone, Debug)]
pub struct Calculator {
    /// Operand being typed. Never empty, never contains separators.
    current_input: String,
    /// Left operand once an operator is chosen, empty when none.
    previous_input: String,
    pending_operator: Option<Operator>,
    /// The next digit starts a fresh operand.
    waiting_for_operand: bool,
    history: String,
    format: NumberFormat,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_format(NumberFormat::default())
    }

    /// Create a calculator that displays numbers with `format`.
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            current_input: "0".to_string(),
            previous_input: String::new(),
            pending_operator: None,
            waiting_for_operand: false,
            history: String::new(),
            format,
        }
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn previous_input(&self) -> &str {
        &self.previous_input
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// The current operand formatted for the screen.
    pub fn display_value(&self) -> String {
        self.format.format(&self.current_input)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_input: self.current_input.clone(),
            previous_input: self.previous_input.clone(),
            pending_operator: self.pending_operator,
            waiting_for_operand: self.waiting_for_operand,
            history: self.history.clone(),
            display: self.display_value(),
        }
    }

    /// Apply one input and push the outcome to `screen`.
    ///
    /// A successful transition is rendered. A failed one is reported once
    /// and leaves both the state and the screen untouched.
    pub fn handle(&mut self, input: Input, screen: &mut dyn Screen) {
        match self.apply(input) {
            Ok(()) => screen.render(&self.display_value(), &self.history),
            Err(err) => screen.report_error(&err),
        }
    }

    /// Apply one input event.
    pub fn apply(&mut self, input: Input) -> Result<(), CalcError> {
        tracing::debug!(%input, "applying input");

        match input {
            Input::Digit(digit) => self.input_digit(digit),
            Input::DecimalPoint => self.input_decimal_point(),
            Input::Operator(op) => return self.set_operator(op),
            Input::Equals => return self.equals(),
            Input::ClearAll => self.clear_all(),
            Input::ClearEntry => self.clear_entry(),
            Input::Backspace => self.backspace(),
            Input::ToggleSign => self.toggle_sign(),
        }
        Ok(())
    }

    pub fn input_digit(&mut self, digit: Digit) {
        if self.waiting_for_operand {
            self.current_input = digit.as_char().to_string();
            self.waiting_for_operand = false;
        } else if self.current_input == "0" {
            self.current_input = digit.as_char().to_string();
        } else {
            self.current_input.push(digit.as_char());
        }
    }

    pub fn input_decimal_point(&mut self) {
        if self.waiting_for_operand {
            self.current_input = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.current_input.contains('.') {
            self.current_input.push('.');
        }
    }

    pub fn backspace(&mut self) {
        if self.waiting_for_operand {
            return;
        }

        self.current_input.pop();
        // A bare sign is not a number.
        if self.current_input.is_empty() || self.current_input == "-" {
            self.current_input = "0".to_string();
        }
    }

    pub fn toggle_sign(&mut self) {
        if self.current_input == "0" {
            return;
        }

        let clean = strip_separators(&self.current_input, self.format.group_separator);
        self.current_input = match clean.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", clean),
        };
    }

    /// Reset the operand being typed, keeping any pending operation.
    pub fn clear_entry(&mut self) {
        self.current_input = "0".to_string();
    }

    pub fn clear_all(&mut self) {
        *self = Self::with_format(self.format);
    }

    /// Choose the next operator, folding any pending operation first.
    pub fn set_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        if self.previous_input.is_empty() {
            self.previous_input = strip_separators(&self.current_input, self.format.group_separator);
        } else if let Some(pending) = self.pending_operator {
            let result = number_to_string(self.evaluate_pending(pending)?);
            self.current_input = result.clone();
            self.previous_input = result;
        }

        self.waiting_for_operand = true;
        self.pending_operator = Some(op);
        self.history = format!("{} {}", self.format.format(&self.previous_input), op.symbol());
        Ok(())
    }

    /// Complete the pending operation.
    ///
    /// Does nothing unless an operator is pending and an operand has been
    /// typed since it was chosen.
    pub fn equals(&mut self) -> Result<(), CalcError> {
        let Some(op) = self.pending_operator else {
            return Ok(());
        };
        if self.waiting_for_operand {
            return Ok(());
        }

        let result = self.evaluate_pending(op)?;

        self.history = format!(
            "{} {} {} =",
            self.format.format(&self.previous_input),
            op.symbol(),
            self.format.format(&self.current_input)
        );
        self.current_input = number_to_string(result);
        self.previous_input.clear();
        self.pending_operator = None;
        self.waiting_for_operand = true;
        Ok(())
    }

    fn evaluate_pending(&self, op: Operator) -> Result<f64, CalcError> {
        let separator = self.format.group_separator;
        let previous = parse_operand(&self.previous_input, separator);
        let current = parse_operand(&self.current_input, separator);

        evaluate(previous, current, op).inspect_err(|err| {
            tracing::warn!(
                previous = %self.previous_input,
                current = %self.current_input,
                operator = op.name(),
                "evaluation rejected: {}",
                err
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Screen double that records every call.
    #[derive(Default)]
    struct RecordingScreen {
        renders: Vec<(String, String)>,
        errors: Vec<CalcError>,
    }

    impl Screen for RecordingScreen {
        fn render(&mut self, display: &str, history: &str) {
            self.renders.push((display.to_string(), history.to_string()));
        }

        fn report_error(&mut self, error: &CalcError) {
            self.errors.push(*error);
        }
    }

    fn press(calc: &mut Calculator, keys: &str) {
        for c in keys.chars() {
            let input = match c {
                '.' => Input::DecimalPoint,
                '=' => Input::Equals,
                c => Digit::from_char(c)
                    .map(Input::Digit)
                    .or_else(|| Operator::from_key(c).map(Input::Operator))
                    .unwrap(),
            };
            let _ = calc.apply(input);
        }
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.current_input(), "0");
        assert_eq!(calc.previous_input(), "");
        assert_eq!(calc.pending_operator(), None);
        assert!(!calc.is_waiting_for_operand());
        assert_eq!(calc.history(), "");
        assert_eq!(calc.display_value(), "0");
    }

    #[test]
    fn test_digits_concatenate() {
        let sequences = [
            "0",
            "0000",
            "7",
            "0012034",
            "100",
            "9081726354",
            "12345678901234567890",
        ];
        for typed in sequences {
            let mut calc = Calculator::new();
            press(&mut calc, typed);

            let trimmed = typed.trim_start_matches('0');
            let expected = if trimmed.is_empty() { "0" } else { trimmed };
            assert_eq!(calc.current_input(), expected, "typed {}", typed);
        }

        let mut calc = Calculator::new();
        press(&mut calc, "0012034");
        assert_eq!(calc.display_value(), "12,034");
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let mut calc = Calculator::new();
        calc.input_decimal_point();
        calc.input_decimal_point();
        assert_eq!(calc.current_input(), "0.");
        press(&mut calc, "5.");
        assert_eq!(calc.current_input(), "0.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let mut calc = Calculator::new();
        press(&mut calc, "3+.");
        assert_eq!(calc.current_input(), "0.");
        assert!(!calc.is_waiting_for_operand());
    }

    #[test]
    fn test_long_fraction_display() {
        let mut calc = Calculator::new();
        press(&mut calc, "1.2345678901234");
        assert_eq!(calc.current_input(), "1.2345678901234");
        assert_eq!(calc.display_value(), "1.2345678901");
    }

    #[test]
    fn test_addition_scenario() {
        let mut calc = Calculator::new();
        press(&mut calc, "12+5=");
        assert_eq!(calc.history(), "12 + 5 =");
        assert_eq!(calc.current_input(), "17");
        assert_eq!(calc.previous_input(), "");
        assert_eq!(calc.pending_operator(), None);
        assert!(calc.is_waiting_for_operand());
    }

    #[test]
    fn test_operator_history() {
        let mut calc = Calculator::new();
        press(&mut calc, "1234*");
        assert_eq!(calc.history(), "1,234 ×");
        assert_eq!(calc.previous_input(), "1234");
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_operator_chaining() {
        let mut calc = Calculator::new();
        press(&mut calc, "2+3*");
        assert_eq!(calc.current_input(), "5");
        assert_eq!(calc.previous_input(), "5");
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calc.history(), "5 ×");
        press(&mut calc, "4=");
        assert_eq!(calc.current_input(), "20");
        assert_eq!(calc.history(), "5 × 4 =");
    }

    #[test]
    fn test_result_starts_new_operand() {
        let mut calc = Calculator::new();
        press(&mut calc, "2+2=7");
        assert_eq!(calc.current_input(), "7");
    }

    #[test]
    fn test_result_used_as_left_operand() {
        let mut calc = Calculator::new();
        press(&mut calc, "2+2=-1=");
        assert_eq!(calc.history(), "4 - 1 =");
        assert_eq!(calc.current_input(), "3");
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let mut calc = Calculator::new();
        press(&mut calc, "6/4=");
        let before = calc.snapshot();
        assert_eq!(calc.equals(), Ok(()));
        assert_eq!(calc.snapshot(), before);
        assert_eq!(before.current_input, "1.5");
    }

    #[test]
    fn test_equals_without_new_operand_is_noop() {
        let mut calc = Calculator::new();
        press(&mut calc, "9+");
        let before = calc.snapshot();
        assert_eq!(calc.equals(), Ok(()));
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_division_by_zero_on_equals() {
        let mut calc = Calculator::new();
        let mut screen = RecordingScreen::default();
        for c in "1000000/0".chars() {
            let input = Digit::from_char(c)
                .map(Input::Digit)
                .unwrap_or(Input::Operator(Operator::Divide));
            calc.handle(input, &mut screen);
        }
        let before = calc.snapshot();
        let renders = screen.renders.len();

        calc.handle(Input::Equals, &mut screen);

        assert_eq!(screen.errors, vec![CalcError::DivisionByZero]);
        assert_eq!(screen.renders.len(), renders);
        assert_eq!(calc.snapshot(), before);
        assert_eq!(calc.current_input(), "0");
        assert_eq!(calc.previous_input(), "1000000");
        assert_eq!(calc.pending_operator(), Some(Operator::Divide));
    }

    #[test]
    fn test_division_by_zero_on_chained_operator() {
        let mut calc = Calculator::new();
        press(&mut calc, "8/0");
        let before = calc.snapshot();
        assert_eq!(
            calc.set_operator(Operator::Add),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(calc.snapshot(), before);
        assert_eq!(calc.history(), "8 ÷");
    }

    #[test]
    fn test_overflow_rejected() {
        let mut calc = Calculator::new();
        calc.current_input = "1e308".to_string();
        press(&mut calc, "*");
        calc.current_input = "10".to_string();
        calc.waiting_for_operand = false;
        let before = calc.snapshot();
        assert_eq!(calc.equals(), Err(CalcError::OverflowOrInvalid));
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_handle_renders_display_and_history() {
        let mut calc = Calculator::new();
        let mut screen = RecordingScreen::default();
        calc.handle(Input::digit(1).unwrap(), &mut screen);
        calc.handle(Input::digit(2).unwrap(), &mut screen);
        calc.handle(Input::digit(3).unwrap(), &mut screen);
        calc.handle(Input::digit(4).unwrap(), &mut screen);
        calc.handle(Input::Operator(Operator::Add), &mut screen);
        assert!(screen.errors.is_empty());
        assert_eq!(
            screen.renders.last(),
            Some(&("1,234".to_string(), "1,234 +".to_string()))
        );
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        press(&mut calc, "123");
        calc.backspace();
        assert_eq!(calc.current_input(), "12");
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.current_input(), "0");
        calc.backspace();
        assert_eq!(calc.current_input(), "0");
    }

    #[test]
    fn test_backspace_ignored_while_waiting() {
        let mut calc = Calculator::new();
        press(&mut calc, "45+");
        calc.backspace();
        assert_eq!(calc.current_input(), "45");
    }

    #[test]
    fn test_backspace_drops_bare_sign() {
        let mut calc = Calculator::new();
        press(&mut calc, "5");
        calc.toggle_sign();
        calc.backspace();
        assert_eq!(calc.current_input(), "0");
    }

    #[test]
    fn test_toggle_sign() {
        let mut calc = Calculator::new();
        calc.toggle_sign();
        assert_eq!(calc.current_input(), "0");
        press(&mut calc, "42");
        calc.toggle_sign();
        assert_eq!(calc.current_input(), "-42");
        assert_eq!(calc.display_value(), "-42");
        calc.toggle_sign();
        assert_eq!(calc.current_input(), "42");
    }

    #[test]
    fn test_negative_operand() {
        let mut calc = Calculator::new();
        press(&mut calc, "3");
        calc.toggle_sign();
        press(&mut calc, "*4=");
        assert_eq!(calc.history(), "-3 × 4 =");
        assert_eq!(calc.current_input(), "-12");
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let mut calc = Calculator::new();
        press(&mut calc, "7-9");
        calc.clear_entry();
        assert_eq!(calc.current_input(), "0");
        assert_eq!(calc.previous_input(), "7");
        assert_eq!(calc.pending_operator(), Some(Operator::Subtract));
        assert_eq!(calc.history(), "7 -");
        press(&mut calc, "2=");
        assert_eq!(calc.current_input(), "5");
    }

    #[test]
    fn test_clear_all_restores_defaults() {
        let mut calc = Calculator::with_format(NumberFormat::with_separator(' '));
        press(&mut calc, "12+5=*3.5");
        calc.clear_all();
        assert_eq!(calc.current_input(), "0");
        assert_eq!(calc.previous_input(), "");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.history(), "");
        assert!(!calc.is_waiting_for_operand());
        assert_eq!(calc.format().group_separator, ' ');
    }

    #[test]
    fn test_decimal_arithmetic() {
        let mut calc = Calculator::new();
        press(&mut calc, ".1+.2=");
        assert_eq!(calc.current_input(), "0.30000000000000004");
        assert_eq!(calc.display_value(), "0.3");
        assert_eq!(calc.history(), "0.1 + 0.2 =");
    }

    #[test]
    fn test_large_result_displayed_scientific() {
        let mut calc = Calculator::new();
        press(&mut calc, "100000*100000=");
        assert_eq!(calc.current_input(), "10000000000");
        assert_eq!(calc.display_value(), "1.000000e+10");
    }
}
