//! Binary evaluation of a pending operation.
//!
//! Operands arrive as stored strings, get parsed (after stripping any
//! grouping separators) and are combined with the pending operator.
//! Non-finite results are rejected rather than displayed.

use thiserror::Error;

use super::format::strip_separators;
use super::operator::Operator;

/// Failure of a single evaluation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// The divisor of a division was zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,
    /// The result overflowed or an operand was not a number.
    #[error("Result is too large")]
    OverflowOrInvalid,
}

/// Parse a stored operand, ignoring grouping separators.
///
/// Returns NaN when the string is not a number, so the evaluation below
/// reports it as [`CalcError::OverflowOrInvalid`].
pub fn parse_operand(input: &str, separator: char) -> f64 {
    strip_separators(input, separator)
        .trim()
        .parse()
        .unwrap_or(f64::NAN)
}

/// Evaluate `previous <op> current`.
pub fn evaluate(previous: f64, current: f64, operator: Operator) -> Result<f64, CalcError> {
    if operator == Operator::Divide && current == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    let value = operator.apply(previous, current);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::OverflowOrInvalid)
    }
}

/// Convert a result back to its stored string form.
///
/// Uses the shortest representation that parses back to the same value and
/// never an exponent. Negative zero is stored as "0".
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
