//! Calculator core.
//!
//! This module provides:
//! - The two-operand state machine driven by keypad input
//! - Binary evaluation with division-by-zero and overflow checks
//! - Display formatting with grouping separators

mod evaluation;
mod event;
mod format;
mod operator;
mod state;

pub use evaluation::{CalcError, evaluate, number_to_string, parse_operand};
pub use event::{Digit, Input};
pub use format::{NumberFormat, format_number, strip_separators};
pub use operator::Operator;
pub use state::{Calculator, Snapshot};
