//! Presentation side of the calculator.
//!
//! The core only ever talks to a [`Screen`]: it renders after a successful
//! transition and reports errors from failed ones.

mod clipboard;
mod terminal;

pub use clipboard::{clipboard_text, copy_current};
pub use terminal::TerminalScreen;

use crate::calculator::CalcError;

/// Receiver of calculator output.
pub trait Screen {
    /// Show the formatted current value and the history line.
    fn render(&mut self, display: &str, history: &str);

    /// Tell the user a transition was rejected.
    fn report_error(&mut self, error: &CalcError);
}
