//! Keyboard input for the calculator.
//!
//! This module provides functionality to:
//! - Map physical key names to calculator inputs
//! - Split typed terminal lines into key presses

mod detection;
mod keymap;

pub use detection::{Unrecognized, is_keypad_run, parse_key, split_keys};
pub use keymap::{Key, Keymap};

use crate::calculator::Input;

/// Translate a typed line into calculator inputs.
///
/// Keys without a binding are skipped. Tokens that are neither key names
/// nor keypad runs are returned so the caller can report them.
pub fn translate_line(line: &str, keymap: &Keymap) -> (Vec<Input>, Vec<Unrecognized>) {
    let (keys, unrecognized) = split_keys(line, keymap);

    let inputs = keys
        .iter()
        .filter_map(|key| {
            let input = keymap.lookup(key);
            if input.is_none() {
                tracing::debug!(key = key.name(), "ignoring unbound key");
            }
            input
        })
        .collect();

    (inputs, unrecognized)
}
