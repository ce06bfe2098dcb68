//! Splitting typed terminal tokens into key presses.
//!
//! A token is either the name of a bound key (`Enter`, `ctrl+Backspace`)
//! or a run of keypad characters such as `12+5=`, which becomes one press
//! per character.

use lazy_static::lazy_static;
use regex::Regex;

use super::keymap::{Key, Keymap};

lazy_static! {
    /// Matches strings made only of keypad characters.
    static ref KEYPAD_RUN: Regex = Regex::new(
        r"^[0-9.+\-*/=]+$"
    ).unwrap();

    /// Matches a key name with an optional `ctrl+` modifier.
    static ref MODIFIED_KEY: Regex = Regex::new(
        r"(?i)^ctrl\+(.+)$"
    ).unwrap();
}

/// A token that could not be turned into key presses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unrecognized(pub String);

/// Check whether a token is a run of keypad characters.
pub fn is_keypad_run(token: &str) -> bool {
    KEYPAD_RUN.is_match(token)
}

/// Parse a single key token, e.g. `Enter`, `5` or `ctrl+Backspace`.
pub fn parse_key(token: &str) -> Key {
    match MODIFIED_KEY.captures(token) {
        Some(caps) => Key::ctrl(&caps[1]),
        None => Key::new(token),
    }
}

/// Turn a whitespace separated line into key presses.
///
/// Bound key names win over keypad runs, so a binding for `=` or a
/// multi-character key name is honoured as a single press.
pub fn split_keys(line: &str, keymap: &Keymap) -> (Vec<Key>, Vec<Unrecognized>) {
    let mut keys = Vec::new();
    let mut unrecognized = Vec::new();

    for token in line.split_whitespace() {
        let key = parse_key(token);
        if keymap.lookup(&key).is_some() {
            keys.push(key);
        } else if is_keypad_run(token) {
            keys.extend(token.chars().map(|c| Key::new(&c.to_string())));
        } else {
            unrecognized.push(Unrecognized(token.to_string()));
        }
    }

    (keys, unrecognized)
}
