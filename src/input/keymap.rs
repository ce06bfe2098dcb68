//! Keyboard bindings from physical keys to calculator inputs.

use std::collections::HashMap;

use crate::calculator::{Digit, Input, Operator};

use super::detection::parse_key;

/// A key press: a key name plus whether Ctrl was held.
///
/// Names are stored lowercased so `Enter` and `enter` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
    ctrl: bool,
}

impl Key {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            ctrl: false,
        }
    }

    pub fn ctrl(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            ctrl: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ctrl(&self) -> bool {
        self.ctrl
    }

    fn without_modifiers(&self) -> Self {
        Self {
            name: self.name.clone(),
            ctrl: false,
        }
    }
}

/// Key bindings.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<Key, Input>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        for value in 0..=9 {
            if let Some(digit) = Digit::new(value) {
                bindings.insert(Key::new(&digit.as_char().to_string()), Input::Digit(digit));
            }
        }
        for op in Operator::ALL {
            let key = match op {
                Operator::Add => "+",
                Operator::Subtract => "-",
                Operator::Multiply => "*",
                Operator::Divide => "/",
            };
            bindings.insert(Key::new(key), Input::Operator(op));
        }

        bindings.insert(Key::new("."), Input::DecimalPoint);
        bindings.insert(Key::new("Enter"), Input::Equals);
        bindings.insert(Key::new("="), Input::Equals);
        bindings.insert(Key::new("Backspace"), Input::Backspace);
        bindings.insert(Key::ctrl("Backspace"), Input::ClearEntry);
        bindings.insert(Key::new("Escape"), Input::ClearAll);
        bindings.insert(Key::new("Delete"), Input::ClearAll);
        bindings.insert(Key::new("n"), Input::ToggleSign);

        Self { bindings }
    }
}

impl Keymap {
    /// Default bindings with `overrides` layered on top.
    ///
    /// Override keys use the same syntax as typed tokens, e.g. `ctrl+z`.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a Input)>) -> Self {
        let mut keymap = Self::default();
        for (key, input) in overrides {
            keymap.bind(parse_key(key), *input);
        }
        keymap
    }

    pub fn bind(&mut self, key: Key, input: Input) {
        tracing::debug!(key = key.name(), ctrl = key.is_ctrl(), %input, "binding key");
        self.bindings.insert(key, input);
    }

    /// Find the input bound to `key`.
    ///
    /// A Ctrl chord without its own binding falls back to the plain key, so
    /// Ctrl+Backspace and Backspace stay distinct while Ctrl+5 still types 5.
    pub fn lookup(&self, key: &Key) -> Option<Input> {
        self.bindings
            .get(key)
            .or_else(|| {
                key.is_ctrl()
                    .then(|| self.bindings.get(&key.without_modifiers()))
                    .flatten()
            })
            .copied()
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
