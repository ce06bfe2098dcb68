//! Input events accepted by the calculator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::operator::Operator;

/// A single decimal digit, 0 through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// One user gesture, from a key press or a button click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Input {
    Digit(Digit),
    DecimalPoint,
    Operator(Operator),
    Equals,
    ClearAll,
    ClearEntry,
    Backspace,
    ToggleSign,
}

impl Input {
    /// Shorthand for `Input::Digit`, for values known to be in range.
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(Self::Digit)
    }

    /// Action name as written in configuration files.
    pub fn name(self) -> String {
        match self {
            Self::Digit(d) => d.as_char().to_string(),
            Self::DecimalPoint => "decimal".to_string(),
            Self::Operator(op) => op.name().to_string(),
            Self::Equals => "equals".to_string(),
            Self::ClearAll => "clear".to_string(),
            Self::ClearEntry => "clear-entry".to_string(),
            Self::Backspace => "backspace".to_string(),
            Self::ToggleSign => "toggle-sign".to_string(),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(digit) = Digit::from_char(c)
        {
            return Ok(Self::Digit(digit));
        }

        match name.as_str() {
            "decimal" | "decimal-point" => Ok(Self::DecimalPoint),
            "equals" => Ok(Self::Equals),
            "clear" | "clear-all" => Ok(Self::ClearAll),
            "clear-entry" => Ok(Self::ClearEntry),
            "backspace" => Ok(Self::Backspace),
            "toggle-sign" => Ok(Self::ToggleSign),
            other => other
                .parse::<Operator>()
                .map(Self::Operator)
                .map_err(|_| format!("unknown action: {}", s)),
        }
    }
}

impl TryFrom<String> for Input {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Input> for String {
    fn from(input: Input) -> Self {
        input.name()
    }
}
