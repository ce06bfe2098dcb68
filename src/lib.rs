//! A keypad-style arithmetic calculator.
//!
//! The [`calculator::Calculator`] state machine takes one
//! [`calculator::Input`] at a time and pushes its output to a
//! [`screen::Screen`]. Keyboard handling and configuration sit on top.

pub mod calculator;
pub mod config;
pub mod input;
pub mod screen;

pub use calculator::{CalcError, Calculator, Input, Operator};
pub use config::Config;
pub use screen::Screen;
