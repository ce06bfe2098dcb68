//! Display formatting for stored operands.
//!
//! Formatting is a pure function of the stored string. Separators only ever
//! appear in the output, never in the calculator state.

use serde::{Deserialize, Serialize};

/// Magnitude from which values switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e10;
/// Non-zero magnitudes below this also switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-6;
/// Fractional digits kept in scientific notation.
const SCIENTIFIC_DIGITS: usize = 6;
/// Fractional digits needed to print any f64 exactly in scientific form.
const EXACT_DIGITS: usize = 767;
/// Longest fraction shown before rounding kicks in.
const MAX_FRACTION_DIGITS: usize = 10;

/// Number formatting options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Character inserted between groups of three integer digits.
    pub group_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ',',
        }
    }
}

impl NumberFormat {
    /// Create a format with a custom grouping separator.
    pub fn with_separator(group_separator: char) -> Self {
        Self { group_separator }
    }

    /// Check that the separator cannot be confused with part of a number.
    pub fn is_valid_separator(c: char) -> bool {
        !(c.is_ascii_digit() || c == '.' || c == '-' || c == 'e' || c == 'E')
    }

    /// Format a stored numeric string for display.
    pub fn format(&self, num: &str) -> String {
        if num.is_empty() {
            return "0".to_string();
        }

        let value: Option<f64> = num.parse().ok();

        if let Some(value) = value {
            let magnitude = value.abs();
            if magnitude >= SCIENTIFIC_UPPER || (magnitude < SCIENTIFIC_LOWER && value != 0.0) {
                return format_scientific(value);
            }
        }

        let rounded;
        let mut formatted = num;
        if let (Some(value), Some((_, fraction))) = (value, num.split_once('.'))
            && fraction.len() > MAX_FRACTION_DIGITS
        {
            rounded = round_fraction(value);
            formatted = rounded.as_str();
        }

        self.add_separators(formatted)
    }

    /// Insert grouping separators into the integer part of `num`.
    ///
    /// A leading minus sign and the fractional part are kept as they are.
    pub fn add_separators(&self, num: &str) -> String {
        let (sign, unsigned) = match num.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", num),
        };

        let (integer_part, fraction_part) = match unsigned.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (unsigned, None),
        };

        let mut grouped = String::new();
        for (i, c) in integer_part.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(c);
        }
        let grouped: String = grouped.chars().rev().collect();

        match fraction_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }
}

/// Remove every occurrence of `separator` from `num`.
pub fn strip_separators(num: &str, separator: char) -> String {
    num.chars().filter(|&c| c != separator).collect()
}

/// Format with [`NumberFormat::default`].
pub fn format_number(num: &str) -> String {
    NumberFormat::default().format(num)
}

/// Scientific notation with a signed exponent, e.g. `1.234568e+10`.
///
/// Rounds half away from zero on the exact binary value, so a tie such as
/// 10000005000 goes up to `1.000001e+10`.
fn format_scientific(value: f64) -> String {
    // Enough digits to spell out any finite f64 exactly.
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return format!("{:.*e}", SCIENTIFIC_DIGITS, value);
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return format!("{:.*e}", SCIENTIFIC_DIGITS, value);
    };

    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let mut kept = digits[..=SCIENTIFIC_DIGITS].to_vec();

    if digits[SCIENTIFIC_DIGITS + 1] >= 5 {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept[0] = 1;
            exponent += 1;
        }
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let fraction: String = kept[1..].iter().map(|d| char::from(b'0' + d)).collect();
    let exponent_sign = if exponent < 0 { "-" } else { "+" };
    format!(
        "{}{}.{}e{}{}",
        sign,
        kept[0],
        fraction,
        exponent_sign,
        exponent.abs()
    )
}

/// Round to the maximum fraction length and drop trailing zeros.
fn round_fraction(value: f64) -> String {
    // -0 shows as 0.
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
