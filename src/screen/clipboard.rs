//! Copying the current operand to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::calculator::{Calculator, strip_separators};

/// Text placed on the clipboard for the current operand.
///
/// The stored operand is used rather than the display string, so the
/// clipboard never receives grouping separators or scientific notation.
pub fn clipboard_text(calc: &Calculator) -> String {
    let raw = strip_separators(calc.current_input(), calc.format().group_separator);
    raw.strip_suffix('.').map(str::to_string).unwrap_or(raw)
}

/// Copy the current operand to the clipboard.
pub fn copy_current(calc: &Calculator) -> Result<()> {
    let text = clipboard_text(calc);
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.clone())
        .context("Failed to copy to clipboard")?;
    tracing::info!(%text, "copied result to clipboard");
    Ok(())
}
