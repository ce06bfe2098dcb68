//! Line-oriented terminal screen.

use std::io::{self, Write};

use super::Screen;
use crate::calculator::CalcError;

/// Writes the history line and current value to a terminal.
///
/// Writing is fire-and-forget from the calculator's point of view. The
/// first I/O failure is kept and can be collected with [`Self::take_error`].
pub struct TerminalScreen<W: Write> {
    out: W,
    io_error: Option<io::Error>,
    /// Skip unchanged frames.
    last_frame: Option<(String, String)>,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            io_error: None,
            last_frame: None,
        }
    }

    /// Take the first I/O error encountered, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    /// Forget the last frame so the next render always draws.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, display: &str, history: &str) -> io::Result<()> {
        if !history.is_empty() {
            writeln!(self.out, "  {}", history)?;
        }
        writeln!(self.out, "= {}", display)?;
        self.out.flush()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("failed to write to terminal: {}", e);
            self.io_error.get_or_insert(e);
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn render(&mut self, display: &str, history: &str) {
        let frame = (display.to_string(), history.to_string());
        if self.last_frame.as_ref() == Some(&frame) {
            return;
        }

        let result = self.write_frame(display, history);
        self.record(result);
        self.last_frame = Some(frame);
    }

    fn report_error(&mut self, error: &CalcError) {
        let result = writeln!(self.out, "error: {}", error).and_then(|_| self.out.flush());
        self.record(result);
        self.invalidate();
    }
}
