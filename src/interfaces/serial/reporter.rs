use super::status::{mirror_lines, status_line};
use crate::domain::event::Event;
use crate::domain::ports::StatusReporter;
use crate::error::Result;
use crate::interfaces::display::DisplayFrame;
use std::io::Write;
use tracing::debug;

/// Writes status lines to a serial-like text sink.
///
/// Each event produces its status line (when it has one) followed by its
/// human-readable lines. The display frame is kept for inspection and
/// logged at debug level.
pub struct LineReporter<W: Write> {
    writer: W,
    display: DisplayFrame,
}

impl<W: Write> LineReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            display: DisplayFrame::default(),
        }
    }

    pub fn display(&self) -> &DisplayFrame {
        &self.display
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatusReporter for LineReporter<W> {
    fn report(&mut self, event: &Event) -> Result<()> {
        if let Some(line) = status_line(event) {
            writeln!(self.writer, "{line}")?;
        }
        for line in mirror_lines(event) {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;

        self.display = DisplayFrame::render(event);
        debug!(display = %self.display, "display updated");
        Ok(())
    }
}
