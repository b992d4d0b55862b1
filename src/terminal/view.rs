//! Terminal output sink.

use std::io;

use super::{StatusBar, Tui};
use crate::ascii::TextGrid;
use crate::output::{OutputSink, SinkError};

/// The interactive view: last published grid plus the status bar, drawn
/// full-screen through [`Tui`].
pub struct TerminalView {
    tui: Tui,
    text: String,
    status_bar: StatusBar,
}

impl TerminalView {
    pub fn new(tui: Tui) -> Self {
        Self {
            tui,
            text: String::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Replace the status bar and redraw.
    pub fn set_status(&mut self, status_bar: &StatusBar) -> io::Result<()> {
        self.status_bar = status_bar.clone();
        self.redraw()
    }

    /// Redraw the current contents (after a resize, for example).
    pub fn redraw(&mut self) -> io::Result<()> {
        self.tui.draw_view(&self.text, &self.status_bar)
    }

    /// Give the terminal back to the shell.
    pub fn restore(&mut self) -> io::Result<()> {
        self.tui.restore()
    }
}

impl OutputSink for TerminalView {
    fn publish(&mut self, grid: &TextGrid) -> Result<(), SinkError> {
        self.text = grid.to_text();
        self.redraw()?;
        Ok(())
    }

    fn displayed_text(&self) -> String {
        self.text.clone()
    }
}
