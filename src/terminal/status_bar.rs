//! Status bar shown on the bottom row of the view.

/// What the capture session is doing, as far as the status line cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Start not yet pressed (or start failed)
    #[default]
    Waiting,
    /// Rendering live frames
    Live,
    /// Frozen after a capture
    Frozen { copied_chars: usize },
}

/// Status bar for the interactive view.
///
/// Shows: phase | key hints | last acquisition error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    phase: Phase,
    error: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show `message` until the next successful start.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Format the status bar text.
    ///
    /// Format: " phase | hints " or " phase | hints | error: ... "
    pub fn format(&self) -> String {
        let (label, hints) = match self.phase {
            Phase::Waiting => ("press s to start".to_string(), "q: quit"),
            Phase::Live => ("LIVE".to_string(), "c: capture  q: quit"),
            Phase::Frozen { copied_chars } => (
                format!("FROZEN (copied {} chars)", copied_chars),
                "c: resume  q: quit",
            ),
        };

        match &self.error {
            Some(error) => format!(" {} | {} | error: {} ", label, hints, error),
            None => format!(" {} | {} ", label, hints),
        }
    }
}
