//! Interactive session: turns key actions into controller calls and keeps
//! the status bar in step with the controller.

use crate::camera::{PixelSampler, VideoSource};
use crate::clipboard::ClipboardSink;
use crate::controller::{CaptureController, CaptureOutcome, Scheduler};
use crate::input::KeyAction;
use crate::output::OutputSink;
use crate::terminal::{Phase, StatusBar};

/// What the event loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Status bar changed
    Redraw,
    Quit,
}

#[derive(Debug, Default)]
pub struct Session {
    /// Start succeeded once; the start key is hidden from then on
    started: bool,
    status_bar: StatusBar,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn handle<V, P, O, C, S>(
        &mut self,
        action: KeyAction,
        controller: &mut CaptureController<V, P, O, C, S>,
    ) -> Flow
    where
        V: VideoSource,
        P: PixelSampler,
        O: OutputSink,
        C: ClipboardSink,
        S: Scheduler,
    {
        match action {
            KeyAction::Start => self.start(controller),
            KeyAction::Capture => self.capture(controller),
            KeyAction::Quit => Flow::Quit,
            KeyAction::None => Flow::Continue,
        }
    }

    fn start<V, P, O, C, S>(&mut self, controller: &mut CaptureController<V, P, O, C, S>) -> Flow
    where
        V: VideoSource,
        P: PixelSampler,
        O: OutputSink,
        C: ClipboardSink,
        S: Scheduler,
    {
        if self.started {
            return Flow::Continue;
        }

        match controller.start_playback() {
            Ok(()) => {
                self.started = true;
                self.status_bar.clear_error();
                self.status_bar.set_phase(Phase::Live);
            }
            Err(e) => {
                log::error!("Failed to start video source: {}", e);
                self.status_bar.set_error(e.to_string());
            }
        }
        Flow::Redraw
    }

    fn capture<V, P, O, C, S>(&mut self, controller: &mut CaptureController<V, P, O, C, S>) -> Flow
    where
        V: VideoSource,
        P: PixelSampler,
        O: OutputSink,
        C: ClipboardSink,
        S: Scheduler,
    {
        if !self.started {
            return Flow::Continue;
        }

        let phase = match controller.toggle_capture() {
            CaptureOutcome::Resumed => Phase::Live,
            CaptureOutcome::Captured(text) => Phase::Frozen {
                copied_chars: text.chars().count(),
            },
        };
        self.status_bar.set_phase(phase);
        Flow::Redraw
    }
}
