//! Capture controller: owns the animation loop and the freeze/export action.
//!
//! State machine:
//!
//! ```text
//!            start() / toggle_capture()
//!   Idle  ------------------------------>  Running { handle }
//!         <------------------------------
//!            stop() / toggle_capture() [+ copy to clipboard]
//! ```
//!
//! Every tick reschedules itself *before* doing the fallible work, so a
//! failed frame read or publish never ends the loop, and `stop()` only
//! withdraws the tick that has not fired yet.

mod scheduler;

pub use scheduler::{FrameScheduler, Scheduler, TickHandle};

use crate::ascii::{GlyphRamp, RenderError};
use crate::camera::{CameraError, PixelSampler, SampleError, VideoSource};
use crate::clipboard::ClipboardSink;
use crate::output::{OutputSink, SinkError};

/// Whether the render loop is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Nothing scheduled, nothing rendering
    #[default]
    Idle,
    /// A tick is scheduled under `handle`
    Running { handle: TickHandle },
}

/// Result of [`CaptureController::toggle_capture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Live rendering resumed
    Resumed,
    /// Rendering frozen; the text that was copied to the clipboard
    Captured(String),
}

/// Failure inside a single tick. Logged, never escalated.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    #[error("frame unavailable: {0}")]
    Source(#[from] CameraError),
    #[error("sampling failed: {0}")]
    Sample(#[from] SampleError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("publish failed: {0}")]
    Sink(#[from] SinkError),
}

/// Drives video source -> canvas -> renderer -> output, one tick per frame.
///
/// All collaborators are injected, so the controller runs equally against
/// a terminal and a webcam or against in-memory test doubles.
pub struct CaptureController<V, P, O, C, S> {
    source: V,
    sampler: P,
    output: O,
    clipboard: C,
    scheduler: S,
    ramp: GlyphRamp,
    state: CaptureState,
    ticks_rendered: u64,
    ticks_failed: u64,
    /// Consecutive failed ticks, to log a failure streak once
    failure_streak: u64,
}

impl<V, P, O, C, S> CaptureController<V, P, O, C, S> {
    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CaptureState::Running { .. })
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    /// Ticks that published a grid.
    pub fn ticks_rendered(&self) -> u64 {
        self.ticks_rendered
    }

    /// Ticks whose read/render/publish failed.
    pub fn ticks_failed(&self) -> u64 {
        self.ticks_failed
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    pub fn sampler(&self) -> &P {
        &self.sampler
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<V, P, O, C, S> CaptureController<V, P, O, C, S>
where
    V: VideoSource,
    P: PixelSampler,
    O: OutputSink,
    C: ClipboardSink,
    S: Scheduler,
{
    /// Controller using the default glyph ramp.
    pub fn new(source: V, sampler: P, output: O, clipboard: C, scheduler: S) -> Self {
        Self::with_ramp(source, sampler, output, clipboard, scheduler, GlyphRamp::default())
    }

    pub fn with_ramp(
        source: V,
        sampler: P,
        output: O,
        clipboard: C,
        scheduler: S,
        ramp: GlyphRamp,
    ) -> Self {
        Self {
            source,
            sampler,
            output,
            clipboard,
            scheduler,
            ramp,
            state: CaptureState::Idle,
            ticks_rendered: 0,
            ticks_failed: 0,
            failure_streak: 0,
        }
    }

    /// Start the render loop. No-op while already running: there is never
    /// more than one tick chain.
    pub fn start(&mut self) {
        if self.is_running() {
            log::debug!("Start ignored: capture already running");
            return;
        }
        let handle = self.scheduler.schedule();
        self.state = CaptureState::Running { handle };
        log::info!("Capture running");
    }

    /// Stop the render loop by cancelling the pending tick. No-op while idle.
    pub fn stop(&mut self) {
        if let CaptureState::Running { handle } = self.state {
            self.scheduler.cancel(handle);
            self.state = CaptureState::Idle;
            log::info!("Capture stopped");
        }
    }

    /// The capture action.
    ///
    /// Idle: resume live rendering. Running: freeze and copy whatever the
    /// output currently shows (the last published grid, not a fresh frame)
    /// to the clipboard.
    pub fn toggle_capture(&mut self) -> CaptureOutcome {
        if !self.is_running() {
            self.start();
            return CaptureOutcome::Resumed;
        }

        self.stop();
        let text = self.output.displayed_text();
        self.clipboard.write_text(&text);
        log::info!("Captured frame ({} characters)", text.chars().count());
        CaptureOutcome::Captured(text)
    }

    /// Begin playback on the video source, then start rendering.
    ///
    /// On failure the controller stays as it was and the error is returned
    /// for the caller to report; the action can be retried.
    pub fn start_playback(&mut self) -> Result<(), CameraError> {
        self.source.play()?;
        self.start();
        Ok(())
    }

    /// Run one tick fired by the scheduler.
    ///
    /// Ticks whose handle is not the current one (cancelled, or from an
    /// earlier chain) are dropped.
    pub fn tick(&mut self, fired: TickHandle) {
        match self.state {
            CaptureState::Running { handle } if handle == fired => {}
            _ => {
                log::trace!("Dropping stale tick {}", fired.id());
                return;
            }
        }

        let next = self.scheduler.schedule();
        self.state = CaptureState::Running { handle: next };

        match self.render_current_frame() {
            Ok(()) => {
                if self.failure_streak > 0 {
                    log::info!("Rendering recovered after {} failed ticks", self.failure_streak);
                }
                self.failure_streak = 0;
                self.ticks_rendered += 1;
            }
            Err(e) => {
                if self.failure_streak == 0 {
                    log::warn!("Tick failed: {}", e);
                } else {
                    log::debug!("Tick failed: {}", e);
                }
                self.failure_streak += 1;
                self.ticks_failed += 1;
            }
        }
    }

    fn render_current_frame(&mut self) -> Result<(), TickError> {
        let frame = self.source.current_frame()?;
        self.sampler.draw(&frame)?;
        let pixels = self.sampler.read_pixels();
        let grid = pixels.render(&self.ramp)?;
        self.output.publish(&grid)?;
        Ok(())
    }
}
