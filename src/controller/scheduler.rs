//! Next-frame tick scheduling.

use std::time::Duration;

/// Opaque id of one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Schedules one tick on the next display frame.
///
/// Whoever drives the scheduler hands fired handles back to
/// [`CaptureController::tick`](super::CaptureController::tick).
pub trait Scheduler {
    /// Request a tick on the next frame.
    fn schedule(&mut self) -> TickHandle;

    /// Withdraw a pending tick. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Display-rate scheduler: pending handles fire together on the next frame.
///
/// The event loop calls [`FrameScheduler::take_due`] once per
/// `frame_interval`. A tick scheduled while handling a frame lands in the
/// following frame, never the current one.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame_interval: Duration,
    pending: Vec<TickHandle>,
    next_id: u64,
}

impl FrameScheduler {
    /// Scheduler for a display refreshing `fps` times per second (minimum 1).
    pub fn new(fps: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Handles waiting for the next frame.
    pub fn pending(&self) -> &[TickHandle] {
        &self.pending
    }

    /// Drain the handles that fire on this frame.
    pub fn take_due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
