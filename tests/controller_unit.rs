//! Unit tests for the capture controller state machine, using hand-written
//! capability doubles.

use ascii_mirror::ascii::{GlyphRamp, PixelBuffer, TextGrid};
use ascii_mirror::camera::{
    CameraError, Canvas, Frame, PixelSampler, Resolution, SampleError, VideoSource,
};
use ascii_mirror::clipboard::ClipboardSink;
use ascii_mirror::controller::{
    CaptureController, CaptureOutcome, CaptureState, FrameScheduler, Scheduler, TickHandle,
};
use ascii_mirror::output::{OutputSink, SinkError, TextBuffer};

// ==================== Doubles ====================

/// Source that replays one frame; playback and frame reads can be made to fail.
struct StillSource {
    frame: Frame,
    playing: bool,
    fail_play: bool,
    /// Frame reads left that return `NoFrame`
    missing_frames: usize,
}

impl StillSource {
    fn gray(grays: &[u8], width: u32, height: u32) -> Self {
        let data = grays.iter().flat_map(|&g| [g, g, g]).collect();
        Self {
            frame: Frame::rgb(data, width, height),
            playing: false,
            fail_play: false,
            missing_frames: 0,
        }
    }
}

impl VideoSource for StillSource {
    fn resolution(&self) -> Resolution {
        self.frame.resolution()
    }

    fn play(&mut self) -> Result<(), CameraError> {
        if self.fail_play {
            return Err(CameraError::PermissionDenied);
        }
        self.playing = true;
        Ok(())
    }

    fn current_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.playing {
            return Err(CameraError::NotPlaying);
        }
        if self.missing_frames > 0 {
            self.missing_frames -= 1;
            return Err(CameraError::NoFrame);
        }
        Ok(self.frame.clone())
    }
}

/// Sampler that returns a fixed buffer and counts draws.
struct FixedSampler {
    pixels: PixelBuffer,
    draws: usize,
}

impl PixelSampler for FixedSampler {
    fn draw(&mut self, _frame: &Frame) -> Result<(), SampleError> {
        self.draws += 1;
        Ok(())
    }

    fn read_pixels(&self) -> PixelBuffer {
        self.pixels.clone()
    }
}

/// Output that fails every publish.
#[derive(Default)]
struct BrokenOutput;

impl OutputSink for BrokenOutput {
    fn publish(&mut self, _grid: &TextGrid) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::other("display gone")))
    }

    fn displayed_text(&self) -> String {
        String::new()
    }
}

#[derive(Default)]
struct RecordingClipboard {
    copies: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) {
        self.copies.push(text.to_string());
    }
}

/// Scheduler that logs every call.
#[derive(Default)]
struct ManualScheduler {
    next_id: u64,
    scheduled: Vec<TickHandle>,
    cancelled: Vec<TickHandle>,
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.scheduled.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.cancelled.push(handle);
    }
}

type TestController =
    CaptureController<StillSource, Canvas, TextBuffer, RecordingClipboard, ManualScheduler>;

/// 2x2 pipeline with ramp "ABCD" and gray levels 0, 64, 128, 255.
fn abcd_controller() -> TestController {
    CaptureController::with_ramp(
        StillSource::gray(&[0, 64, 128, 255], 2, 2),
        Canvas::new(Resolution::new(2, 2), false),
        TextBuffer::new(),
        RecordingClipboard::default(),
        ManualScheduler::default(),
        GlyphRamp::new("ABCD").unwrap(),
    )
}

fn current_handle<V, P, O, C, S>(controller: &CaptureController<V, P, O, C, S>) -> TickHandle {
    match controller.state() {
        CaptureState::Running { handle } => handle,
        CaptureState::Idle => panic!("controller is idle"),
    }
}

// ==================== Start / stop ====================

#[test]
fn test_new_controller_is_idle() {
    let controller = abcd_controller();
    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(controller.scheduler().scheduled.is_empty());
}

#[test]
fn test_start_schedules_one_tick() {
    let mut controller = abcd_controller();
    controller.start();

    assert!(controller.is_running());
    assert_eq!(controller.scheduler().scheduled.len(), 1);
    assert_eq!(current_handle(&controller), controller.scheduler().scheduled[0]);
}

#[test]
fn test_start_while_running_is_noop() {
    let mut controller = abcd_controller();
    controller.start();
    let handle = current_handle(&controller);

    controller.start();
    assert_eq!(controller.scheduler().scheduled.len(), 1);
    assert_eq!(current_handle(&controller), handle);
}

#[test]
fn test_stop_cancels_pending_tick() {
    let mut controller = abcd_controller();
    controller.start();
    let handle = current_handle(&controller);

    controller.stop();
    assert_eq!(controller.state(), CaptureState::Idle);
    assert_eq!(controller.scheduler().cancelled, vec![handle]);
}

#[test]
fn test_stop_while_idle_touches_nothing() {
    let mut controller = abcd_controller();
    controller.stop();

    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(controller.scheduler().scheduled.is_empty());
    assert!(controller.scheduler().cancelled.is_empty());
}

#[test]
fn test_second_stop_is_noop() {
    let mut controller = abcd_controller();
    controller.start();
    let handle = current_handle(&controller);

    controller.stop();
    controller.stop();

    assert_eq!(controller.state(), CaptureState::Idle);
    assert_eq!(controller.scheduler().cancelled, vec![handle]);
    assert_eq!(controller.scheduler().scheduled.len(), 1);
}

// ==================== Ticks ====================

#[test]
fn test_tick_publishes_and_reschedules() {
    let mut controller = abcd_controller();
    controller.start_playback().unwrap();
    let first = current_handle(&controller);

    controller.tick(first);

    assert_eq!(controller.output().text(), "AB\nCD\n");
    assert_eq!(controller.ticks_rendered(), 1);
    let second = current_handle(&controller);
    assert_ne!(first, second);
    assert_eq!(controller.scheduler().scheduled, vec![first, second]);
}

#[test]
fn test_stale_tick_ignored() {
    let mut controller = abcd_controller();
    controller.start_playback().unwrap();
    let first = current_handle(&controller);
    controller.stop();

    controller.tick(first);
    assert_eq!(controller.state(), CaptureState::Idle);
    assert_eq!(controller.output().publish_count(), 0);

    // A handle from an earlier chain is stale too
    controller.start();
    controller.tick(first);
    assert_eq!(controller.output().publish_count(), 0);
    assert_eq!(controller.scheduler().scheduled.len(), 2);
}

#[test]
fn test_missing_frame_keeps_loop_alive() {
    let mut controller = abcd_controller();
    controller.source_mut().missing_frames = 2;
    controller.start_playback().unwrap();

    for _ in 0..3 {
        let handle = current_handle(&controller);
        controller.tick(handle);
        assert!(controller.is_running());
    }

    assert_eq!(controller.ticks_failed(), 2);
    assert_eq!(controller.ticks_rendered(), 1);
    assert_eq!(controller.output().text(), "AB\nCD\n");
}

#[test]
fn test_tick_before_play_fails_quietly() {
    let mut controller = abcd_controller();
    controller.start();
    let handle = current_handle(&controller);

    controller.tick(handle);
    assert!(controller.is_running());
    assert_eq!(controller.ticks_failed(), 1);
    assert_eq!(controller.output().text(), "");
}

#[test]
fn test_publish_failure_keeps_loop_alive() {
    let mut controller = CaptureController::with_ramp(
        StillSource::gray(&[0], 1, 1),
        Canvas::new(Resolution::new(1, 1), false),
        BrokenOutput,
        RecordingClipboard::default(),
        ManualScheduler::default(),
        GlyphRamp::new("AB").unwrap(),
    );
    controller.start_playback().unwrap();

    let handle = current_handle(&controller);
    controller.tick(handle);
    assert!(controller.is_running());
    assert_eq!(controller.ticks_failed(), 1);
}

#[test]
fn test_malformed_pixels_fail_the_tick() {
    let mut controller = CaptureController::new(
        StillSource::gray(&[0], 1, 1),
        FixedSampler {
            pixels: PixelBuffer::from_rgba(vec![0; 3], 1, 1),
            draws: 0,
        },
        TextBuffer::new(),
        RecordingClipboard::default(),
        ManualScheduler::default(),
    );
    controller.start_playback().unwrap();

    let handle = current_handle(&controller);
    controller.tick(handle);
    assert_eq!(controller.sampler().draws, 1);
    assert_eq!(controller.ticks_failed(), 1);
    assert_eq!(controller.output().publish_count(), 0);
}

// ==================== Capture ====================

#[test]
fn test_capture_freezes_and_copies_displayed_text() {
    let mut controller = abcd_controller();
    controller.start_playback().unwrap();
    let handle = current_handle(&controller);
    controller.tick(handle);

    let outcome = controller.toggle_capture();

    assert_eq!(outcome, CaptureOutcome::Captured("AB\nCD\n".to_string()));
    assert_eq!(controller.state(), CaptureState::Idle);
    assert_eq!(controller.clipboard().copies, vec!["AB\nCD\n".to_string()]);
}

#[test]
fn test_capture_copies_last_frame_not_a_fresh_one() {
    let mut controller = abcd_controller();
    controller.start_playback().unwrap();
    let handle = current_handle(&controller);
    controller.tick(handle);

    // The camera moved on, but no tick has published the new frame
    controller.source_mut().frame = Frame::rgb(vec![255; 12], 2, 2);

    controller.toggle_capture();
    assert_eq!(controller.clipboard().copies, vec!["AB\nCD\n".to_string()]);
}

#[test]
fn test_capture_before_any_frame_copies_empty_text() {
    let mut controller = abcd_controller();
    controller.start();

    assert_eq!(controller.toggle_capture(), CaptureOutcome::Captured(String::new()));
    assert_eq!(controller.clipboard().copies, vec![String::new()]);
}

#[test]
fn test_capture_while_idle_resumes_without_copy() {
    let mut controller = abcd_controller();

    assert_eq!(controller.toggle_capture(), CaptureOutcome::Resumed);
    assert!(controller.is_running());
    assert!(controller.clipboard().copies.is_empty());
}

#[test]
fn test_capture_resume_capture_cycle() {
    let mut controller = abcd_controller();
    controller.start_playback().unwrap();

    for round in 1..=3 {
        let handle = current_handle(&controller);
        controller.tick(handle);
        assert!(matches!(controller.toggle_capture(), CaptureOutcome::Captured(_)));
        assert_eq!(controller.toggle_capture(), CaptureOutcome::Resumed);
        assert_eq!(controller.clipboard().copies.len(), round);
    }
    // One live chain at a time: every stop cancelled the tick it replaced
    assert_eq!(controller.scheduler().cancelled.len(), 3);
}

// ==================== Playback ====================

#[test]
fn test_failed_playback_leaves_controller_idle() {
    let mut controller = abcd_controller();
    controller.source_mut().fail_play = true;

    assert_eq!(controller.start_playback(), Err(CameraError::PermissionDenied));
    assert_eq!(controller.state(), CaptureState::Idle);
    assert!(controller.scheduler().scheduled.is_empty());

    // Retry succeeds once the source recovers
    controller.source_mut().fail_play = false;
    controller.start_playback().unwrap();
    assert!(controller.is_running());
}

// ==================== Frame scheduler ====================

#[test]
fn test_frame_scheduler_drives_the_loop() {
    let mut controller = CaptureController::with_ramp(
        StillSource::gray(&[0, 64, 128, 255], 2, 2),
        Canvas::new(Resolution::new(2, 2), false),
        TextBuffer::new(),
        RecordingClipboard::default(),
        FrameScheduler::new(30),
        GlyphRamp::new("ABCD").unwrap(),
    );
    controller.start_playback().unwrap();

    for _ in 0..5 {
        let due = controller.scheduler_mut().take_due();
        assert_eq!(due.len(), 1);
        for handle in due {
            controller.tick(handle);
        }
    }
    assert_eq!(controller.ticks_rendered(), 5);

    // Stopping withdraws the queued tick
    controller.stop();
    assert!(controller.scheduler_mut().take_due().is_empty());
}
