//! Webcam video source.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use super::capture_loop::run_capture_loop;
use super::device::find_device;
use super::source::VideoSource;
use super::types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};

/// Webcam feed captured on a background thread.
///
/// Construction does not touch the device. [`CameraSource::probe`] checks
/// that it exists; [`VideoSource::play`] opens the stream and spawns the
/// capture thread, which keeps only the most recent frame.
pub struct CameraSource {
    /// Latest captured frame (shared with capture thread)
    latest: Arc<Mutex<Option<Frame>>>,
    capture_thread: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    settings: CameraSettings,
    /// Negotiated resolution, once playing
    actual_resolution: Option<Resolution>,
    actual_fps: Option<u32>,
}

impl std::fmt::Debug for CameraSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSource")
            .field("settings", &self.settings)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl CameraSource {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            latest: Arc::new(Mutex::new(None)),
            capture_thread: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            settings,
            actual_resolution: None,
            actual_fps: None,
        }
    }

    /// Check that the configured device is present.
    pub fn probe(&self) -> Result<CameraInfo, CameraError> {
        find_device(self.settings.device_index)
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Frame rate the camera negotiated, once playing.
    pub fn actual_fps(&self) -> Option<u32> {
        self.actual_fps
    }

    pub fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Stop the capture thread and wait for it.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
    }

    fn start_capture(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Err(CameraError::AlreadyRunning);
        }
        // A previous thread may have died; reap it before respawning
        self.stop();
        self.stop_signal.store(false, Ordering::SeqCst);
        *self.latest.lock() = None;

        let latest = Arc::clone(&self.latest);
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();
        let (info_tx, info_rx) = mpsc::channel();

        self.capture_thread = Some(std::thread::spawn(move || {
            run_capture_loop(settings, latest, stop, info_tx);
        }));

        match info_rx.recv() {
            Ok(Ok((resolution, fps))) => {
                log::info!("Camera streaming at {} @ {} fps", resolution, fps);
                self.actual_resolution = Some(resolution);
                self.actual_fps = Some(fps);
                Ok(())
            }
            Ok(Err(e)) => {
                self.stop();
                Err(e)
            }
            Err(_) => {
                self.stop();
                Err(CameraError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ))
            }
        }
    }
}

impl VideoSource for CameraSource {
    fn resolution(&self) -> Resolution {
        self.actual_resolution.unwrap_or(self.settings.resolution)
    }

    fn play(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Ok(());
        }
        self.probe()?;
        self.start_capture()
    }

    fn current_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.is_running() {
            return Err(CameraError::NotPlaying);
        }
        self.latest.lock().clone().ok_or(CameraError::NoFrame)
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.stop();
    }
}
