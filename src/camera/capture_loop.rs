//! Background capture thread for the webcam source.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::frame_utils::convert_to_rgb;
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// Run the capture loop until `stop` is raised.
///
/// Reports the negotiated resolution and frame rate (or the open error)
/// on `info_tx` exactly once, then keeps the latest decoded frame in
/// `latest`.
pub fn run_capture_loop(
    settings: CameraSettings,
    latest: Arc<Mutex<Option<Frame>>>,
    stop: Arc<AtomicBool>,
    info_tx: Sender<Result<(Resolution, u32), CameraError>>,
) {
    let index = CameraIndex::Index(settings.device_index);

    let mut camera = match open_camera_with_fallback(&index, &settings) {
        Ok(cam) => cam,
        Err(e) => {
            let _ = info_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(CameraError::StreamFailed(e.to_string())));
        return;
    }

    let res = camera.resolution();
    let actual = Resolution::new(res.width(), res.height());
    let _ = info_tx.send(Ok((actual, camera.frame_rate())));

    let mut decode_failures = 0u64;
    while !stop.load(Ordering::Relaxed) {
        if let Ok(raw_frame) = camera.frame() {
            match convert_to_rgb(&raw_frame) {
                Some(frame) => *latest.lock() = Some(frame),
                None => {
                    decode_failures += 1;
                    if decode_failures == 1 {
                        log::warn!("Dropping camera frame that failed to decode");
                    }
                }
            }
        }

        thread::sleep(Duration::from_millis(1));
    }

    let _ = camera.stop_stream();
    log::debug!("Capture loop exited ({} undecodable frames)", decode_failures);
}

/// Open the camera, trying NV12, then MJPEG, then whatever the device offers.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested_resolution =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::NV12,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_resolution,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;
    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format attempt failed: {}", e);
                last_error = Some(e);
            }
        }
    }

    let message = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no format attempted".to_string());
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("authorization")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(message))
    }
}
