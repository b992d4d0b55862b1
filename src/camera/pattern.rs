//! Synthetic video source for running without a camera.

use super::source::VideoSource;
use super::types::{CameraError, Frame, Resolution};

/// Animated test pattern: a diagonal gradient drifting over time with a
/// bright disc orbiting the centre.
///
/// Every call to [`VideoSource::current_frame`] advances the animation by
/// one step, so consecutive frames differ.
#[derive(Debug, Clone)]
pub struct PatternSource {
    resolution: Resolution,
    playing: bool,
    step: u64,
}

impl PatternSource {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            playing: false,
            step: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Render the pattern for animation step `step`.
    pub fn frame_at(&self, step: u64) -> Frame {
        let width = self.resolution.width;
        let height = self.resolution.height;
        let mut data = Vec::with_capacity(self.resolution.area() * 3);

        let span = (width + height).max(1) as u64;
        let drift = step * 4;

        let angle = step as f32 * 0.05;
        let cx = width as f32 / 2.0 + angle.cos() * width as f32 / 4.0;
        let cy = height as f32 / 2.0 + angle.sin() * height as f32 / 4.0;
        let radius = height.min(width) as f32 / 6.0;
        let radius_sq = radius * radius;

        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let value = if dx * dx + dy * dy <= radius_sq {
                    255
                } else {
                    (((x + y) as u64 * 255 / span + drift) % 256) as u8
                };
                data.extend_from_slice(&[value, value, value]);
            }
        }

        Frame::rgb(data, width, height)
    }
}

impl Default for PatternSource {
    fn default() -> Self {
        Self::new(Resolution::SOURCE)
    }
}

impl VideoSource for PatternSource {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn play(&mut self) -> Result<(), CameraError> {
        if !self.playing {
            log::info!("Pattern source playing at {}", self.resolution);
        }
        self.playing = true;
        Ok(())
    }

    fn current_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.playing {
            return Err(CameraError::NotPlaying);
        }
        let frame = self.frame_at(self.step);
        self.step = self.step.wrapping_add(1);
        Ok(frame)
    }
}
