//! Video source capability.

use super::types::{CameraError, Frame, Resolution};

/// A continuously updating video feed the controller samples once per tick.
pub trait VideoSource {
    /// Nominal frame size.
    fn resolution(&self) -> Resolution;

    /// Begin playback. Called once by the start action; may be retried
    /// after a failure.
    fn play(&mut self) -> Result<(), CameraError>;

    /// The current frame.
    ///
    /// # Errors
    /// * `CameraError::NotPlaying` - before a successful `play()`
    /// * `CameraError::NoFrame` - playing, but nothing captured yet
    fn current_frame(&mut self) -> Result<Frame, CameraError>;
}

impl<T: VideoSource + ?Sized> VideoSource for Box<T> {
    fn resolution(&self) -> Resolution {
        (**self).resolution()
    }

    fn play(&mut self) -> Result<(), CameraError> {
        (**self).play()
    }

    fn current_frame(&mut self) -> Result<Frame, CameraError> {
        (**self).current_frame()
    }
}

impl<T: VideoSource + ?Sized> VideoSource for &mut T {
    fn resolution(&self) -> Resolution {
        (**self).resolution()
    }

    fn play(&mut self) -> Result<(), CameraError> {
        (**self).play()
    }

    fn current_frame(&mut self) -> Result<Frame, CameraError> {
        (**self).current_frame()
    }
}
