//! Video input: sources, frame types and the sampling canvas.
//!
//! - [`VideoSource`] is the live feed; [`PatternSource`] is always
//!   available, [`CameraSource`] needs the `camera` feature
//! - [`PixelSampler`] / [`Canvas`] downsample and mirror a frame onto the
//!   fixed-size working buffer the renderer reads

#[cfg(feature = "camera")]
mod capture;
#[cfg(feature = "camera")]
mod capture_loop;
#[cfg(feature = "camera")]
mod device;
mod frame_utils;
mod pattern;
mod sampler;
mod source;
mod types;

#[cfg(feature = "camera")]
pub use capture::CameraSource;
#[cfg(feature = "camera")]
pub use device::list_devices;
pub use frame_utils::mirror_horizontal;
pub use pattern::PatternSource;
pub use sampler::{Canvas, PixelSampler, SampleError};
pub use source::VideoSource;
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, FrameFormat, Resolution};
