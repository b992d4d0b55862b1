//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Frame or canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Nominal size of the live video source (640x480).
    pub const SOURCE: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// Size of the working canvas, and therefore of the text grid (64x48).
    pub const CANVAS: Resolution = Resolution {
        width: 64,
        height: 48,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::SOURCE
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel format of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
    /// RGBA format (4 bytes per pixel)
    Rgba,
}

impl FrameFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            FrameFormat::Rgb => 3,
            FrameFormat::Rgba => 4,
        }
    }
}

/// A frame from a video source.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data, row-major
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Wrap RGB bytes as a frame stamped now.
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    /// Get the number of bytes per pixel (3 for RGB, 4 for RGBA).
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::SOURCE,
            fps: 30,
        }
    }
}

/// Errors that can occur while acquiring or reading a video source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No cameras found on the system
    NoDevices,
    /// Failed to query camera devices
    QueryFailed(String),
    /// Failed to open camera
    OpenFailed(String),
    /// Camera permission denied (macOS/iOS)
    PermissionDenied,
    /// Camera device not found at specified index
    DeviceNotFound(u32),
    /// Failed to start video stream
    StreamFailed(String),
    /// Capture thread is already running
    AlreadyRunning,
    /// Frame requested before playback started
    NotPlaying,
    /// Playback started but no frame has arrived yet
    NoFrame,
    /// Binary built without camera support
    Unsupported,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoDevices => write!(f, "No cameras found"),
            CameraError::QueryFailed(msg) => write!(f, "Failed to query cameras: {}", msg),
            CameraError::OpenFailed(msg) => write!(f, "Failed to open camera: {}", msg),
            CameraError::PermissionDenied => {
                write!(
                    f,
                    "Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera"
                )
            }
            CameraError::DeviceNotFound(index) => {
                write!(
                    f,
                    "Camera device {} not found. Run 'list-cameras' to see available devices",
                    index
                )
            }
            CameraError::StreamFailed(msg) => write!(f, "Failed to start camera stream: {}", msg),
            CameraError::AlreadyRunning => write!(f, "Capture thread is already running"),
            CameraError::NotPlaying => write!(f, "Video source is not playing"),
            CameraError::NoFrame => write!(f, "No frame available yet"),
            CameraError::Unsupported => {
                write!(f, "Camera support not compiled in (rebuild with --features camera)")
            }
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "Test Camera".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] Test Camera (Built-in)");
    }

    #[test]
    fn test_resolution_constants() {
        assert_eq!(Resolution::SOURCE, Resolution::new(640, 480));
        assert_eq!(Resolution::CANVAS, Resolution::new(64, 48));
        assert_eq!(Resolution::CANVAS.area(), 3072);
        assert_eq!(Resolution::default(), Resolution::SOURCE);
        assert_eq!(Resolution::CANVAS.to_string(), "64x48");
    }

    #[test]
    fn test_camera_settings_default() {
        let settings = CameraSettings::default();
        assert_eq!(settings.device_index, 0);
        assert_eq!(settings.resolution, Resolution::SOURCE);
        assert_eq!(settings.fps, 30);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(format!("{}", CameraError::NoDevices), "No cameras found");
        assert_eq!(
            format!("{}", CameraError::OpenFailed("test".to_string())),
            "Failed to open camera: test"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert!(format!("{}", CameraError::DeviceNotFound(5)).contains("5"));
        assert_eq!(
            format!("{}", CameraError::NotPlaying),
            "Video source is not playing"
        );
        assert!(format!("{}", CameraError::Unsupported).contains("--features camera"));
    }

    #[test]
    fn test_frame_bytes_per_pixel() {
        let rgb = Frame::rgb(vec![0; 6], 2, 1);
        assert_eq!(rgb.bytes_per_pixel(), 3);
        assert_eq!(rgb.resolution(), Resolution::new(2, 1));

        let rgba = Frame {
            format: FrameFormat::Rgba,
            ..rgb
        };
        assert_eq!(rgba.bytes_per_pixel(), 4);
    }
}
