//! Top-level error of the binary.

use std::path::PathBuf;
use std::time::Duration;

use crate::camera::CameraError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Failed to open log file '{}': {}", path.display(), source)]
    Log {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("No frame arrived from the video source within {waited:?}")]
    NothingRendered { waited: Duration },
}
