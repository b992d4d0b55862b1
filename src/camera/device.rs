//! Camera device enumeration.

use nokhwa::query;
use nokhwa::utils::ApiBackend;

use super::types::{CameraError, CameraInfo};

/// List all camera devices on the system.
///
/// An empty list is not an error.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    Ok(devices
        .into_iter()
        .map(|d| CameraInfo {
            index: d.index().as_index().unwrap_or(0),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect())
}

/// Check that device `index` exists.
pub fn find_device(index: u32) -> Result<CameraInfo, CameraError> {
    let devices = list_devices()?;
    if devices.is_empty() {
        return Err(CameraError::NoDevices);
    }
    devices
        .into_iter()
        .find(|d| d.index == index)
        .ok_or(CameraError::DeviceNotFound(index))
}
