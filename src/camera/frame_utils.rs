//! Frame conversion and transformation utilities.

use super::types::Frame;

/// Mirror a frame horizontally (flip left-right) in place.
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let bpp = frame.bytes_per_pixel();
    let stride = width * bpp;

    for y in 0..height {
        let row_start = y * stride;
        let Some(row) = frame.data.get_mut(row_start..row_start + stride) else {
            break;
        };
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}

/// Convert a nokhwa buffer to an RGB [`Frame`].
///
/// Handles the camera's native format (MJPEG, YUYV, NV12, ...) through
/// nokhwa's decoder. Returns `None` if decoding fails.
#[cfg(feature = "camera")]
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    use nokhwa::pixel_format::RgbFormat;

    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let resolution = buffer.resolution();
    Some(Frame::rgb(
        decoded.into_raw(),
        resolution.width(),
        resolution.height(),
    ))
}
