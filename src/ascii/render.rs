//! Pixel buffer to text grid.

use super::grid::TextGrid;
use super::mapping::char_index;
use super::pixels::{PixelBuffer, BYTES_PER_PIXEL};
use super::ramp::GlyphRamp;

/// Errors from [`render_frame`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The buffer length does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidInput {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Render an RGBA buffer to a grid of glyphs.
///
/// Each pixel selects `ramp[char_index(r + g + b, ramp.len())]`; alpha is
/// ignored. The output always has `pixels.height` rows of `pixels.width`
/// glyphs.
///
/// # Errors
/// * `RenderError::InvalidInput` - if the buffer length does not match its
///   declared dimensions
pub fn render_frame(pixels: &PixelBuffer, ramp: &GlyphRamp) -> Result<TextGrid, RenderError> {
    let expected = pixels.expected_len();
    if pixels.data.len() != expected {
        return Err(RenderError::InvalidInput {
            width: pixels.width,
            height: pixels.height,
            expected,
            actual: pixels.data.len(),
        });
    }

    let glyphs = ramp.glyphs();
    let levels = glyphs.len();
    let out: Vec<char> = pixels
        .data
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|px| {
            let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
            glyphs[char_index(sum, levels)]
        })
        .collect();

    Ok(TextGrid::from_glyphs(
        out,
        pixels.width as usize,
        pixels.height as usize,
    ))
}
