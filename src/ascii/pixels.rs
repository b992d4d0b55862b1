//! RGBA pixel buffer read back from the sampling surface.

use super::grid::TextGrid;
use super::ramp::GlyphRamp;
use super::render::{render_frame, RenderError};

/// Channels per pixel: red, green, blue, alpha.
pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA pixels of a fixed `width` x `height`.
///
/// Lives for a single tick: read back from the canvas, rendered, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGBA bytes
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelBuffer {
    /// A transparent black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            data: vec![0; len],
            width,
            height,
        }
    }

    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Build an opaque buffer from RGB triples in row-major order.
    pub fn from_rgb_pixels(pixels: &[(u8, u8, u8)], width: u32, height: u32) -> Self {
        let data = pixels
            .iter()
            .flat_map(|&(r, g, b)| [r, g, b, 255])
            .collect();
        Self::from_rgba(data, width, height)
    }

    /// Byte length implied by `width` and `height`.
    pub fn expected_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(BYTES_PER_PIXEL)
    }

    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.expected_len()
    }

    /// RGBA value at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.data.get(idx..idx + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Render this buffer with the given ramp.
    pub fn render(&self, ramp: &GlyphRamp) -> Result<TextGrid, RenderError> {
        render_frame(self, ramp)
    }
}
