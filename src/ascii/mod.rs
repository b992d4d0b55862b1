//! Frame renderer: turns an RGBA pixel buffer into a grid of glyphs.
//!
//! The pipeline per pixel is:
//!
//! 1. **Luminance** - unweighted mean of red, green and blue
//! 2. **Glyph index** - `floor(avg / 255 * N)` clamped to the last glyph
//! 3. **Lookup** - pick the glyph from the [`GlyphRamp`]
//!
//! Rendering is a pure function of the pixel data: mirroring and
//! downsampling happen earlier, on the sampling surface.

mod grid;
mod mapping;
mod pixels;
mod ramp;
mod render;

pub use grid::TextGrid;
pub use mapping::{char_index, MAX_RGB_SUM};
pub use pixels::{PixelBuffer, BYTES_PER_PIXEL};
pub use ramp::{GlyphRamp, RampError, DEFAULT_GLYPHS, DEFAULT_RAMP_LEN};
pub use render::{render_frame, RenderError};
