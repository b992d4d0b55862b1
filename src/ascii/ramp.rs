//! Glyph ramp used as the luminance palette.

use std::fmt;

use super::mapping::char_index;

/// Glyphs of the default ramp, densest first.
///
/// The trailing run of spaces is part of the ramp: the brightest band of
/// the luminance range renders blank.
pub const DEFAULT_GLYPHS: &str = "Ñ@#WM$9876543210?!abc:+=-,^._            ";

/// Number of glyphs in [`DEFAULT_GLYPHS`] (not bytes: `Ñ` is two bytes in UTF-8).
pub const DEFAULT_RAMP_LEN: usize = 41;

/// Errors from building a [`GlyphRamp`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RampError {
    #[error("glyph ramp must contain at least one glyph")]
    Empty,
}

/// Ordered palette of glyphs, index 0 densest (dark pixels), last index
/// sparsest (light pixels).
///
/// Immutable once built; the process builds one at startup and shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Box<[char]>,
}

impl GlyphRamp {
    /// Build a ramp from a string, one glyph per `char`.
    pub fn new(glyphs: &str) -> Result<Self, RampError> {
        let glyphs: Box<[char]> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(RampError::Empty);
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs (the `N` of the index formula).
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false for a constructed ramp.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph at `index`, clamped to the last glyph.
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Glyph used for pure black.
    pub fn densest(&self) -> char {
        self.glyphs[0]
    }

    /// Glyph used for pure white.
    pub fn sparsest(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    /// Glyph for an RGB pixel.
    #[inline]
    pub fn glyph_for(&self, r: u8, g: u8, b: u8) -> char {
        let sum = r as u32 + g as u32 + b as u32;
        self.glyphs[char_index(sum, self.glyphs.len())]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_GLYPHS.chars().collect(),
        }
    }
}

impl fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in self.glyphs.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ramp_length() {
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.len(), DEFAULT_RAMP_LEN);
        assert_eq!(DEFAULT_GLYPHS.chars().count(), DEFAULT_RAMP_LEN);
        // Byte length differs because of the multi-byte leading glyph
        assert!(DEFAULT_GLYPHS.len() > DEFAULT_RAMP_LEN);
    }

    #[test]
    fn test_default_ramp_ends() {
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.densest(), 'Ñ');
        assert_eq!(ramp.sparsest(), ' ');
    }

    #[test]
    fn test_empty_ramp_rejected() {
        assert_eq!(GlyphRamp::new(""), Err(RampError::Empty));
    }

    #[test]
    fn test_glyph_clamps_index() {
        let ramp = GlyphRamp::new("#.:,").unwrap();
        assert_eq!(ramp.glyph(0), '#');
        assert_eq!(ramp.glyph(3), ',');
        assert_eq!(ramp.glyph(4), ',');
        assert_eq!(ramp.glyph(usize::MAX), ',');
    }

    #[test]
    fn test_glyph_for_extremes() {
        let ramp = GlyphRamp::new("#.:,").unwrap();
        assert_eq!(ramp.glyph_for(0, 0, 0), '#');
        assert_eq!(ramp.glyph_for(255, 255, 255), ',');
    }

    #[test]
    fn test_display_round_trips_glyphs() {
        let ramp = GlyphRamp::new("Ñ@ ").unwrap();
        assert_eq!(ramp.to_string(), "Ñ@ ");
    }
}
