//! Luminance to glyph index mapping.

/// Largest possible `r + g + b` for 8-bit channels.
pub const MAX_RGB_SUM: u32 = 255 * 3;

/// Glyph index for a pixel whose channels sum to `rgb_sum`, on a ramp of
/// `levels` glyphs.
///
/// Computes `floor((avg / 255) * levels)` with `avg = rgb_sum / 3`, the
/// unweighted luminance (all three channels weigh the same), in
/// integer arithmetic (`rgb_sum * levels / 765`) so the result is exact.
/// At full white that formula yields `levels`, one past the end, so the
/// result is clamped to `levels - 1`.
///
/// # Example
/// ```ignore
/// assert_eq!(char_index(0, 41), 0);        // black -> densest
/// assert_eq!(char_index(765, 41), 40);     // white -> sparsest
/// ```
#[inline]
pub fn char_index(rgb_sum: u32, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    let sum = rgb_sum.min(MAX_RGB_SUM) as usize;
    (sum * levels / MAX_RGB_SUM as usize).min(levels - 1)
}
