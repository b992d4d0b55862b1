//! Text grid produced by the renderer.

use std::fmt;

/// Rendered frame: `height` rows of exactly `width` glyphs.
///
/// The text form terminates every row with `'\n'`, so a 2x2 grid reads
/// `"AB\nCD\n"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    /// Glyphs in row-major order
    glyphs: Vec<char>,
    width: usize,
    height: usize,
}

impl TextGrid {
    pub(crate) fn from_glyphs(glyphs: Vec<char>, width: usize, height: usize) -> Self {
        debug_assert_eq!(glyphs.len(), width * height);
        Self {
            glyphs,
            width,
            height,
        }
    }

    /// Width in glyphs.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        (0..self.height).map(move |y| &self.glyphs[y * self.width..(y + 1) * self.width])
    }

    /// Row `y` as a string (without the newline).
    pub fn row(&self, y: usize) -> Option<String> {
        self.rows().nth(y).map(|row| row.iter().collect())
    }

    /// Glyph at (x, y).
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y * self.width + x).copied()
    }

    /// Flattened text, one newline-terminated line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in self.rows() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> TextGrid {
        TextGrid::from_glyphs(vec!['A', 'B', 'C', 'D'], 2, 2)
    }

    #[test]
    fn test_to_text_terminates_rows() {
        assert_eq!(grid_2x2().to_text(), "AB\nCD\n");
        assert_eq!(grid_2x2().to_string(), "AB\nCD\n");
    }

    #[test]
    fn test_rows_and_glyphs() {
        let grid = grid_2x2();
        let rows: Vec<String> = grid.rows().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec!["AB", "CD"]);
        assert_eq!(grid.row(1).as_deref(), Some("CD"));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.glyph(1, 0), Some('B'));
        assert_eq!(grid.glyph(2, 0), None);
    }

    #[test]
    fn test_zero_width_grid_keeps_row_count() {
        let grid = TextGrid::from_glyphs(Vec::new(), 0, 3);
        assert_eq!(grid.rows().count(), 3);
        assert_eq!(grid.to_text(), "\n\n\n");
    }

    #[test]
    fn test_empty_grid() {
        let grid = TextGrid::from_glyphs(Vec::new(), 0, 0);
        assert_eq!(grid.to_text(), "");
    }
}
