//! Output sink capability and an in-memory implementation.

use crate::ascii::TextGrid;

/// Errors raised while publishing a grid.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to draw output: {0}")]
    Io(#[from] std::io::Error),
}

/// Where rendered grids are displayed.
pub trait OutputSink {
    /// Display `grid`, replacing whatever was shown before.
    fn publish(&mut self, grid: &TextGrid) -> Result<(), SinkError>;

    /// Text currently on display (empty before the first publish).
    fn displayed_text(&self) -> String;
}

/// Output sink that only remembers the last published text.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    published: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of grids published so far.
    pub fn publish_count(&self) -> u64 {
        self.published
    }
}

impl OutputSink for TextBuffer {
    fn publish(&mut self, grid: &TextGrid) -> Result<(), SinkError> {
        self.text = grid.to_text();
        self.published += 1;
        Ok(())
    }

    fn displayed_text(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::{GlyphRamp, PixelBuffer};

    #[test]
    fn test_text_buffer_keeps_last_publish() {
        let ramp = GlyphRamp::new("#.").unwrap();
        let dark = PixelBuffer::from_rgb_pixels(&[(0, 0, 0)], 1, 1).render(&ramp).unwrap();
        let light = PixelBuffer::from_rgb_pixels(&[(255, 255, 255)], 1, 1)
            .render(&ramp)
            .unwrap();

        let mut sink = TextBuffer::new();
        assert_eq!(sink.displayed_text(), "");

        sink.publish(&dark).unwrap();
        sink.publish(&light).unwrap();
        assert_eq!(sink.text(), ".\n");
        assert_eq!(sink.displayed_text(), ".\n");
        assert_eq!(sink.publish_count(), 2);
    }
}
