//! Pixel sampling surface: downsample a video frame onto the working canvas.

use crate::ascii::PixelBuffer;

use super::frame_utils::mirror_horizontal;
use super::types::{Frame, FrameFormat, Resolution};

/// Errors from drawing a frame onto the sampling surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("frame is empty ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frame holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}

/// Surface that a frame is drawn onto and RGBA pixels are read back from.
pub trait PixelSampler {
    /// Draw (downsample) `frame` onto the working buffer.
    fn draw(&mut self, frame: &Frame) -> Result<(), SampleError>;

    /// Read back the working buffer as RGBA.
    fn read_pixels(&self) -> PixelBuffer;
}

/// Fixed-size RGBA canvas with an optional horizontal mirror.
///
/// Each canvas cell is the box average of the source pixels it covers;
/// with `mirror` set the result is flipped left-right so the rendering
/// reads like a mirror.
#[derive(Debug, Clone)]
pub struct Canvas {
    surface: Frame,
    mirror: bool,
}

impl Canvas {
    pub fn new(resolution: Resolution, mirror: bool) -> Self {
        Self {
            surface: Frame {
                data: vec![0; resolution.area() * FrameFormat::Rgba.bytes_per_pixel()],
                width: resolution.width,
                height: resolution.height,
                format: FrameFormat::Rgba,
                timestamp: std::time::Instant::now(),
            },
            mirror,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.surface.resolution()
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Resolution::CANVAS, true)
    }
}

impl PixelSampler for Canvas {
    fn draw(&mut self, frame: &Frame) -> Result<(), SampleError> {
        let src_w = frame.width as usize;
        let src_h = frame.height as usize;
        if src_w == 0 || src_h == 0 {
            return Err(SampleError::EmptyFrame {
                width: frame.width,
                height: frame.height,
            });
        }

        let bpp = frame.bytes_per_pixel();
        let expected = src_w * src_h * bpp;
        if frame.data.len() != expected {
            return Err(SampleError::FrameSize {
                expected,
                actual: frame.data.len(),
            });
        }

        let dst_w = self.surface.width as usize;
        let dst_h = self.surface.height as usize;

        for cy in 0..dst_h {
            // At least one source row per cell, so upscaling also works
            let y0 = cy * src_h / dst_h;
            let y1 = ((cy + 1) * src_h / dst_h).max(y0 + 1);

            for cx in 0..dst_w {
                let x0 = cx * src_w / dst_w;
                let x1 = ((cx + 1) * src_w / dst_w).max(x0 + 1);

                let mut sum = [0u32; 3];
                let mut count = 0u32;
                for py in y0..y1 {
                    let row = py * src_w;
                    for px in x0..x1 {
                        let idx = (row + px) * bpp;
                        sum[0] += frame.data[idx] as u32;
                        sum[1] += frame.data[idx + 1] as u32;
                        sum[2] += frame.data[idx + 2] as u32;
                        count += 1;
                    }
                }

                let out = (cy * dst_w + cx) * 4;
                self.surface.data[out] = (sum[0] / count) as u8;
                self.surface.data[out + 1] = (sum[1] / count) as u8;
                self.surface.data[out + 2] = (sum[2] / count) as u8;
                self.surface.data[out + 3] = 255;
            }
        }

        if self.mirror {
            mirror_horizontal(&mut self.surface);
        }
        self.surface.timestamp = frame.timestamp;

        Ok(())
    }

    fn read_pixels(&self) -> PixelBuffer {
        PixelBuffer::from_rgba(
            self.surface.data.clone(),
            self.surface.width,
            self.surface.height,
        )
    }
}

impl<T: PixelSampler + ?Sized> PixelSampler for Box<T> {
    fn draw(&mut self, frame: &Frame) -> Result<(), SampleError> {
        (**self).draw(frame)
    }

    fn read_pixels(&self) -> PixelBuffer {
        (**self).read_pixels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RGB frame whose pixels carry the given gray values.
    fn gray_frame(values: &[u8], width: u32, height: u32) -> Frame {
        let data = values.iter().flat_map(|&v| [v, v, v]).collect();
        Frame::rgb(data, width, height)
    }

    #[test]
    fn test_box_average_without_mirror() {
        // 4x2 source -> 2x1 canvas: left cell averages {0,20,40,60}, right {100,120,140,160}
        let frame = gray_frame(&[0, 20, 100, 120, 40, 60, 140, 160], 4, 2);
        let mut canvas = Canvas::new(Resolution::new(2, 1), false);
        canvas.draw(&frame).unwrap();
        let pixels = canvas.read_pixels();
        assert_eq!(pixels.pixel(0, 0), Some([30, 30, 30, 255]));
        assert_eq!(pixels.pixel(1, 0), Some([130, 130, 130, 255]));
    }

    #[test]
    fn test_mirror_flips_cells() {
        let frame = gray_frame(&[0, 20, 100, 120, 40, 60, 140, 160], 4, 2);
        let mut canvas = Canvas::new(Resolution::new(2, 1), true);
        canvas.draw(&frame).unwrap();
        let pixels = canvas.read_pixels();
        assert_eq!(pixels.pixel(0, 0), Some([130, 130, 130, 255]));
        assert_eq!(pixels.pixel(1, 0), Some([30, 30, 30, 255]));
    }

    #[test]
    fn test_keeps_channels_separate() {
        let frame = Frame::rgb(vec![10, 20, 30, 50, 60, 70], 2, 1);
        let mut canvas = Canvas::new(Resolution::new(1, 1), false);
        canvas.draw(&frame).unwrap();
        assert_eq!(canvas.read_pixels().pixel(0, 0), Some([30, 40, 50, 255]));
    }

    #[test]
    fn test_rgba_source_alpha_ignored() {
        let frame = Frame {
            format: FrameFormat::Rgba,
            ..Frame::rgb(vec![200, 100, 50, 0], 1, 1)
        };
        let mut canvas = Canvas::new(Resolution::new(1, 1), false);
        canvas.draw(&frame).unwrap();
        assert_eq!(canvas.read_pixels().pixel(0, 0), Some([200, 100, 50, 255]));
    }

    #[test]
    fn test_upscale_repeats_source_pixels() {
        let frame = gray_frame(&[10, 90], 2, 1);
        let mut canvas = Canvas::new(Resolution::new(4, 2), false);
        canvas.draw(&frame).unwrap();
        let pixels = canvas.read_pixels();
        assert_eq!(pixels.pixel(0, 0), Some([10, 10, 10, 255]));
        assert_eq!(pixels.pixel(1, 1), Some([10, 10, 10, 255]));
        assert_eq!(pixels.pixel(2, 0), Some([90, 90, 90, 255]));
        assert_eq!(pixels.pixel(3, 1), Some([90, 90, 90, 255]));
    }

    #[test]
    fn test_read_pixels_has_canvas_shape() {
        let canvas = Canvas::default();
        let pixels = canvas.read_pixels();
        assert_eq!((pixels.width, pixels.height), (64, 48));
        assert!(pixels.is_well_formed());
        assert!(canvas.is_mirrored());
    }

    #[test]
    fn test_empty_frame_rejected() {
        let mut canvas = Canvas::default();
        let err = canvas.draw(&Frame::rgb(Vec::new(), 0, 480)).unwrap_err();
        assert_eq!(
            err,
            SampleError::EmptyFrame {
                width: 0,
                height: 480
            }
        );
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let mut canvas = Canvas::default();
        let err = canvas.draw(&Frame::rgb(vec![0; 10], 2, 2)).unwrap_err();
        assert_eq!(
            err,
            SampleError::FrameSize {
                expected: 12,
                actual: 10
            }
        );
    }
}
