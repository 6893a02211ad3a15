/// Point rasterizer writing into a CPU-side pixel buffer
use nalgebra::Point2;

use crate::error::SurfaceError;

/// Cleared pixel value (black), `0xAARRGGBB`
pub const BACKGROUND: u32 = 0x0000_0000;
/// Plotted pixel value (solid white), `0xAARRGGBB`
pub const FOREGROUND: u32 = 0xFFFF_FFFF;

/// A `width * height` grid of 32-bit `0xAARRGGBB` pixels, row-major, so the
/// pixel at `(x, y)` lives at `x + y * width`
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
        }
    }

    /// Like [`PixelBuffer::new`], but reports a size that cannot be
    /// allocated instead of aborting
    pub fn try_new(width: usize, height: usize) -> Result<Self, SurfaceError> {
        let too_large = || {
            SurfaceError::Init(format!(
                "cannot allocate a {}x{} pixel buffer",
                width, height
            ))
        };
        let len = width.checked_mul(height).ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, BACKGROUND);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[x + y * self.width])
        } else {
            None
        }
    }

    /// Number of pixels that are not background
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != BACKGROUND).count()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    /// Set the pixel under each point to the foreground color.
    ///
    /// Coordinates are truncated towards zero. Points left of or above the
    /// origin, at or past the right/bottom edge, or non-finite are dropped.
    pub fn plot(&mut self, points: &[Point2<f32>]) {
        for point in points {
            if let Some(index) = self.index_of(point) {
                self.pixels[index] = FOREGROUND;
            }
        }
    }

    fn index_of(&self, point: &Point2<f32>) -> Option<usize> {
        // NaN fails both comparisons
        if !(point.x >= 0.0 && point.y >= 0.0) {
            return None;
        }
        // Saturating casts: +inf and huge values become usize::MAX
        let x = point.x as usize;
        let y = point.y as usize;
        if x < self.width && y < self.height {
            Some(x + y * self.width)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_background() {
        let buffer = PixelBuffer::new(4, 3);
        assert_eq!(buffer.pixels().len(), 12);
        assert_eq!(buffer.lit_count(), 0);
    }

    #[test]
    fn test_try_new_reports_unallocatable_size() {
        let buffer = PixelBuffer::try_new(3, 2).unwrap();
        assert_eq!(buffer, PixelBuffer::new(3, 2));

        assert!(matches!(
            PixelBuffer::try_new(usize::MAX, 2),
            Err(SurfaceError::Init(_))
        ));
        assert!(matches!(
            PixelBuffer::try_new(usize::MAX / 8, 1),
            Err(SurfaceError::Init(_))
        ));
    }

    #[test]
    fn test_plot_truncates_coordinates() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.plot(&[Point2::new(1.9, 2.2)]);
        assert_eq!(buffer.pixel(1, 2), Some(FOREGROUND));
        assert_eq!(buffer.pixels()[1 + 2 * 4], FOREGROUND);
        assert_eq!(buffer.lit_count(), 1);
    }

    #[test]
    fn test_plot_overlapping_points_collapse() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.plot(&[
            Point2::new(2.0, 2.0),
            Point2::new(2.5, 2.5),
            Point2::new(2.99, 2.0),
        ]);
        assert_eq!(buffer.lit_count(), 1);
    }

    #[test]
    fn test_plot_never_writes_out_of_bounds() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.plot(&[
            Point2::new(-0.5, 1.0),
            Point2::new(1.0, -3.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
            Point2::new(3.0, 2.999),
            Point2::new(1e30, 1.0),
            Point2::new(f32::INFINITY, 0.0),
            Point2::new(f32::NAN, 1.0),
            Point2::new(1.0, f32::NAN),
            Point2::new(f32::NEG_INFINITY, 1.0),
        ]);
        assert_eq!(buffer.pixels().len(), 12);
        assert_eq!(buffer.lit_count(), 1);
        assert_eq!(buffer.pixel(3, 2), Some(FOREGROUND));
    }

    #[test]
    fn test_last_column_does_not_wrap_to_next_row() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.plot(&[Point2::new(4.2, 0.0)]);
        assert_eq!(buffer.pixel(0, 1), Some(BACKGROUND));
        assert_eq!(buffer.lit_count(), 0);
    }

    #[test]
    fn test_clear_resets_every_pixel() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.plot(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        assert_eq!(buffer.lit_count(), 2);
        buffer.clear();
        assert_eq!(buffer.lit_count(), 0);
    }

    #[test]
    fn test_zero_sized_buffer_ignores_points() {
        let mut buffer = PixelBuffer::new(0, 0);
        buffer.plot(&[Point2::new(0.0, 0.0)]);
        assert!(buffer.pixels().is_empty());
    }
}
