//! Synthetic image builders for testing.

use stockshot_core::domain::{ImageInfo, PixelBuffer};

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with specific
/// characteristics (sharp, flat, clipped, symmetric, etc.).
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Builds a grayscale image from a per-pixel luma function.
    #[must_use]
    pub fn gray_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
        Self::rgb_fn(width, height, |x, y| {
            let v = f(x, y);
            [v, v, v]
        })
    }

    /// Builds an opaque RGB image from a per-pixel function.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn rgb_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = f(x, y);
            [r, g, b, 255]
        })
        .unwrap_or_else(|e| panic!("synthetic image {width}x{height}: {e}"))
    }

    /// Wraps a buffer as an [`ImageInfo`] with a synthetic path.
    #[must_use]
    pub fn info(name: &str, buffer: PixelBuffer) -> ImageInfo {
        ImageInfo::new(format!("synthetic://{name}"), buffer)
    }

    // === Sharp/High-Contrast Images ===

    /// Creates a high-contrast checkerboard pattern (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> PixelBuffer {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a black/white checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> PixelBuffer {
        Self::gray_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                255
            } else {
                0
            }
        })
    }

    /// Creates vertical bars alternating between two luma values.
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32, dark: u8, light: u8) -> PixelBuffer {
        Self::gray_fn(width, height, |x, _| {
            if (x / bar_width) % 2 == 0 {
                light
            } else {
                dark
            }
        })
    }

    // === Flat Images ===

    /// Creates a uniform gray image (no edges).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> PixelBuffer {
        Self::gray_fn(width, height, |_, _| value)
    }

    /// Creates a uniform color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> PixelBuffer {
        Self::rgb_fn(width, height, |_, _| [r, g, b])
    }

    /// Creates a smooth horizontal gradient between two luma values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32, from: u8, to: u8) -> PixelBuffer {
        let span = i64::from(to) - i64::from(from);
        let last = i64::from(width.saturating_sub(1).max(1));
        Self::gray_fn(width, height, |x, _| {
            (i64::from(from) + span * i64::from(x) / last) as u8
        })
    }

    // === Exposure Images ===

    /// Creates a completely white image.
    #[must_use]
    pub fn overexposed(width: u32, height: u32) -> PixelBuffer {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a completely black image.
    #[must_use]
    pub fn underexposed(width: u32, height: u32) -> PixelBuffer {
        Self::uniform_gray(width, height, 0)
    }

    // === Composition Images ===

    /// Creates an image that is exactly mirror-symmetric left to right.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mirror_symmetric(width: u32, height: u32) -> PixelBuffer {
        Self::rgb_fn(width, height, |x, y| {
            let d = x.min(width - 1 - x);
            let v = ((d * 7 + y * 3) % 200 + 30) as u8;
            [v, v.saturating_add(10), v.saturating_sub(10)]
        })
    }

    /// Creates a sky/ground split with the edge after row `horizon_row`.
    #[must_use]
    pub fn horizon(width: u32, height: u32, horizon_row: u32) -> PixelBuffer {
        Self::rgb_fn(width, height, |_, y| {
            if y <= horizon_row {
                [150, 180, 210]
            } else {
                [70, 90, 50]
            }
        })
    }

    /// Creates a mid-gray scene with a textured subject centered on `(cx, cy)`.
    ///
    /// The subject is a small checkerboard of `size` pixels in muted tones, which
    /// produces strong focal points at that location.
    #[must_use]
    pub fn subject_at(width: u32, height: u32, cx: u32, cy: u32, size: u32) -> PixelBuffer {
        let half = size / 2;
        Self::rgb_fn(width, height, |x, y| {
            let inside = x + half >= cx && x <= cx + half && y + half >= cy && y <= cy + half;
            if !inside {
                return [128, 122, 116];
            }
            if (x / 2 + y / 2) % 2 == 0 {
                [200, 185, 170]
            } else {
                [60, 55, 50]
            }
        })
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> PixelBuffer {
        Self::uniform_gray(1, 1, value)
    }

    /// Creates a tiny 2x2 image.
    #[must_use]
    pub fn tiny(values: [[u8; 2]; 2]) -> PixelBuffer {
        Self::gray_fn(2, 2, |x, y| values[y as usize][x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(buffer: &PixelBuffer, x: usize, y: usize) -> u8 {
        buffer.pixel(x, y)[0]
    }

    #[test]
    fn test_checkerboard_pattern() {
        let img = SyntheticImageBuilder::checkerboard_with_cell_size(16, 16, 8);
        assert_eq!(luma(&img, 0, 0), 255);
        assert_eq!(luma(&img, 8, 0), 0);
    }

    #[test]
    fn test_uniform_gray() {
        let img = SyntheticImageBuilder::uniform_gray(5, 5, 100);
        assert!(img.samples().chunks_exact(4).all(|p| p == [100, 100, 100, 255]));
    }

    #[test]
    fn test_gradient_range() {
        let img = SyntheticImageBuilder::horizontal_gradient(256, 10, 0, 255);
        assert_eq!(luma(&img, 0, 0), 0);
        assert_eq!(luma(&img, 255, 0), 255);
    }

    #[test]
    fn test_mirror_symmetric() {
        let img = SyntheticImageBuilder::mirror_symmetric(33, 9);
        for y in 0..9 {
            for x in 0..33 {
                assert_eq!(img.pixel(x, y), img.pixel(32 - x, y));
            }
        }
    }

    #[test]
    fn test_horizon_rows() {
        let img = SyntheticImageBuilder::horizon(10, 30, 9);
        assert_eq!(img.pixel(0, 9), [150, 180, 210, 255]);
        assert_eq!(img.pixel(0, 10), [70, 90, 50, 255]);
    }

    #[test]
    fn test_tiny_image() {
        let img = SyntheticImageBuilder::tiny([[0, 255], [128, 64]]);
        assert_eq!(luma(&img, 0, 0), 0);
        assert_eq!(luma(&img, 1, 0), 255);
        assert_eq!(luma(&img, 0, 1), 128);
        assert_eq!(luma(&img, 1, 1), 64);
    }

    #[test]
    fn test_info_path() {
        let info = SyntheticImageBuilder::info("flat", SyntheticImageBuilder::single_pixel(7));
        assert_eq!(info.path, "synthetic://flat");
        assert_eq!(info.width, 1);
    }
}
