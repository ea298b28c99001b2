//! Luma plane and rectangular analysis windows.

use crate::domain::PixelBuffer;

/// Per-pixel luma (unweighted mean of R, G, B), computed once per analysis.
#[derive(Debug, Clone)]
pub struct LumaPlane {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl LumaPlane {
    /// Computes the luma of every pixel in `buffer`.
    #[must_use]
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let values = buffer
            .samples()
            .chunks_exact(4)
            .map(|px| (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0)
            .collect();
        Self {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            values,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Luma at `(x, y)`.
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Forward-difference gradient magnitude at `(x, y)`.
    ///
    /// Requires `x + 1 < width` and `y + 1 < height`.
    #[must_use]
    pub fn gradient(&self, x: usize, y: usize) -> f64 {
        let center = self.at(x, y);
        let gx = self.at(x + 1, y) - center;
        let gy = self.at(x, y + 1) - center;
        gx.hypot(gy)
    }

    /// Discrete Laplacian `4c - (l + r + u + d)` at an interior pixel.
    #[must_use]
    pub fn laplacian(&self, x: usize, y: usize) -> f64 {
        4.0 * self.at(x, y)
            - (self.at(x - 1, y) + self.at(x + 1, y) + self.at(x, y - 1) + self.at(x, y + 1))
    }

    /// Window covering every interior pixel (excluding a 1-pixel border).
    ///
    /// Empty for images narrower or shorter than 3 pixels.
    #[must_use]
    pub fn interior(&self) -> Window {
        Window {
            x0: 1,
            y0: 1,
            x1: self.width.saturating_sub(1).max(1),
            y1: self.height.saturating_sub(1).max(1),
        }
    }

    /// Window covering the whole image.
    #[must_use]
    pub const fn full(&self) -> Window {
        Window {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        }
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Window {
    /// Square window of side `size` centered on `(cx, cy)`, clipped to `bounds`.
    #[must_use]
    pub fn centered(cx: usize, cy: usize, size: usize, bounds: Self) -> Self {
        let half = size / 2;
        Self {
            x0: cx.saturating_sub(half),
            y0: cy.saturating_sub(half),
            x1: cx + half + 1,
            y1: cy + half + 1,
        }
        .intersect(bounds)
    }

    /// Intersection of two windows; may be empty.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        Self {
            x0,
            y0,
            x1: self.x1.min(other.x1).max(x0),
            y1: self.y1.min(other.y1).max(y0),
        }
    }

    /// Number of pixels covered.
    #[must_use]
    pub const fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Iterates `(x, y)` row by row.
    pub fn pixels(self) -> impl Iterator<Item = (usize, usize)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}
