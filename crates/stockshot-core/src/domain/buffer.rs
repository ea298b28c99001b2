//! Pixel buffer and focal point types.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Smallest width/height for which gradient-based analyses have interior pixels.
pub const MIN_ANALYZABLE_SIZE: u32 = 3;

/// Row-major RGBA image, 8 bits per channel.
///
/// The sample array always holds exactly `width * height * 4` bytes; the
/// constructor rejects anything else. Buffers are never mutated after
/// construction. Deserialization goes through [`PixelBuffer::new`], so a
/// serialized buffer with the wrong sample count is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPixelBuffer")]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

/// Unvalidated wire form of [`PixelBuffer`].
#[derive(Deserialize)]
struct RawPixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl TryFrom<RawPixelBuffer> for PixelBuffer {
    type Error = AnalysisError;

    fn try_from(raw: RawPixelBuffer) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.samples)
    }
}

impl PixelBuffer {
    /// Creates a buffer from raw RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ZeroDimensions`] if either dimension is zero and
    /// [`AnalysisError::SampleLengthMismatch`] if `samples` is not exactly
    /// `width * height * 4` bytes long.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::ZeroDimensions { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if samples.len() != expected {
            return Err(AnalysisError::SampleLengthMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Creates a buffer by evaluating `f` for every pixel, row by row.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ZeroDimensions`] if either dimension is zero.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, AnalysisError> {
        let mut samples = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    /// Converts a decoded image into an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ZeroDimensions`] for empty images.
    pub fn from_dynamic(image: &image::DynamicImage) -> Result<Self, AnalysisError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, rgba.into_raw())
    }

    /// Copies the buffer into an [`image::RgbaImage`], e.g. for writing fixtures.
    #[must_use]
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // Length is validated in `new`, so `from_raw` cannot fail here.
        image::RgbaImage::from_raw(self.width, self.height, self.samples.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns the RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width as usize + x) * 4;
        [
            self.samples[i],
            self.samples[i + 1],
            self.samples[i + 2],
            self.samples[i + 3],
        ]
    }

    /// True when the image is too small for the windowed and gradient analyses.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.width < MIN_ANALYZABLE_SIZE || self.height < MIN_ANALYZABLE_SIZE
    }
}

/// A salient location in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPoint {
    /// Horizontal position (0.0-1.0).
    pub x: f64,
    /// Vertical position (0.0-1.0).
    pub y: f64,
    /// Salience weight (0.0-1.0).
    pub weight: f64,
}

impl FocalPoint {
    /// Pixel column nearest to this point, clamped to the image.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn column(&self, width: usize) -> usize {
        ((self.x * width as f64).round().max(0.0) as usize).min(width.saturating_sub(1))
    }

    /// Pixel row nearest to this point, clamped to the image.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn row(&self, height: usize) -> usize {
        ((self.y * height as f64).round().max(0.0) as usize).min(height.saturating_sub(1))
    }
}
