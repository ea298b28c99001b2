//! 256-bin luma histogram.

use super::luma::{LumaPlane, Window};

/// 256-bin histogram of luma values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Builds a histogram from the luma values inside `window`.
    ///
    /// Fractional luma is rounded to the nearest bin, so bin edges are only
    /// suitable for percentiles. Threshold tests belong on the exact luma.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_window(luma: &LumaPlane, window: Window) -> Self {
        let mut bins = [0u64; 256];
        for (x, y) in window.pixels() {
            // Safe: luma is always within 0.0-255.0
            let bin = luma.at(x, y).round().clamp(0.0, 255.0) as usize;
            bins[bin] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Smallest luma whose cumulative count reaches fraction `p` (0.0-1.0).
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn percentile(&self, p: f64) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let target = ((self.total as f64 * p).ceil() as u64).max(1);
        let mut cumulative = 0u64;
        for (i, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            if cumulative >= target {
                return i as u8;
            }
        }
        255
    }
}
