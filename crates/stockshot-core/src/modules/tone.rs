//! Brightness, contrast and color balance.
//!
//! Every function scores an arbitrary [`Window`], so the global metric is the
//! same formula applied to the full image and the subject metric is the same
//! formula applied around a focal point.

use crate::domain::PixelBuffer;

use super::histogram::Histogram;
use super::luma::{LumaPlane, Window};

/// Luma at or below this counts as crushed black for brightness.
const NEAR_BLACK: f64 = 10.0;
/// Luma at or above this counts as blown white for brightness.
const NEAR_WHITE: f64 = 245.0;
/// Luma at or below this counts as clipped shadows for contrast.
const CONTRAST_CLIP_LOW: f64 = 2.0;
/// Luma at or above this counts as clipped highlights for contrast.
const CONTRAST_CLIP_HIGH: f64 = 253.0;
const MIDPOINT: f64 = 127.5;
const CLIP_PENALTY: f64 = 50.0;

/// HSV saturation below this is treated as grey.
const DESATURATED: f64 = 0.08;
/// HSV saturation above this is treated as oversaturated.
const OVERSATURATED: f64 = 0.9;

/// Midtone closeness of mean luma, penalized by near-black and near-white pixels.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn brightness(luma: &LumaPlane, window: Window) -> f64 {
    if window.is_empty() {
        return 50.0;
    }
    let mut sum = 0.0;
    let mut clipped = 0usize;
    for (x, y) in window.pixels() {
        let l = luma.at(x, y);
        sum += l;
        if l <= NEAR_BLACK || l >= NEAR_WHITE {
            clipped += 1;
        }
    }
    let n = window.area() as f64;
    let mean = sum / n;
    let midtone = 100.0 - ((mean - MIDPOINT).abs() / MIDPOINT) * 100.0;
    let penalty = CLIP_PENALTY * (clipped as f64 / n);
    (midtone - penalty).clamp(0.0, 100.0)
}

/// 5th-95th percentile luma range, penalized by pixels at the extreme ends.
///
/// Percentiles come from the rounded histogram; clipping is judged on exact
/// luma so that e.g. 2.33 is not counted as a clipped shadow.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn contrast(luma: &LumaPlane, window: Window) -> f64 {
    let histogram = Histogram::from_window(luma, window);
    if histogram.total() == 0 {
        return 0.0;
    }
    let p5 = f64::from(histogram.percentile(0.05));
    let p95 = f64::from(histogram.percentile(0.95));
    let range = (p95 - p5) / 255.0 * 100.0;
    let clipped = window
        .pixels()
        .map(|(x, y)| luma.at(x, y))
        .filter(|&l| l <= CONTRAST_CLIP_LOW || l >= CONTRAST_CLIP_HIGH)
        .count();
    let fraction = clipped as f64 / histogram.total() as f64;
    (range - CLIP_PENALTY * fraction).clamp(0.0, 100.0)
}

/// Color cast and saturation health: `0.7 * neutrality + 0.3 * saturation`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn color_balance(buffer: &PixelBuffer, window: Window) -> f64 {
    if window.is_empty() {
        return 50.0;
    }
    let mut deviation = 0.0;
    let mut desaturated = 0usize;
    let mut oversaturated = 0usize;

    for (x, y) in window.pixels() {
        let [r, g, b, _] = buffer.pixel(x, y);
        let (r, g, b) = (
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        );
        let grey = (r + g + b) / 3.0;
        deviation += ((r - grey).abs() + (g - grey).abs() + (b - grey).abs()) / 3.0;

        let s = saturation(r, g, b);
        if s < DESATURATED {
            desaturated += 1;
        } else if s > OVERSATURATED {
            oversaturated += 1;
        }
    }

    let n = window.area() as f64;
    let neutrality = (100.0 - deviation / n * 100.0).clamp(0.0, 100.0);
    let saturation_score =
        (100.0 - 50.0 * (desaturated as f64 / n) - 50.0 * (oversaturated as f64 / n))
            .clamp(0.0, 100.0);
    (0.7 * neutrality + 0.3 * saturation_score).clamp(0.0, 100.0)
}

/// HSV saturation of a normalized RGB triple.
fn saturation(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    if max <= 0.0 {
        return 0.0;
    }
    let min = r.min(g).min(b);
    (max - min) / max
}
