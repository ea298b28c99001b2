//! Sharpness estimators.
//!
//! - Global: mean forward-difference gradient magnitude over interior pixels
//! - Local: RMS of the discrete Laplacian inside a window

use super::luma::{LumaPlane, Window};

/// Mean gradient magnitude over every interior pixel, scaled to 0-100.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn global_sharpness(luma: &LumaPlane) -> f64 {
    let interior = luma.interior();
    if interior.is_empty() {
        return 0.0;
    }
    let total: f64 = interior.pixels().map(|(x, y)| luma.gradient(x, y)).sum();
    let mean = total / interior.area() as f64;
    (mean / 255.0 * 100.0).clamp(0.0, 100.0)
}

/// Root-mean-square Laplacian response inside `window`, scaled to 0-100.
///
/// Only pixels with all four neighbours inside the image contribute.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn laplacian_sharpness(luma: &LumaPlane, window: Window) -> f64 {
    let window = window.intersect(luma.interior());
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = window
        .pixels()
        .map(|(x, y)| {
            let response = luma.laplacian(x, y);
            response * response
        })
        .sum();
    let rms = (sum_sq / window.area() as f64).sqrt();
    (rms / 255.0 * 100.0).clamp(0.0, 100.0)
}
