//! Global, subject-weighted and blended tone metrics.

use serde::{Deserialize, Serialize};

use crate::config::{BlendWeights, WindowConfig};
use crate::domain::{FocalPoint, PixelBuffer};

use super::luma::{LumaPlane, Window};
use super::saliency::weighted_mean;
use super::{sharpness, tone};

/// One value per tone metric, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneMetrics {
    pub brightness: f64,
    pub contrast: f64,
    pub sharpness: f64,
    pub color_balance: f64,
}

impl ToneMetrics {
    /// Whole-image metrics, independent of focal points.
    #[must_use]
    pub fn global(buffer: &PixelBuffer, luma: &LumaPlane) -> Self {
        let full = luma.full();
        Self {
            brightness: tone::brightness(luma, full),
            contrast: tone::contrast(luma, full),
            sharpness: sharpness::global_sharpness(luma),
            color_balance: tone::color_balance(buffer, full),
        }
    }

    /// Metrics measured in windows around each focal point, weight-averaged.
    ///
    /// With no focal points every value equals the corresponding `global` one.
    #[must_use]
    pub fn subject(
        buffer: &PixelBuffer,
        luma: &LumaPlane,
        points: &[FocalPoint],
        global: &Self,
        windows: &WindowConfig,
    ) -> Self {
        let bounds = luma.full();
        let window = |p: &FocalPoint, size: usize| -> Window {
            Window::centered(p.column(luma.width()), p.row(luma.height()), size, bounds)
        };

        Self {
            brightness: weighted_mean(points, global.brightness, |p| {
                tone::brightness(luma, window(p, windows.tone))
            }),
            contrast: weighted_mean(points, global.contrast, |p| {
                tone::contrast(luma, window(p, windows.tone))
            }),
            sharpness: weighted_mean(points, global.sharpness, |p| {
                sharpness::laplacian_sharpness(luma, window(p, windows.sharpness))
            }),
            color_balance: weighted_mean(points, global.color_balance, |p| {
                tone::color_balance(buffer, window(p, windows.tone))
            }),
        }
    }

    /// Blends subject and global values: `w * subject + (1 - w) * global`.
    #[must_use]
    pub fn blend(subject: &Self, global: &Self, weights: &BlendWeights) -> Self {
        let mix = |w: f64, s: f64, g: f64| (w * s + (1.0 - w) * g).clamp(0.0, 100.0);
        Self {
            brightness: mix(weights.brightness, subject.brightness, global.brightness),
            contrast: mix(weights.contrast, subject.contrast, global.contrast),
            sharpness: mix(weights.sharpness, subject.sharpness, global.sharpness),
            color_balance: mix(
                weights.color_balance,
                subject.color_balance,
                global.color_balance,
            ),
        }
    }
}
