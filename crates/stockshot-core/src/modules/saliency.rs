//! Focal point detection.
//!
//! Flags interior pixels whose forward-difference luma gradient exceeds a fixed
//! threshold and keeps the strongest few as ranked focal points. Ties keep scan
//! order (top-to-bottom, left-to-right), so the result is deterministic.

use crate::config::SaliencyConfig;
use crate::domain::FocalPoint;

use super::luma::LumaPlane;

/// Returns up to `config.max_points` focal points ordered by descending weight.
///
/// Images without interior pixels, or without any gradient above the
/// threshold, yield an empty vector.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn detect_focal_points(luma: &LumaPlane, config: &SaliencyConfig) -> Vec<FocalPoint> {
    let width = luma.width() as f64;
    let height = luma.height() as f64;
    let mut ranked: Vec<FocalPoint> = Vec::with_capacity(config.max_points.min(64) + 1);

    if config.max_points == 0 {
        return ranked;
    }

    for (x, y) in luma.interior().pixels() {
        let magnitude = luma.gradient(x, y);
        if magnitude <= config.gradient_threshold {
            continue;
        }
        let weight = (magnitude / 255.0).min(1.0);

        // Bounded insertion: behaves like a stable sort by descending weight.
        if ranked.len() == config.max_points
            && ranked.last().is_some_and(|last| last.weight >= weight)
        {
            continue;
        }
        let at = ranked.partition_point(|p| p.weight >= weight);
        ranked.insert(
            at,
            FocalPoint {
                x: x as f64 / width,
                y: y as f64 / height,
                weight,
            },
        );
        ranked.truncate(config.max_points);
    }

    ranked
}

/// Weight-normalized mean of `score` over `points`.
///
/// Returns `fallback` when there are no points or the weights sum to zero.
pub fn weighted_mean(
    points: &[FocalPoint],
    fallback: f64,
    mut score: impl FnMut(&FocalPoint) -> f64,
) -> f64 {
    let total: f64 = points.iter().map(|p| p.weight).sum();
    if points.is_empty() || total <= 0.0 {
        return fallback;
    }
    points.iter().map(|p| score(p) * p.weight).sum::<f64>() / total
}
