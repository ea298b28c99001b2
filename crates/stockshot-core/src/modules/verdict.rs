//! Composite score and pass/fail gate.
//!
//! The verdict is conjunctive: a high composite score never compensates for a
//! failed technical check, and passing the technical checks never compensates
//! for a low score.

use serde::{Deserialize, Serialize};

use crate::config::{GateConfig, ScoreWeights};
use crate::domain::MetricSet;

/// Outcome of scoring and gating one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Rounded composite score (0-100).
    pub score: f64,
    /// Whether every technical condition holds.
    pub meets_technical: bool,
    /// `score > min_score && meets_technical`.
    pub is_good: bool,
}

/// Weighted composite of the final metrics, rounded to an integer.
#[must_use]
pub fn composite_score(metrics: &MetricSet, weights: &ScoreWeights) -> f64 {
    let raw = weights.brightness * metrics.brightness
        + weights.contrast * metrics.contrast
        + weights.sharpness * metrics.sharpness
        + weights.color_balance * metrics.color_balance
        + weights.composition * metrics.composition.overall;
    raw.round().clamp(0.0, 100.0)
}

/// Technical gate on the final metrics plus the raw subject sharpness.
#[must_use]
pub fn meets_technical(metrics: &MetricSet, subject_sharpness: f64, gate: &GateConfig) -> bool {
    let sharp_enough =
        subject_sharpness >= gate.min_subject_sharpness || metrics.sharpness >= gate.min_sharpness;
    let exposed = (gate.min_brightness..=gate.max_brightness).contains(&metrics.brightness);

    sharp_enough
        && exposed
        && metrics.contrast >= gate.min_contrast
        && metrics.color_balance >= gate.min_color_balance
}

/// Scores and gates the final metrics.
#[must_use]
pub fn judge(
    metrics: &MetricSet,
    subject_sharpness: f64,
    weights: &ScoreWeights,
    gate: &GateConfig,
) -> Verdict {
    let score = composite_score(metrics, weights);
    let meets_technical = meets_technical(metrics, subject_sharpness, gate);
    Verdict {
        score,
        meets_technical,
        is_good: score > gate.min_score && meets_technical,
    }
}
