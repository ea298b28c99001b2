//! Analysis entry point.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::AnalyzerConfig;
use crate::domain::{AnalysisResult, FocalPoint, MetricSet, PixelBuffer};
use crate::modules::{
    analyze_composition, detect_focal_points, judge, reason_strings, CompositionRule, LumaPlane,
    ToneMetrics, Verdict,
};

/// Intermediate values behind an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    /// Ranked focal points.
    pub focal_points: Vec<FocalPoint>,
    /// Whole-image metrics.
    pub global: ToneMetrics,
    /// Focal-point-weighted metrics (equal to `global` without focal points).
    pub subject: ToneMetrics,
    /// Final metrics fed to scoring.
    pub metrics: MetricSet,
    /// Score and gate outcome.
    pub verdict: Verdict,
}

/// Runs the full quality pipeline with a fixed configuration.
///
/// Analysis is synchronous and pure: the same buffer always yields the same
/// result, and no state is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes an image and returns the verdict, metrics and reasons.
    #[must_use]
    pub fn analyze(&self, buffer: &PixelBuffer) -> AnalysisResult {
        let breakdown = self.breakdown(buffer);
        let reasons = reason_strings(
            &breakdown.metrics,
            breakdown.verdict.score,
            &self.config.gate,
        );

        debug!(
            score = breakdown.verdict.score,
            meets_technical = breakdown.verdict.meets_technical,
            is_good = breakdown.verdict.is_good,
            reasons = reasons.len(),
            "analysis complete"
        );

        AnalysisResult {
            is_good: breakdown.verdict.is_good,
            score: breakdown.verdict.score,
            metrics: breakdown.metrics,
            reasons,
        }
    }

    /// Runs every stage and returns the intermediate values.
    #[must_use]
    pub fn breakdown(&self, buffer: &PixelBuffer) -> MetricBreakdown {
        if buffer.is_degenerate() {
            warn!(
                width = buffer.width(),
                height = buffer.height(),
                "image too small for local analysis, using global metrics only"
            );
        }

        let luma = LumaPlane::from_buffer(buffer);
        let focal_points = detect_focal_points(&luma, &self.config.saliency);
        debug!(count = focal_points.len(), "focal points detected");
        for point in &focal_points {
            trace!(x = point.x, y = point.y, weight = point.weight, "focal point");
        }

        let global = ToneMetrics::global(buffer, &luma);
        let subject = ToneMetrics::subject(
            buffer,
            &luma,
            &focal_points,
            &global,
            &self.config.windows,
        );
        let blended = ToneMetrics::blend(&subject, &global, &self.config.blend);
        debug!(?global, ?subject, ?blended, "tone metrics");

        let composition = analyze_composition(&luma, &focal_points, &self.config.composition);
        for rule in CompositionRule::ALL {
            trace!(rule = rule.name(), score = rule.of(&composition), "composition rule");
        }

        let metrics = MetricSet {
            brightness: blended.brightness,
            contrast: blended.contrast,
            sharpness: blended.sharpness,
            color_balance: blended.color_balance,
            composition,
        };
        let verdict = judge(
            &metrics,
            subject.sharpness,
            &self.config.score,
            &self.config.gate,
        );

        MetricBreakdown {
            focal_points,
            global,
            subject,
            metrics,
            verdict,
        }
    }
}

/// Analyzes `buffer` with the default configuration.
#[must_use]
pub fn analyze(buffer: &PixelBuffer) -> AnalysisResult {
    Analyzer::default().analyze(buffer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let v = f(x, y);
            [v, v, v, 255]
        })
        .unwrap()
    }

    #[test]
    fn test_solid_image_is_rejected() {
        let result = analyze(&gray(64, 64, |_, _| 128));
        assert!(!result.is_good);
        assert!(result.metrics.sharpness.abs() < f64::EPSILON);
        assert!(result.metrics.contrast.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_focal_points_use_global_values() {
        let breakdown = Analyzer::default().breakdown(&gray(40, 40, |x, _| 100 + (x % 3) as u8));
        assert!(breakdown.focal_points.is_empty());
        assert_eq!(breakdown.subject, breakdown.global);
    }

    #[test]
    fn test_degenerate_image_still_analyzed() {
        let result = analyze(&gray(2, 2, |x, _| if x == 0 { 0 } else { 255 }));
        let c = result.metrics.composition;
        assert!((c.rule_of_thirds - 50.0).abs() < f64::EPSILON);
        assert!((c.leading_lines - 50.0).abs() < f64::EPSILON);
        assert!((c.horizon_placement - 50.0).abs() < f64::EPSILON);
        assert!(!result.score.is_nan());
        assert!(!result.reasons.is_empty());
    }

    #[test]
    fn test_single_pixel_image() {
        let result = analyze(&gray(1, 1, |_, _| 128));
        assert!(!result.is_good);
        assert!((result.metrics.composition.symmetry - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_gate_changes_verdict_only() {
        let buffer = gray(32, 32, |x, y| if (x / 4 + y / 4) % 2 == 0 { 60 } else { 190 });
        let default = Analyzer::default().analyze(&buffer);

        let mut config = AnalyzerConfig::default();
        config.gate.min_score = 100.0;
        let strict = Analyzer::new(config).analyze(&buffer);

        assert_eq!(default.metrics, strict.metrics);
        assert!((default.score - strict.score).abs() < f64::EPSILON);
        assert!(!strict.is_good);
    }

    #[test]
    fn test_pure_white_is_not_called_dark() {
        let result = analyze(&gray(32, 32, |_, _| 255));
        assert!(result.metrics.brightness < 30.0);
        assert!(result
            .reasons
            .contains(&"Brightness is far from midtones or clipped".to_string()));
        assert!(result.reasons.iter().all(|r| !r.contains("dark")));
    }

    #[test]
    fn test_reasons_explain_custom_gate_rejection() {
        let buffer = gray(32, 32, |x, y| if (x / 4 + y / 4) % 2 == 0 { 60 } else { 190 });
        let mut config = AnalyzerConfig::default();
        config.gate.min_contrast = 99.0;
        let analyzer = Analyzer::new(config);

        let breakdown = analyzer.breakdown(&buffer);
        assert!(!breakdown.verdict.meets_technical);
        let result = analyzer.analyze(&buffer);
        assert!(result.reasons.contains(&"Contrast is too low".to_string()));
    }
}
