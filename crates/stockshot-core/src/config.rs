//! Tunable analyzer parameters.
//!
//! The defaults are hand-picked heuristics, not calibrated constants. They are
//! grouped here so callers can adjust them without touching the algorithms.

use crate::error::AnalysisError;

/// Upper bound for [`SaliencyConfig::max_points`].
pub const MAX_FOCAL_POINTS: usize = 1000;

/// Focal point detection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SaliencyConfig {
    /// Minimum gradient magnitude (0-255 luma scale) for a candidate point.
    pub gradient_threshold: f64,
    /// Maximum number of focal points kept after ranking.
    pub max_points: usize,
}

impl Default for SaliencyConfig {
    fn default() -> Self {
        Self {
            gradient_threshold: 30.0,
            max_points: 5,
        }
    }
}

/// Window sizes (in pixels, odd) for subject-weighted metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window for brightness, contrast and color balance.
    pub tone: usize,
    /// Window for the Laplacian sharpness estimator.
    pub sharpness: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            tone: 21,
            sharpness: 9,
        }
    }
}

/// Share of the subject-weighted value in each blended metric.
///
/// The global value receives the remainder (`1 - subject`).
#[derive(Debug, Clone, PartialEq)]
pub struct BlendWeights {
    /// Subject share for sharpness.
    pub sharpness: f64,
    /// Subject share for brightness.
    pub brightness: f64,
    /// Subject share for contrast.
    pub contrast: f64,
    /// Subject share for color balance.
    pub color_balance: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            sharpness: 0.7,
            brightness: 0.6,
            contrast: 0.6,
            color_balance: 0.6,
        }
    }
}

/// Weights of the composite score. Must sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    pub brightness: f64,
    pub contrast: f64,
    pub sharpness: f64,
    pub color_balance: f64,
    pub composition: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            brightness: 0.1,
            contrast: 0.1,
            sharpness: 0.2,
            color_balance: 0.1,
            composition: 0.5,
        }
    }
}

impl ScoreWeights {
    fn sum(&self) -> f64 {
        self.brightness + self.contrast + self.sharpness + self.color_balance + self.composition
    }
}

/// Weights of the composition rules. Must sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionWeights {
    pub rule_of_thirds: f64,
    pub golden_ratio: f64,
    pub symmetry: f64,
    pub leading_lines: f64,
    pub horizon_placement: f64,
}

impl Default for CompositionWeights {
    fn default() -> Self {
        Self {
            rule_of_thirds: 0.30,
            golden_ratio: 0.25,
            symmetry: 0.20,
            leading_lines: 0.15,
            horizon_placement: 0.10,
        }
    }
}

impl CompositionWeights {
    fn sum(&self) -> f64 {
        self.rule_of_thirds
            + self.golden_ratio
            + self.symmetry
            + self.leading_lines
            + self.horizon_placement
    }
}

/// Thresholds of the pass/fail gate.
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    /// The composite score must be strictly greater than this.
    pub min_score: f64,
    /// Subject sharpness that satisfies the sharpness condition on its own.
    pub min_subject_sharpness: f64,
    /// Blended sharpness that satisfies the sharpness condition on its own.
    pub min_sharpness: f64,
    /// Lowest acceptable blended brightness (inclusive).
    pub min_brightness: f64,
    /// Highest acceptable blended brightness (inclusive).
    pub max_brightness: f64,
    /// Lowest acceptable blended contrast.
    pub min_contrast: f64,
    /// Lowest acceptable blended color balance.
    pub min_color_balance: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_score: 65.0,
            min_subject_sharpness: 50.0,
            min_sharpness: 40.0,
            min_brightness: 30.0,
            max_brightness: 80.0,
            min_contrast: 20.0,
            min_color_balance: 50.0,
        }
    }
}

/// Complete analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    pub saliency: SaliencyConfig,
    pub windows: WindowConfig,
    pub blend: BlendWeights,
    pub score: ScoreWeights,
    pub composition: CompositionWeights,
    pub gate: GateConfig,
}

impl AnalyzerConfig {
    /// Checks that the configuration keeps every output within 0-100.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        const EPS: f64 = 1e-9;

        if !(0.0..=255.0).contains(&self.saliency.gradient_threshold) {
            return Err(invalid(format!(
                "saliency.gradient_threshold must be 0-255, got {}",
                self.saliency.gradient_threshold
            )));
        }
        if !(1..=MAX_FOCAL_POINTS).contains(&self.saliency.max_points) {
            return Err(invalid(format!(
                "saliency.max_points must be 1-{MAX_FOCAL_POINTS}, got {}",
                self.saliency.max_points
            )));
        }
        if self.windows.tone == 0 || self.windows.sharpness == 0 {
            return Err(invalid("window sizes must be non-zero".into()));
        }

        let blend = [
            ("blend.sharpness", self.blend.sharpness),
            ("blend.brightness", self.blend.brightness),
            ("blend.contrast", self.blend.contrast),
            ("blend.color_balance", self.blend.color_balance),
        ];
        for (name, w) in blend {
            if !(0.0..=1.0).contains(&w) {
                return Err(invalid(format!("{name} must be 0.0-1.0, got {w}")));
            }
        }

        if (self.score.sum() - 1.0).abs() > EPS {
            return Err(invalid(format!(
                "score weights must sum to 1, got {}",
                self.score.sum()
            )));
        }
        if (self.composition.sum() - 1.0).abs() > EPS {
            return Err(invalid(format!(
                "composition weights must sum to 1, got {}",
                self.composition.sum()
            )));
        }

        if self.gate.min_brightness > self.gate.max_brightness {
            return Err(invalid(format!(
                "gate.min_brightness ({}) exceeds gate.max_brightness ({})",
                self.gate.min_brightness, self.gate.max_brightness
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> AnalysisError {
    AnalysisError::InvalidConfig(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_gate_thresholds() {
        let gate = GateConfig::default();
        assert!((gate.min_score - 65.0).abs() < f64::EPSILON);
        assert!((gate.min_brightness - 30.0).abs() < f64::EPSILON);
        assert!((gate.max_brightness - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_weights_must_sum_to_one() {
        let mut config = AnalyzerConfig::default();
        config.score.composition = 0.9;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("score weights"));
    }

    #[test]
    fn test_composition_weights_must_sum_to_one() {
        let mut config = AnalyzerConfig::default();
        config.composition.symmetry = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blend_out_of_range() {
        let mut config = AnalyzerConfig::default();
        config.blend.contrast = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blend.contrast"));
    }

    #[test]
    fn test_inverted_brightness_band() {
        let mut config = AnalyzerConfig::default();
        config.gate.min_brightness = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_points_is_bounded() {
        let mut config = AnalyzerConfig::default();
        config.saliency.max_points = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("saliency.max_points"));

        config.saliency.max_points = 0;
        assert!(config.validate().is_err());

        config.saliency.max_points = MAX_FOCAL_POINTS;
        assert!(config.validate().is_ok());
    }
}
