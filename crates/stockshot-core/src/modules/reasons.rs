//! Diagnostic reasons.
//!
//! Maps final metrics and score to an ordered list of remarks: one overall
//! remark, then tone remarks for values outside the gate's bands, then
//! composition remarks for notably weak or strong rules.
//!
//! The brightness metric scores closeness to midtones, so its remarks carry
//! no dark/bright direction.

use std::fmt;

use crate::config::GateConfig;
use crate::domain::MetricSet;

use super::composition::CompositionRule;

const EXCELLENT_SCORE: f64 = 80.0;
const FAIR_SCORE: f64 = 50.0;

/// Composition sub-scores below this are called out as weak.
const WEAK_RULE: f64 = 30.0;
/// Composition sub-scores at or above this are called out as strong.
const STRONG_RULE: f64 = 80.0;

/// A single diagnostic remark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ExcellentOverall,
    GoodOverall,
    FairOverall,
    PoorOverall,
    PoorExposure,
    BrightnessAboveBand,
    LowContrast,
    NotSharp,
    ColorCast,
    WeakComposition(CompositionRule),
    StrongComposition(CompositionRule),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ExcellentOverall => "Excellent overall quality for stock photography",
            Self::GoodOverall => "Good overall quality",
            Self::FairOverall => "Average quality; minor improvements needed",
            Self::PoorOverall => "Below stock photography standards",
            Self::PoorExposure => "Brightness is far from midtones or clipped",
            Self::BrightnessAboveBand => "Brightness is outside the accepted band",
            Self::LowContrast => "Contrast is too low",
            Self::NotSharp => "Image lacks sharpness",
            Self::ColorCast => "Color balance is off (color cast or poor saturation)",
            Self::WeakComposition(rule) => match rule {
                CompositionRule::RuleOfThirds => {
                    "Subject is far from the rule-of-thirds intersections"
                }
                CompositionRule::GoldenRatio => "Subject misses the golden-ratio points",
                CompositionRule::Symmetry => "Frame is visually unbalanced",
                CompositionRule::LeadingLines => "No clear leading lines",
                CompositionRule::HorizonPlacement => "Horizon is poorly placed",
            },
            Self::StrongComposition(rule) => match rule {
                CompositionRule::RuleOfThirds => "Strong rule-of-thirds placement",
                CompositionRule::GoldenRatio => "Subject sits on a golden-ratio point",
                CompositionRule::Symmetry => "Pleasing symmetry",
                CompositionRule::LeadingLines => "Strong leading lines",
                CompositionRule::HorizonPlacement => "Well-placed horizon",
            },
        };
        f.write_str(text)
    }
}

/// Remarks for the given final metrics and score, in reporting order.
///
/// Tone bands and the "good" cut-off come from `gate`, so every condition
/// that rejects an image has a matching remark.
#[must_use]
pub fn reasons(metrics: &MetricSet, score: f64, gate: &GateConfig) -> Vec<Reason> {
    let mut out = Vec::new();

    out.push(if score >= EXCELLENT_SCORE && score > gate.min_score {
        Reason::ExcellentOverall
    } else if score > gate.min_score {
        Reason::GoodOverall
    } else if score >= FAIR_SCORE {
        Reason::FairOverall
    } else {
        Reason::PoorOverall
    });

    if metrics.brightness < gate.min_brightness {
        out.push(Reason::PoorExposure);
    } else if metrics.brightness > gate.max_brightness {
        out.push(Reason::BrightnessAboveBand);
    }
    if metrics.contrast < gate.min_contrast {
        out.push(Reason::LowContrast);
    }
    if metrics.sharpness < gate.min_sharpness {
        out.push(Reason::NotSharp);
    }
    if metrics.color_balance < gate.min_color_balance {
        out.push(Reason::ColorCast);
    }

    for rule in CompositionRule::ALL {
        let value = rule.of(&metrics.composition);
        if value < WEAK_RULE {
            out.push(Reason::WeakComposition(rule));
        } else if value >= STRONG_RULE {
            out.push(Reason::StrongComposition(rule));
        }
    }

    out
}

/// [`reasons`] rendered as display strings.
#[must_use]
pub fn reason_strings(metrics: &MetricSet, score: f64, gate: &GateConfig) -> Vec<String> {
    reasons(metrics, score, gate).iter().map(ToString::to_string).collect()
}
