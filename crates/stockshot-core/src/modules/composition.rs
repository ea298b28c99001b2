//! Composition analysis.
//!
//! Five rules score framing independently and are combined with fixed weights:
//! - Rule of thirds and golden ratio: focal point distance to grid intersections
//! - Symmetry: left/right mirror similarity of luma
//! - Leading lines: mean continuity of line-like pixels
//! - Horizon placement: position of the strongest horizontal edge row
//!
//! Rules that have nothing to measure (no focal points, no qualifying pixels,
//! images too small) return the neutral score.

use crate::config::CompositionWeights;
use crate::domain::{CompositionScore, FocalPoint};

use super::luma::LumaPlane;
use super::saliency::weighted_mean;

/// Score returned by a rule that cannot evaluate the image.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// `1 / phi` where phi is the golden ratio.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

const THIRDS: [f64; 2] = [1.0 / 3.0, 2.0 / 3.0];
const GOLDEN: [f64; 2] = [1.0 - INV_PHI, INV_PHI];
const HORIZON_TARGETS: [f64; 5] = [1.0 / 3.0, 0.5, 2.0 / 3.0, INV_PHI, 1.0 - INV_PHI];

/// Continuity above which a pixel counts as lying on a line.
const LINE_CONTINUITY: f64 = 0.7;
/// Mean per-column vertical gradient a row needs to be a horizon candidate.
const HORIZON_STRENGTH_PER_COLUMN: f64 = 50.0;

/// The composition rules, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionRule {
    RuleOfThirds,
    GoldenRatio,
    Symmetry,
    LeadingLines,
    HorizonPlacement,
}

impl CompositionRule {
    /// All rules in reporting order.
    pub const ALL: [Self; 5] = [
        Self::RuleOfThirds,
        Self::GoldenRatio,
        Self::Symmetry,
        Self::LeadingLines,
        Self::HorizonPlacement,
    ];

    /// Stable snake_case name, matching the serialized field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RuleOfThirds => "rule_of_thirds",
            Self::GoldenRatio => "golden_ratio",
            Self::Symmetry => "symmetry",
            Self::LeadingLines => "leading_lines",
            Self::HorizonPlacement => "horizon_placement",
        }
    }

    /// Weight of this rule in the overall score.
    #[must_use]
    pub const fn weight(self, weights: &CompositionWeights) -> f64 {
        match self {
            Self::RuleOfThirds => weights.rule_of_thirds,
            Self::GoldenRatio => weights.golden_ratio,
            Self::Symmetry => weights.symmetry,
            Self::LeadingLines => weights.leading_lines,
            Self::HorizonPlacement => weights.horizon_placement,
        }
    }

    /// Scores the image under this rule (0-100).
    #[must_use]
    pub fn evaluate(self, luma: &LumaPlane, points: &[FocalPoint]) -> f64 {
        match self {
            Self::RuleOfThirds => grid_score(points, THIRDS),
            Self::GoldenRatio => grid_score(points, GOLDEN),
            Self::Symmetry => symmetry(luma),
            Self::LeadingLines => leading_lines(luma),
            Self::HorizonPlacement => horizon_placement(luma),
        }
    }

    /// Reads this rule's sub-score from a composition result.
    #[must_use]
    pub const fn of(self, score: &CompositionScore) -> f64 {
        match self {
            Self::RuleOfThirds => score.rule_of_thirds,
            Self::GoldenRatio => score.golden_ratio,
            Self::Symmetry => score.symmetry,
            Self::LeadingLines => score.leading_lines,
            Self::HorizonPlacement => score.horizon_placement,
        }
    }
}

/// Evaluates every rule and combines them into the overall score.
#[must_use]
pub fn analyze_composition(
    luma: &LumaPlane,
    points: &[FocalPoint],
    weights: &CompositionWeights,
) -> CompositionScore {
    let [rule_of_thirds, golden_ratio, symmetry, leading_lines, horizon_placement] =
        CompositionRule::ALL.map(|rule| rule.evaluate(luma, points).clamp(0.0, 100.0));

    let mut score = CompositionScore {
        overall: 0.0,
        rule_of_thirds,
        golden_ratio,
        symmetry,
        leading_lines,
        horizon_placement,
    };
    let weighted: f64 = CompositionRule::ALL
        .iter()
        .map(|rule| rule.weight(weights) * rule.of(&score))
        .sum();
    score.overall = weighted.round().clamp(0.0, 100.0);
    score
}

/// Maps a normalized distance to a score: 0 distance is 100, 0.5 or more is 0.
fn distance_score(distance: f64) -> f64 {
    (100.0 - distance * 200.0).max(0.0)
}

/// Weighted proximity of focal points to the intersections of `lines` x `lines`.
fn grid_score(points: &[FocalPoint], lines: [f64; 2]) -> f64 {
    weighted_mean(points, NEUTRAL_SCORE, |p| {
        let nearest = lines
            .iter()
            .flat_map(|&gx| lines.iter().map(move |&gy| (p.x - gx).hypot(p.y - gy)))
            .fold(f64::INFINITY, f64::min);
        distance_score(nearest)
    })
}

/// Mean of `1 - |luma(x) - luma(mirror x)| / 255` over every row, scaled to 0-100.
#[allow(clippy::cast_precision_loss)]
fn symmetry(luma: &LumaPlane) -> f64 {
    let width = luma.width();
    let pairs_per_row = width / 2;
    if pairs_per_row == 0 {
        return NEUTRAL_SCORE;
    }
    let mut total = 0.0;
    for y in 0..luma.height() {
        for x in 0..pairs_per_row {
            let diff = (luma.at(x, y) - luma.at(width - 1 - x, y)).abs();
            total += 1.0 - diff / 255.0;
        }
    }
    let pairs = (pairs_per_row * luma.height()) as f64;
    total / pairs * 100.0
}

/// Mean continuity of interior pixels whose best direction exceeds the line threshold.
#[allow(clippy::cast_precision_loss)]
fn leading_lines(luma: &LumaPlane) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for (x, y) in luma.interior().pixels() {
        let center = luma.at(x, y);
        let left = (center - luma.at(x - 1, y)).abs() / 255.0;
        let right = (center - luma.at(x + 1, y)).abs() / 255.0;
        let up = (center - luma.at(x, y - 1)).abs() / 255.0;
        let down = (center - luma.at(x, y + 1)).abs() / 255.0;
        let continuity = (1.0 - left - right).max(1.0 - up - down);
        if continuity > LINE_CONTINUITY {
            total += continuity;
            count += 1;
        }
    }
    if count == 0 {
        return NEUTRAL_SCORE;
    }
    total / count as f64 * 100.0
}

/// Placement of the strongest horizontal edge row relative to classic positions.
#[allow(clippy::cast_precision_loss)]
fn horizon_placement(luma: &LumaPlane) -> f64 {
    let width = luma.width();
    let height = luma.height();
    let threshold = width as f64 * HORIZON_STRENGTH_PER_COLUMN;

    let mut strongest: Option<(usize, f64)> = None;
    for y in 0..height.saturating_sub(1) {
        let strength: f64 = (0..width)
            .map(|x| (luma.at(x, y + 1) - luma.at(x, y)).abs())
            .sum();
        if strength > threshold && strongest.map_or(true, |(_, best)| strength > best) {
            strongest = Some((y, strength));
        }
    }

    let Some((row, _)) = strongest else {
        return NEUTRAL_SCORE;
    };
    let position = row as f64 / height as f64;
    let nearest = HORIZON_TARGETS
        .iter()
        .map(|t| (position - t).abs())
        .fold(f64::INFINITY, f64::min);
    distance_score(nearest)
}
