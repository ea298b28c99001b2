//! Analysis result types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::PixelBuffer;

/// Composition sub-scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionScore {
    /// Weighted combination of the five rules, rounded to an integer.
    pub overall: f64,
    /// Focal point proximity to the rule-of-thirds intersections.
    pub rule_of_thirds: f64,
    /// Focal point proximity to the golden-ratio intersections.
    pub golden_ratio: f64,
    /// Left/right mirror similarity.
    pub symmetry: f64,
    /// Mean continuity of line-like pixels.
    pub leading_lines: f64,
    /// Placement of the strongest horizontal edge.
    pub horizon_placement: f64,
}

/// Final metric values reported for an image, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Closeness of mean luma to the midpoint, minus clipping.
    pub brightness: f64,
    /// Percentile dynamic range, minus clipping.
    pub contrast: f64,
    /// Edge strength.
    pub sharpness: f64,
    /// Color neutrality and saturation health.
    pub color_balance: f64,
    /// Composition breakdown.
    pub composition: CompositionScore,
}

/// Outcome of analyzing one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether the image is acceptable as a stock photo.
    pub is_good: bool,
    /// Composite score (0-100).
    pub score: f64,
    /// Metric values behind the score.
    pub metrics: MetricSet,
    /// Human-readable diagnostics, overall remark first.
    pub reasons: Vec<String>,
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded image together with where it came from.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path (or synthetic identifier) of the source image.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded RGBA pixels.
    pub buffer: PixelBuffer,
}

impl ImageInfo {
    /// Wraps a buffer with its source path.
    #[must_use]
    pub fn new(path: impl Into<String>, buffer: PixelBuffer) -> Self {
        Self {
            path: path.into(),
            width: buffer.width(),
            height: buffer.height(),
            buffer,
        }
    }
}

/// Per-file record written by output adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// Analysis outcome.
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    /// Optional EXIF metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<HashMap<String, String>>,
}
