//! Stockshot Core - Image quality analysis engine
//!
//! This crate contains the domain types, the tunable analyzer configuration and
//! the fixed heuristic pipeline that turns an RGBA pixel buffer into a
//! stock-photo acceptance verdict: saliency detection, tone metrics, subject
//! weighting, composition scoring, the technical gate and diagnostic reasons.

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod modules;
pub mod ports;

pub use analyzer::{analyze, Analyzer, MetricBreakdown};
pub use config::AnalyzerConfig;
pub use domain::{
    AnalysisResult, CompositionScore, FocalPoint, ImageDimensions, ImageInfo, ImageReport,
    MetricSet, PixelBuffer,
};
pub use error::AnalysisError;
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};
