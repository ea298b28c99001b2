//! Core domain types for image quality analysis.

mod buffer;
mod result;

pub use buffer::{FocalPoint, PixelBuffer};
pub use result::{
    AnalysisResult, CompositionScore, ImageDimensions, ImageInfo, ImageReport, MetricSet,
};
