//! Analysis stages.
//!
//! Each stage is a pure function over the pixel buffer, its luma plane or the
//! output of an earlier stage. The [`crate::Analyzer`] wires them together.

pub mod composition;
pub mod histogram;
pub mod luma;
pub mod reasons;
pub mod saliency;
pub mod sharpness;
pub mod subject;
pub mod tone;
pub mod verdict;

pub use composition::{analyze_composition, CompositionRule, NEUTRAL_SCORE};
pub use histogram::Histogram;
pub use luma::{LumaPlane, Window};
pub use reasons::{reason_strings, reasons, Reason};
pub use saliency::detect_focal_points;
pub use subject::ToneMetrics;
pub use verdict::{judge, Verdict};
