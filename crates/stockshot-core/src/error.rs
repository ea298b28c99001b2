//! Error types raised by the analysis engine.

use thiserror::Error;

/// Errors returned when a pixel buffer or configuration violates the engine contract.
///
/// All variants are deterministic: the same input always reproduces them, so
/// callers should not retry without fixing the input first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Sample array length does not equal `width * height * 4`.
    #[error("expected {expected} RGBA samples, got {actual}")]
    SampleLengthMismatch {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// Analyzer configuration cannot produce scores in 0-100.
    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    /// Returns true for the errors the UI should surface as "unreadable image".
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::ZeroDimensions { .. } | Self::SampleLengthMismatch { .. }
        )
    }
}
