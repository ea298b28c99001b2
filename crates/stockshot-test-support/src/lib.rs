//! Test support utilities for stockshot.
//!
//! Provides port mocks and synthetic image builders for exercising the
//! analysis pipeline without image files on disk.
//!
//! # Example
//!
//! ```
//! use stockshot_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let flat = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! let source = MockImageSource::new(vec![
//!     SyntheticImageBuilder::info("sharp", sharp),
//!     SyntheticImageBuilder::info("flat", flat),
//! ]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
