//! Stockshot Adapters - External adapters for stockshot.
//!
//! This crate provides the filesystem image source that feeds decoded,
//! sRGB RGBA8 buffers into the analysis engine.

pub mod fs;

pub use fs::FsImageSource;
