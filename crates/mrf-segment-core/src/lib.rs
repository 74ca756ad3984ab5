//! Core buffer and neighborhood types for MRF image segmentation.
//!
//! This crate is intentionally small and free of image-format dependencies.
//! It owns the in-memory raster representation (`PixelBuffer`, `MaskBuffer`)
//! and the neighborhood geometry (`Neighborhood`) that the relaxation engine
//! in `mrf-segment` is built on. Decoding and encoding actual image files is
//! the caller's job.

mod buffer;
mod logger;
mod neighborhood;

pub use buffer::{BufferError, MaskBuffer, PixelBuffer};
pub use neighborhood::Neighborhood;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
