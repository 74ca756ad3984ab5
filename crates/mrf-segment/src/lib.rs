//! Foreground segmentation via Markov-random-field relaxation and seeded
//! region growing.
//!
//! The pipeline runs three stages over a decoded [`PixelBuffer`]:
//! 1. **Relaxation** (`relax`): every interior pixel/channel is re-labeled to
//!    the smallest intensity whose Gibbs CDF fraction clears a threshold,
//!    iterated over double-buffered passes.
//! 2. **Region growing** (`region`): BFS flood fill over the relaxed buffer
//!    from a seed pixel, accepting 4-connected neighbors whose channels
//!    exactly match the seed's relaxed sample.
//! 3. **Mask application** (`mask`): background pixels of the *original*
//!    image are zeroed.
//!
//! ## Quickstart
//!
//! ```
//! use mrf_segment::{SegmentationParams, Segmenter};
//! use mrf_segment_core::PixelBuffer;
//!
//! let img = PixelBuffer::filled(16, 16, 1, 10);
//! let params = SegmentationParams {
//!     radius: Some(1),
//!     iterations: 1,
//!     ..SegmentationParams::default()
//! };
//! let result = Segmenter::new(params)?.segment(&img)?;
//! assert!(result.mask.get(8, 8));
//! # Ok::<(), mrf_segment::SegmentError>(())
//! ```
//!
//! ## API map
//! - [`Segmenter`] / [`SegmentationParams`]: end-to-end facade.
//! - [`energy`]: Gibbs energy and per-pixel CDF.
//! - [`relax`]: the double-buffered relaxation engine.
//! - [`region`]: seeded flood fill.
//! - [`mask`]: mask application.
//! - [`io`] (feature `image`): conversions to and from `image` crate rasters.

pub mod energy;
pub mod mask;
pub mod params;
pub mod pipeline;
pub mod region;
pub mod relax;

#[cfg(feature = "image")]
pub mod io;

pub use mrf_segment_core as core;

pub use mask::MaskError;
pub use params::{ConfigError, SegmentationParams};
pub use pipeline::{SegmentationResult, Segmenter, SegmentError};
pub use region::RegionError;
pub use relax::{RelaxParams, Relaxer};
