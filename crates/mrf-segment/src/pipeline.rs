//! End-to-end segmentation facade.

use mrf_segment_core::{BufferError, MaskBuffer, Neighborhood, PixelBuffer};

use crate::mask::{self, MaskError};
use crate::params::{ConfigError, SegmentationParams};
use crate::region::{self, RegionError};
use crate::relax::{RelaxParams, Relaxer};

/// Any failure the pipeline can report. All variants are caller contract
/// violations detected before the offending stage mutates anything.
#[derive(thiserror::Error, Debug)]
pub enum SegmentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Mask(#[from] MaskError),
}

/// Everything one segmentation run produces.
#[derive(Clone, Debug)]
pub struct SegmentationResult {
    /// The smoothed/quantized buffer after the full iteration budget.
    pub relaxed: PixelBuffer,
    /// Foreground mask grown from the seed over the relaxed buffer.
    pub mask: MaskBuffer,
    /// Original image with background pixels zeroed.
    pub segmented: PixelBuffer,
    /// Neighborhood radius actually used.
    pub radius: u32,
    /// Seed the region was grown from.
    pub seed: (usize, usize),
}

/// Relax → grow → apply, with parameters validated up front.
#[derive(Debug)]
pub struct Segmenter {
    params: SegmentationParams,
}

impl Segmenter {
    pub fn new(params: SegmentationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    /// Run the full pipeline on one image.
    pub fn segment(&self, image: &PixelBuffer) -> Result<SegmentationResult, SegmentError> {
        let radius = self
            .params
            .resolve_radius(image.width(), image.height())?;
        log::debug!(
            "segmenting {}x{}x{} image, radius {}",
            image.width(),
            image.height(),
            image.channels(),
            radius
        );

        let relaxer = Relaxer::new(
            Neighborhood::new(radius),
            RelaxParams {
                iterations: self.params.iterations,
                threshold: self.params.threshold,
                temperature: self.params.temperature,
                include_center: self.params.include_center,
            },
        )?;
        let relaxed = relaxer.relax(image);

        let seed = match self.params.seed {
            Some((x, y)) => (x as usize, y as usize),
            None => (image.width() / 2, image.height() / 2),
        };
        let mask = region::grow(&relaxed, seed)?;
        let segmented = mask::apply(image, &mask)?;

        Ok(SegmentationResult {
            relaxed,
            mask,
            segmented,
            radius: radius.get(),
            seed,
        })
    }
}
