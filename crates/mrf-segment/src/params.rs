use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Tunable parameter violations, reported before any buffer is touched.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("temperature must be positive and finite (got {0})")]
    InvalidTemperature(f64),

    #[error("threshold must lie strictly inside (0, 1) (got {0})")]
    InvalidThreshold(f64),

    #[error("explicit radius must be positive")]
    ZeroRadius,

    #[error("partition must be positive")]
    ZeroPartition,

    #[error("partition {partition} yields a zero radius for a {width}x{height} image")]
    RadiusUnderflow {
        width: usize,
        height: usize,
        partition: u32,
    },
}

/// Segmentation tunables.
///
/// Defaults reproduce the reference configuration: three relaxation passes
/// with an 0.85 CDF threshold, temperature 23, and a neighborhood radius of
/// one `partition`-th of the smaller image dimension.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Radius divisor: `radius = min(width, height) / partition`. Larger
    /// values mean a smaller, cheaper neighborhood.
    pub partition: u32,
    /// Explicit neighborhood radius; overrides `partition` when set.
    pub radius: Option<u32>,
    /// Number of relaxation passes. Zero is a valid no-op budget.
    pub iterations: u32,
    /// CDF fraction at which the intensity scan stops, in (0, 1).
    pub threshold: f64,
    /// Gibbs temperature; higher flattens the intensity distribution and
    /// smooths more aggressively.
    pub temperature: f64,
    /// Whether the center sample contributes to its own energy term.
    pub include_center: bool,
    /// Region-growing seed; defaults to the image center.
    pub seed: Option<(u32, u32)>,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            partition: 80,
            radius: None,
            iterations: 3,
            threshold: 0.85,
            temperature: 23.0,
            include_center: true,
            seed: None,
        }
    }
}

impl SegmentationParams {
    /// Check the geometry-independent preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold >= 1.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.radius.is_none() && self.partition == 0 {
            return Err(ConfigError::ZeroPartition);
        }
        if self.radius == Some(0) {
            return Err(ConfigError::ZeroRadius);
        }
        Ok(())
    }

    /// Resolve the neighborhood radius for an image of the given size.
    pub fn resolve_radius(&self, width: usize, height: usize) -> Result<NonZeroU32, ConfigError> {
        if let Some(r) = self.radius {
            return NonZeroU32::new(r).ok_or(ConfigError::ZeroRadius);
        }
        if self.partition == 0 {
            return Err(ConfigError::ZeroPartition);
        }
        let min_dim = width.min(height) as u32;
        NonZeroU32::new(min_dim / self.partition).ok_or(ConfigError::RadiusUnderflow {
            width,
            height,
            partition: self.partition,
        })
    }
}
