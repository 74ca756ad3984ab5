//! Double-buffered MRF relaxation.

use mrf_segment_core::{Neighborhood, PixelBuffer};

use crate::energy::{gibbs_cdf, LEVELS};
use crate::params::ConfigError;

/// Settings for one relaxation run.
#[derive(Clone, Debug)]
pub struct RelaxParams {
    pub iterations: u32,
    pub threshold: f64,
    pub temperature: f64,
    pub include_center: bool,
}

/// Iterative re-labeling engine.
///
/// Each pass reads the previous pass's output and writes a fresh buffer, so
/// label changes propagate one neighborhood per iteration. Pixels closer than
/// `radius` to a border are outside the interior and carried through
/// unchanged, which keeps the energy kernel free of bounds checks.
pub struct Relaxer {
    neighborhood: Neighborhood,
    params: RelaxParams,
}

impl Relaxer {
    /// Validate tunables and build the engine.
    pub fn new(neighborhood: Neighborhood, params: RelaxParams) -> Result<Self, ConfigError> {
        if !params.temperature.is_finite() || params.temperature <= 0.0 {
            return Err(ConfigError::InvalidTemperature(params.temperature));
        }
        if !params.threshold.is_finite() || params.threshold <= 0.0 || params.threshold >= 1.0 {
            return Err(ConfigError::InvalidThreshold(params.threshold));
        }
        Ok(Self {
            neighborhood,
            params,
        })
    }

    pub fn params(&self) -> &RelaxParams {
        &self.params
    }

    /// Run the full iteration budget and return the final buffer.
    ///
    /// A zero budget returns a copy of the input. There is no convergence
    /// check; the iteration count is the only termination control.
    pub fn relax(&self, initial: &PixelBuffer) -> PixelBuffer {
        let margin = self.neighborhood.radius() as usize;
        let width = initial.width();
        let height = initial.height();
        let channels = initial.channels();

        // Both buffers start as copies of the input so border pixels survive
        // every swap untouched.
        let mut read = initial.clone();
        let mut write = initial.clone();

        for iter in 0..self.params.iterations {
            std::mem::swap(&mut read, &mut write);

            for y in margin..height.saturating_sub(margin) {
                for x in margin..width.saturating_sub(margin) {
                    for c in 0..channels {
                        let cdf = gibbs_cdf(
                            &read,
                            x,
                            y,
                            c,
                            &self.neighborhood,
                            self.params.include_center,
                            self.params.temperature,
                        );
                        write.set_sample(x, y, c, first_crossing(&cdf, self.params.threshold));
                    }
                }
            }

            log::info!(
                "relaxation iteration {}/{} complete",
                iter + 1,
                self.params.iterations
            );
        }

        write
    }
}

/// Smallest intensity whose cumulative fraction strictly exceeds `threshold`.
///
/// The scan is ascending and the final fraction is 1, so for any threshold
/// below 1 some intensity always qualifies.
fn first_crossing(cdf: &[f64; LEVELS + 1], threshold: f64) -> u8 {
    let total = cdf[LEVELS];
    for lum in 0..LEVELS {
        if cdf[lum + 1] / total > threshold {
            return lum as u8;
        }
    }
    (LEVELS - 1) as u8
}
