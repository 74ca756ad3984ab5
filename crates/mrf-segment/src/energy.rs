//! Gibbs energy and the per-pixel intensity CDF.
//!
//! For one (pixel, channel) the energy of candidate intensity `L` is the
//! mismatch penalty summed over the neighborhood: `MISMATCH_ENERGY` for every
//! neighbor sample that disagrees with `L`. Energies are folded into a
//! 257-entry cumulative distribution over `exp(-energy / temperature)`, with
//! `cdf[0] = 0` as a fixed baseline and `cdf[L + 1]` holding the cumulative
//! mass through intensity `L`.

use mrf_segment_core::{Neighborhood, PixelBuffer};

/// Penalty added per disagreeing neighbor sample.
pub const MISMATCH_ENERGY: f64 = 5.0;

/// Number of candidate intensities.
pub const LEVELS: usize = 256;

/// Build the Gibbs CDF for `(x, y, channel)` against the `read` buffer.
///
/// The caller must keep `(x, y)` at least `neighborhood.radius()` away from
/// every border; offsets are applied without bounds checks.
pub fn gibbs_cdf(
    read: &PixelBuffer,
    x: usize,
    y: usize,
    channel: usize,
    neighborhood: &Neighborhood,
    include_center: bool,
    temperature: f64,
) -> [f64; LEVELS + 1] {
    debug_assert!(temperature > 0.0);

    // Histogram of neighbor samples. `energy[L] = MISMATCH_ENERGY * (n -
    // count[L])` is the same array the per-candidate double loop produces,
    // without rescanning the neighborhood 256 times.
    let mut count = [0u32; LEVELS];
    let mut n = 0u32;
    for &(dx, dy) in neighborhood.offsets() {
        if !include_center && dx == 0 && dy == 0 {
            continue;
        }
        let nx = (x as isize + dx as isize) as usize;
        let ny = (y as isize + dy as isize) as usize;
        count[read.sample(nx, ny, channel) as usize] += 1;
        n += 1;
    }

    let mut cdf = [0.0; LEVELS + 1];
    for lum in 0..LEVELS {
        let energy = MISMATCH_ENERGY * f64::from(n - count[lum]);
        cdf[lum + 1] = cdf[lum] + (-energy / temperature).exp();
    }
    cdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::num::NonZeroU32;

    fn nb(r: u32) -> Neighborhood {
        Neighborhood::new(NonZeroU32::new(r).unwrap())
    }

    /// The formulation the reference code spells out: rescan the whole
    /// neighborhood for every candidate intensity.
    fn gibbs_cdf_naive(
        read: &PixelBuffer,
        x: usize,
        y: usize,
        channel: usize,
        neighborhood: &Neighborhood,
        include_center: bool,
        temperature: f64,
    ) -> [f64; LEVELS + 1] {
        let mut cdf = [0.0; LEVELS + 1];
        for lum in 0..LEVELS {
            let mut energy = 0.0;
            for &(dx, dy) in neighborhood.offsets() {
                if !include_center && dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as isize + dx as isize) as usize;
                let ny = (y as isize + dy as isize) as usize;
                if read.sample(nx, ny, channel) as usize != lum {
                    energy += MISMATCH_ENERGY;
                }
            }
            cdf[lum + 1] = cdf[lum] + (-energy / temperature).exp();
        }
        cdf
    }

    fn gradient_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::filled(9, 9, 1, 0);
        for y in 0..9 {
            for x in 0..9 {
                buf.set_sample(x, y, 0, (x * 20 + y * 7) as u8);
            }
        }
        buf
    }

    #[test]
    fn cdf_starts_at_zero_and_is_nondecreasing() {
        let buf = gradient_buffer();
        let cdf = gibbs_cdf(&buf, 4, 4, 0, &nb(2), true, 23.0);
        assert_eq!(cdf[0], 0.0);
        for lum in 0..LEVELS {
            assert!(cdf[lum + 1] >= cdf[lum]);
        }
        assert!(cdf[LEVELS] > 0.0);
    }

    #[test]
    fn histogram_matches_naive_double_loop() {
        let buf = gradient_buffer();
        for include_center in [true, false] {
            let fast = gibbs_cdf(&buf, 4, 4, 0, &nb(3), include_center, 15.0);
            let slow = gibbs_cdf_naive(&buf, 4, 4, 0, &nb(3), include_center, 15.0);
            for lum in 0..=LEVELS {
                assert_relative_eq!(fast[lum], slow[lum], max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn uniform_neighborhood_concentrates_mass_on_its_value() {
        let buf = PixelBuffer::filled(5, 5, 1, 42);
        let cdf = gibbs_cdf(&buf, 2, 2, 0, &nb(1), true, 2.0);
        let total = cdf[LEVELS];
        // Mass below 42 is negligible, the jump at 42 carries nearly all of it.
        assert!(cdf[42] / total < 1e-3);
        assert!(cdf[43] / total > 0.999);
    }

    #[test]
    fn excluding_center_drops_one_sample() {
        let buf = gradient_buffer();
        let with = gibbs_cdf(&buf, 4, 4, 0, &nb(1), true, 10.0);
        let without = gibbs_cdf(&buf, 4, 4, 0, &nb(1), false, 10.0);
        // Fewer samples, strictly less total energy per candidate: the two
        // totals must differ.
        assert!((with[LEVELS] - without[LEVELS]).abs() > 0.0);
    }
}
