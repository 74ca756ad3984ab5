//! Seeded region growing over the relaxed buffer.

use std::collections::VecDeque;

use mrf_segment_core::{MaskBuffer, PixelBuffer};

/// Region-growing failures.
#[derive(thiserror::Error, Debug)]
pub enum RegionError {
    #[error("seed ({x}, {y}) is outside the {width}x{height} image")]
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

const ADJACENT: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Flood-fill the connected region of pixels matching the seed.
///
/// Breadth-first over 4-connected adjacency. The seed's sample is captured
/// once up front and every candidate is compared against it channel by
/// channel; a set mask bit marks "already enqueued", so each position enters
/// the frontier at most once and the traversal terminates on any input.
pub fn grow(relaxed: &PixelBuffer, seed: (usize, usize)) -> Result<MaskBuffer, RegionError> {
    let (sx, sy) = seed;
    let width = relaxed.width();
    let height = relaxed.height();
    if sx >= width || sy >= height {
        return Err(RegionError::SeedOutOfBounds {
            x: sx,
            y: sy,
            width,
            height,
        });
    }

    let target = relaxed.pixel(sx, sy).to_vec();

    let mut mask = MaskBuffer::zeroed(width, height);
    let mut frontier = VecDeque::new();
    mask.set(sx, sy);
    frontier.push_back((sx, sy));

    while let Some((x, y)) = frontier.pop_front() {
        for (dx, dy) in ADJACENT {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if mask.get(nx, ny) {
                continue;
            }
            if relaxed.pixel(nx, ny) == target.as_slice() {
                mask.set(nx, ny);
                frontier.push_back((nx, ny));
            }
        }
    }

    log::debug!(
        "region from seed ({sx}, {sy}) covers {} of {} pixels",
        mask.count_set(),
        width * height
    );
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_outside_bounds_is_rejected() {
        let buf = PixelBuffer::filled(4, 4, 1, 0);
        assert!(matches!(
            grow(&buf, (4, 0)),
            Err(RegionError::SeedOutOfBounds { .. })
        ));
        assert!(matches!(
            grow(&buf, (0, 7)),
            Err(RegionError::SeedOutOfBounds { .. })
        ));
    }

    #[test]
    fn uniform_image_fills_completely() {
        let buf = PixelBuffer::filled(6, 4, 3, 17);
        let mask = grow(&buf, (3, 2)).unwrap();
        assert_eq!(mask.count_set(), 24);
    }

    #[test]
    fn checkerboard_mask_is_exactly_the_seed() {
        // Strict checkerboard: no two 4-adjacent cells equal.
        let mut buf = PixelBuffer::filled(5, 5, 1, 0);
        for y in 0..5 {
            for x in 0..5 {
                buf.set_sample(x, y, 0, if (x + y) % 2 == 0 { 255 } else { 0 });
            }
        }
        let mask = grow(&buf, (0, 0)).unwrap();
        assert_eq!(mask.count_set(), 1);
        assert!(mask.get(0, 0));
    }

    #[test]
    fn diagonal_touching_regions_stay_separate() {
        // Two 2x2 blocks of 9s meeting only at a corner; 4-connectivity must
        // not leak across the diagonal.
        let mut buf = PixelBuffer::filled(4, 4, 1, 0);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)] {
            buf.set_sample(x, y, 0, 9);
        }
        let mask = grow(&buf, (0, 0)).unwrap();
        assert_eq!(mask.count_set(), 4);
        assert!(mask.get(1, 1));
        assert!(!mask.get(2, 2));
    }

    #[test]
    fn all_channels_must_match() {
        // Same luminance in channel 0, different channel 1: not part of the
        // region.
        let mut buf = PixelBuffer::filled(3, 1, 2, 5);
        buf.set_sample(2, 0, 1, 6);
        let mask = grow(&buf, (0, 0)).unwrap();
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
    }

    #[test]
    fn comparison_target_is_the_seed_not_the_predecessor() {
        // A gradient chain 5,5,6 would leak under predecessor comparison once
        // 6 neighbors a 6; against the fixed seed value it must stop at 5s.
        let mut buf = PixelBuffer::filled(4, 1, 1, 5);
        buf.set_sample(2, 0, 0, 6);
        buf.set_sample(3, 0, 0, 6);
        let mask = grow(&buf, (0, 0)).unwrap();
        assert_eq!(mask.count_set(), 2);
        assert!(!mask.get(2, 0));
    }

    #[test]
    fn region_is_connected_to_seed() {
        // A matching pixel cut off from the seed must remain unset.
        let mut buf = PixelBuffer::filled(5, 1, 1, 1);
        buf.set_sample(2, 0, 0, 0); // wall
        let mask = grow(&buf, (0, 0)).unwrap();
        assert!(mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(3, 0));
        assert!(!mask.get(4, 0));
    }
}
