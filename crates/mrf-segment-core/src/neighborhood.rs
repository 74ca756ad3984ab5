use std::num::NonZeroU32;

/// Disc-shaped neighborhood around a pixel.
///
/// Holds every integer offset `(dx, dy)` with `dx² + dy² ≤ radius²`,
/// origin included, enumerated in row-major `(dy, dx)` order. The order is
/// fixed so that energy accumulation is bit-for-bit reproducible across runs.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    radius: NonZeroU32,
    offsets: Vec<(i32, i32)>,
}

impl Neighborhood {
    /// Precompute the offset table for `radius`. A zero radius would make the
    /// energy computation vacuous, so the type forbids it.
    pub fn new(radius: NonZeroU32) -> Self {
        let r = radius.get() as i64;
        let r2 = r * r;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    offsets.push((dx as i32, dy as i32));
                }
            }
        }
        Self { radius, offsets }
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius.get()
    }

    /// Offsets in their fixed enumeration order.
    #[inline]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Number of samples the neighborhood covers (origin included).
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nb(r: u32) -> Neighborhood {
        Neighborhood::new(NonZeroU32::new(r).unwrap())
    }

    #[test]
    fn radius_one_is_the_cross() {
        let n = nb(1);
        assert_eq!(
            n.offsets(),
            &[(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)]
        );
    }

    #[test]
    fn offsets_stay_inside_the_disc() {
        for r in 1..8u32 {
            let n = nb(r);
            let r2 = (r * r) as i64;
            for &(dx, dy) in n.offsets() {
                assert!((dx as i64).pow(2) + (dy as i64).pow(2) <= r2, "radius {r}");
            }
        }
    }

    #[test]
    fn offsets_are_unique_and_order_stable() {
        let a = nb(3);
        let b = nb(3);
        assert_eq!(a.offsets(), b.offsets());

        let mut seen = std::collections::HashSet::new();
        for &o in a.offsets() {
            assert!(seen.insert(o), "duplicate offset {o:?}");
        }
    }

    #[test]
    fn contains_origin() {
        for r in 1..5u32 {
            assert!(nb(r).offsets().contains(&(0, 0)));
        }
    }
}
