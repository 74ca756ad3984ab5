//! Applying a region mask to the original image.

use mrf_segment_core::{MaskBuffer, PixelBuffer};

/// Mask application failures.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    #[error(
        "mask geometry {mask_width}x{mask_height} does not match image {width}x{height}"
    )]
    GeometryMismatch {
        width: usize,
        height: usize,
        mask_width: usize,
        mask_height: usize,
    },
}

/// Zero every pixel the mask rejects, keep the rest byte-for-byte.
///
/// Row padding is carried through untouched.
pub fn apply(original: &PixelBuffer, mask: &MaskBuffer) -> Result<PixelBuffer, MaskError> {
    if mask.width() != original.width() || mask.height() != original.height() {
        return Err(MaskError::GeometryMismatch {
            width: original.width(),
            height: original.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let mut out = original.clone();
    for y in 0..original.height() {
        for x in 0..original.width() {
            if !mask.get(x, y) {
                for c in 0..original.channels() {
                    out.set_sample(x, y, c, 0);
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region;

    #[test]
    fn background_is_zeroed_foreground_kept() {
        let mut buf = PixelBuffer::filled(3, 1, 2, 8);
        buf.set_sample(1, 0, 0, 200);
        buf.set_sample(1, 0, 1, 201);

        let mut mask = MaskBuffer::zeroed(3, 1);
        mask.set(1, 0);

        let out = apply(&buf, &mask).unwrap();
        assert_eq!(out.pixel(0, 0), &[0, 0]);
        assert_eq!(out.pixel(1, 0), &[200, 201]);
        assert_eq!(out.pixel(2, 0), &[0, 0]);
    }

    #[test]
    fn mismatched_geometry_is_rejected() {
        let buf = PixelBuffer::filled(3, 3, 1, 1);
        let mask = MaskBuffer::zeroed(3, 2);
        assert!(matches!(
            apply(&buf, &mask),
            Err(MaskError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn masking_is_idempotent() {
        let mut buf = PixelBuffer::filled(4, 4, 1, 30);
        buf.set_sample(0, 0, 0, 99);
        let mask = region::grow(&buf, (2, 2)).unwrap();

        let once = apply(&buf, &mask).unwrap();
        let twice = apply(&once, &mask).unwrap();
        assert_eq!(once, twice);
    }
}
