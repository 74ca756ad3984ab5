//! Conversions between `image` crate rasters and `PixelBuffer`.
//!
//! The `image` crate is the codec boundary: it owns file formats, headers,
//! and row padding. Buffers on our side are always tightly packed.

use image::{DynamicImage, GrayImage, RgbImage};
use mrf_segment_core::{BufferError, MaskBuffer, PixelBuffer};

/// Codec-boundary failures.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("expected a {expected}-channel buffer, got {got}")]
    ChannelMismatch { expected: usize, got: usize },

    #[error("image dimensions overflow the target container")]
    DimensionOverflow,

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Decode into a single-channel buffer.
pub fn buffer_from_gray(img: &GrayImage) -> Result<PixelBuffer, CodecError> {
    Ok(PixelBuffer::packed(
        img.width() as usize,
        img.height() as usize,
        1,
        img.as_raw().clone(),
    )?)
}

/// Decode into a three-channel buffer.
pub fn buffer_from_rgb(img: &RgbImage) -> Result<PixelBuffer, CodecError> {
    Ok(PixelBuffer::packed(
        img.width() as usize,
        img.height() as usize,
        3,
        img.as_raw().clone(),
    )?)
}

/// Decode any supported image, keeping color when present.
pub fn buffer_from_dynamic(img: &DynamicImage) -> Result<PixelBuffer, CodecError> {
    match img {
        DynamicImage::ImageLuma8(gray) => buffer_from_gray(gray),
        _ => buffer_from_rgb(&img.to_rgb8()),
    }
}

fn packed_bytes(buf: &PixelBuffer) -> Vec<u8> {
    let row_bytes = buf.width() * buf.channels();
    if buf.row_stride() == row_bytes {
        return buf.data().to_vec();
    }
    // Strip the row padding.
    let mut out = Vec::with_capacity(row_bytes * buf.height());
    for y in 0..buf.height() {
        let start = y * buf.row_stride();
        out.extend_from_slice(&buf.data()[start..start + row_bytes]);
    }
    out
}

/// Re-encode a single-channel buffer.
pub fn gray_from_buffer(buf: &PixelBuffer) -> Result<GrayImage, CodecError> {
    if buf.channels() != 1 {
        return Err(CodecError::ChannelMismatch {
            expected: 1,
            got: buf.channels(),
        });
    }
    let (w, h) = buffer_dims(buf)?;
    GrayImage::from_raw(w, h, packed_bytes(buf)).ok_or(CodecError::DimensionOverflow)
}

/// Re-encode a three-channel buffer.
pub fn rgb_from_buffer(buf: &PixelBuffer) -> Result<RgbImage, CodecError> {
    if buf.channels() != 3 {
        return Err(CodecError::ChannelMismatch {
            expected: 3,
            got: buf.channels(),
        });
    }
    let (w, h) = buffer_dims(buf)?;
    RgbImage::from_raw(w, h, packed_bytes(buf)).ok_or(CodecError::DimensionOverflow)
}

/// Render a mask as an 8-bit image, foreground white.
pub fn gray_from_mask(mask: &MaskBuffer) -> Result<GrayImage, CodecError> {
    let w = u32::try_from(mask.width()).map_err(|_| CodecError::DimensionOverflow)?;
    let h = u32::try_from(mask.height()).map_err(|_| CodecError::DimensionOverflow)?;
    let bytes = mask.data().iter().map(|&b| if b != 0 { 255 } else { 0 }).collect();
    GrayImage::from_raw(w, h, bytes).ok_or(CodecError::DimensionOverflow)
}

fn buffer_dims(buf: &PixelBuffer) -> Result<(u32, u32), CodecError> {
    let w = u32::try_from(buf.width()).map_err(|_| CodecError::DimensionOverflow)?;
    let h = u32::try_from(buf.height()).map_err(|_| CodecError::DimensionOverflow)?;
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_round_trip() {
        let img = GrayImage::from_fn(4, 3, |x, y| image::Luma([(x * 10 + y) as u8]));
        let buf = buffer_from_gray(&img).unwrap();
        assert_eq!(buf.channels(), 1);
        assert_eq!(buf.sample(3, 2, 0), 32);
        let back = gray_from_buffer(&buf).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn rgb_round_trip() {
        let img = RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));
        let buf = buffer_from_rgb(&img).unwrap();
        assert_eq!(buf.pixel(2, 1), &[2, 1, 7]);
        let back = rgb_from_buffer(&buf).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn padded_buffer_is_repacked_on_encode() {
        // 2x2 gray with 2 padding bytes per row.
        let data = vec![1, 2, 0, 0, 3, 4, 0, 0];
        let buf = PixelBuffer::new(2, 2, 1, 4, data).unwrap();
        let img = gray_from_buffer(&buf).unwrap();
        assert_eq!(img.as_raw(), &vec![1, 2, 3, 4]);
    }

    #[test]
    fn channel_mismatch_is_rejected() {
        let buf = PixelBuffer::filled(2, 2, 3, 0);
        assert!(matches!(
            gray_from_buffer(&buf),
            Err(CodecError::ChannelMismatch { expected: 1, got: 3 })
        ));
    }

    #[test]
    fn mask_renders_as_black_and_white() {
        let mut mask = MaskBuffer::zeroed(2, 1);
        mask.set(1, 0);
        let img = gray_from_mask(&mask).unwrap();
        assert_eq!(img.as_raw(), &vec![0, 255]);
    }
}
