//! Flat, strided raster containers.
//!
//! `PixelBuffer` is the only pixel representation the engine works with:
//! row-major bytes with an explicit row stride, so a decoded BMP with its
//! 4-byte row alignment can be wrapped without repacking. `MaskBuffer` is the
//! per-pixel 0/1 companion produced by region growing.

/// Construction-time geometry violations.
#[derive(thiserror::Error, Debug)]
pub enum BufferError {
    #[error("zero-sized geometry (width={width}, height={height}, channels={channels})")]
    EmptyGeometry {
        width: usize,
        height: usize,
        channels: usize,
    },

    #[error("row stride {row_stride} is smaller than a pixel row of {row_bytes} bytes")]
    StrideTooSmall { row_stride: usize, row_bytes: usize },

    #[error("buffer length {got} does not match geometry (expected {expected} bytes)")]
    LengthMismatch { expected: usize, got: usize },
}

/// A decoded raster: geometry plus raw samples.
///
/// Samples are addressed as `data[y * row_stride + x * channels + c]`.
/// Buffers are treated as immutable between pipeline stages; every stage
/// produces a fresh buffer rather than editing its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    row_stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Validate and wrap an existing byte buffer.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        row_stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(BufferError::EmptyGeometry {
                width,
                height,
                channels,
            });
        }
        let row_bytes = width * channels;
        if row_stride < row_bytes {
            return Err(BufferError::StrideTooSmall {
                row_stride,
                row_bytes,
            });
        }
        let expected = row_stride * height;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            row_stride,
            data,
        })
    }

    /// Wrap a tightly packed buffer (`row_stride == width * channels`).
    pub fn packed(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        Self::new(width, height, channels, width * channels, data)
    }

    /// A packed buffer with every sample set to `value`. Handy in tests and
    /// doc examples; panics only on zero-sized geometry.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Self {
        Self::packed(width, height, channels, vec![value; width * height * channels])
            .expect("non-zero geometry")
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Raw bytes, padding included.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: usize, y: usize, c: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        y * self.row_stride + x * self.channels + c
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[self.index(x, y, c)]
    }

    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8) {
        let i = self.index(x, y, c);
        self.data[i] = value;
    }

    /// All samples of one pixel, in channel order.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.channels]
    }

    /// True when `other` describes the same raster shape (stride excluded:
    /// padding is a storage detail, not geometry).
    #[inline]
    pub fn same_geometry(&self, other: &PixelBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
    }
}

/// Per-pixel 0/1 mask with `PixelBuffer` width/height.
///
/// Doubles as the visited set during region growing: a set bit means the
/// position was enqueued, which is what bounds the traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl MaskBuffer {
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = 1;
    }

    /// Number of set positions.
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&b| b != 0).count()
    }

    /// Raw 0/1 bytes in row-major order.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
