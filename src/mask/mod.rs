//! One-bit-per-pixel monochrome masks.
//!
//! A `MonoMask` owns a packed buffer: row-major, one bit per pixel, most
//! significant bit first within each byte. Rows start every `stride` bytes
//! and `stride >= ceil(width / 8)`. Masks are immutable after construction,
//! so they can be shared between search workers behind an `Arc`.

use crate::image::ImageView;
use crate::util::{MonoMatchError, MonoMatchResult};

/// Owned 1-bpp monochrome bitmap with bit-level addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonoMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

/// Byte offset of pixel `(x, y)` in a packed buffer.
#[inline]
pub(crate) fn byte_index(x: usize, y: usize, stride: usize) -> usize {
    y * stride + (x >> 3)
}

/// Bit mask selecting pixel column `x` within its byte.
#[inline]
pub(crate) fn bit_mask(x: usize) -> u8 {
    0x80 >> (x & 7)
}

/// Minimum row stride in bytes for a given pixel width.
#[inline]
pub fn packed_stride(width: usize) -> usize {
    width.div_ceil(8)
}

impl MonoMask {
    /// Builds a mask from an optional byte source.
    ///
    /// An absent source yields [`MonoMatchError::InvalidSource`].
    pub fn from_source(source: Option<ImageView<'_, u8>>) -> MonoMatchResult<Self> {
        source
            .map(Self::from_view)
            .ok_or(MonoMatchError::InvalidSource("source image is absent"))
    }

    /// Packs a byte view; non-zero elements become set bits.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let width = view.width();
        let height = view.height();
        let stride = packed_stride(width);
        let mut data = vec![0u8; stride * height];
        for y in 0..height {
            let Some(row) = view.row(y) else {
                continue;
            };
            let out = &mut data[y * stride..(y + 1) * stride];
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    out[x >> 3] |= bit_mask(x);
                }
            }
        }
        Self {
            data,
            width,
            height,
            stride,
        }
    }

    /// Adopts an already packed 1-bpp buffer.
    pub fn from_packed(
        data: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
    ) -> MonoMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(MonoMatchError::InvalidDimensions { width, height });
        }
        if stride < packed_stride(width) {
            return Err(MonoMatchError::InvalidStride { width, stride });
        }
        let needed = stride
            .checked_mul(height)
            .ok_or(MonoMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(MonoMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Builds a mask from a row-major slice of booleans.
    pub fn from_bools(pixels: &[bool], width: usize, height: usize) -> MonoMatchResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(MonoMatchError::InvalidDimensions { width, height })?;
        if pixels.len() != needed {
            return Err(MonoMatchError::BufferTooSmall {
                needed,
                got: pixels.len(),
            });
        }
        let bytes: Vec<u8> = pixels.iter().map(|&on| u8::from(on)).collect();
        let view = ImageView::from_slice(&bytes, width, height)?;
        Ok(Self::from_view(view))
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the packed backing buffer including row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the bit at column `x`, row `y`.
    ///
    /// Callers must keep `x < width` and `y < height`; the search guards its
    /// scan ranges so it never asks for anything else. Coordinates past the
    /// end of the buffer panic; in-buffer padding bits are not detected in
    /// release builds.
    #[inline]
    pub fn pixel_at(&self, x: usize, y: usize) -> bool {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} mask",
            self.width,
            self.height
        );
        self.data[byte_index(x, y, self.stride)] & bit_mask(x) != 0
    }

    /// Returns the bit at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel_at(x, y))
    }

    /// Materializes row `y` as `width` booleans.
    ///
    /// Rows are not cached; every call allocates a fresh vector.
    pub fn row(&self, y: usize) -> Vec<bool> {
        (0..self.width).map(|x| self.pixel_at(x, y)).collect()
    }

    /// Counts the set pixels, ignoring row padding.
    pub fn count_set(&self) -> usize {
        let full_bytes = self.width >> 3;
        let tail_bits = self.width & 7;
        let tail_mask = if tail_bits == 0 {
            0
        } else {
            !(0xFFu8 >> tail_bits)
        };
        (0..self.height)
            .map(|y| {
                let row = &self.data[y * self.stride..];
                let full: u32 = row[..full_bytes].iter().map(|b| b.count_ones()).sum();
                let tail = if tail_bits == 0 {
                    0
                } else {
                    (row[full_bytes] & tail_mask).count_ones()
                };
                (full + tail) as usize
            })
            .sum()
    }
}
