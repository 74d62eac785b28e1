//! Dense bit-packed 2D boolean matrix.
//!
//! Bit `(x, y)` lives at linear index `y * width + x`, in byte
//! `index >> 3` at bit `index % 8`. The propagator uses
//! `width = cell_count` and `height = rule_count`, so each row is one
//! rule's visited-anchor bitset over the whole grid.

use tessel_core::BufferError;

/// A `width × height` bitset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMask2D {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl BitMask2D {
    /// Create an all-false mask.
    ///
    /// Returns `Err(BufferError::EmptyDimension)` if either dimension is
    /// zero.
    pub fn new(width: usize, height: usize) -> Result<Self, BufferError> {
        if width == 0 {
            return Err(BufferError::EmptyDimension { name: "width" });
        }
        if height == 0 {
            return Err(BufferError::EmptyDimension { name: "height" });
        }
        let bits = width * height;
        Ok(Self {
            width,
            height,
            bytes: vec![0; bits.div_ceil(8)],
        })
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        debug_assert!(x < self.width && y < self.height);
        let offset = y * self.width + x;
        (offset >> 3, 1u8 << (offset % 8))
    }

    /// Read bit `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = self.locate(x, y);
        self.bytes[byte] & mask != 0
    }

    /// Write bit `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let (byte, mask) = self.locate(x, y);
        if value {
            self.bytes[byte] |= mask;
        } else {
            self.bytes[byte] &= !mask;
        }
    }

    /// Set every bit.
    pub fn fill(&mut self) {
        self.bytes.fill(0xFF);
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Backing storage size in bytes: `ceil(width * height / 8)`.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
