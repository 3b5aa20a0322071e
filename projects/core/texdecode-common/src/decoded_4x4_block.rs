//! # Decoded 4x4 Block
//!
//! [`Decoded4x4Block`] holds the 16 pixels a single compressed block expands to, before they are
//! written into a strided image buffer.
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use crate::color_8888::Color8888;

/// Represents a decoded 4x4 block of BC pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Default for Decoded4x4Block {
    fn default() -> Self {
        Self::new(Color8888::default())
    }
}

impl Decoded4x4Block {
    /// Constructs a new decoded block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use texdecode_common::color_8888::Color8888;
    /// use texdecode_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.has_identical_pixels());
    /// ```
    pub const fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Gets the pixel at (`x`, `y`), both in 0..4.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at (`x`, `y`), both in 0..4.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        self.pixels[y * 4 + x] = pixel;
    }

    /// Checks if all pixels in the block have the same color values
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = self.pixels[0];
        self.pixels.iter().all(|&pixel| pixel == first)
    }

    /// Writes the block into `dst`, whose rows are `stride` bytes apart, at `bytes_per_pixel`
    /// (1, 3 or 4) bytes per pixel. See [`Color8888::write_to`] for the channel order.
    ///
    /// `dst` must start at the block's top-left pixel and span four rows.
    #[inline]
    pub fn write_to(&self, dst: &mut [u8], stride: usize, bytes_per_pixel: usize) {
        let row_bytes = bytes_per_pixel * 4;
        for (y, row) in self.pixels.chunks_exact(4).enumerate() {
            let start = y * stride;
            let out = &mut dst[start..start + row_bytes];
            for (pixel, px_out) in row.iter().zip(out.chunks_exact_mut(bytes_per_pixel)) {
                pixel.write_to(px_out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_to_respects_stride() {
        let mut block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        block.set_pixel(3, 3, Color8888::new(9, 9, 9, 9));
        assert!(!block.has_identical_pixels());
        assert_eq!(block.get_pixel(3, 3), Color8888::new(9, 9, 9, 9));

        let stride = 14;
        let mut dst = vec![0xEEu8; stride * 3 + 12];
        block.write_to(&mut dst, stride, 3);

        for y in 0..4 {
            let row = &dst[y * stride..y * stride + 12];
            let expected_last: [u8; 3] = if y == 3 { [9, 9, 9] } else { [3, 2, 1] };
            assert_eq!(&row[..9], &[3, 2, 1, 3, 2, 1, 3, 2, 1]);
            assert_eq!(&row[9..], &expected_last);
            if y < 3 {
                assert_eq!(&dst[y * stride + 12..(y + 1) * stride], &[0xEE, 0xEE]);
            }
        }
    }
}
