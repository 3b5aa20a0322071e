//! Pixel layouts of decoded buffers.

use derive_enum_all_values::AllValues;

/// Canonical pixel layout of a decoded buffer.
///
/// 24 and 32-bit layouts store bytes in B, G, R(, A) order. 16-bit layouts are little endian
/// words with the channel packing named by the variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum ImageFormat {
    /// 8-bit gray, or 8-bit palette indices before the palette is applied.
    Rgb8,
    /// 24-bit B, G, R.
    Rgb24,
    /// 32-bit B, G, R, A.
    Rgba32,
    /// 16-bit 4444 with alpha.
    Rgba16,
    /// 15-bit 555 stored in 16 bits.
    R5g5b5,
    /// 16-bit 565.
    R5g6b5,
    /// 16-bit 5551 with a one bit alpha.
    R5g5b5a1,
}

impl ImageFormat {
    /// Significant bits of each pixel. 555 reports 15, though it occupies a 16-bit word.
    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            ImageFormat::Rgb8 => 8,
            ImageFormat::R5g5b5 => 15,
            ImageFormat::Rgba16 | ImageFormat::R5g6b5 | ImageFormat::R5g5b5a1 => 16,
            ImageFormat::Rgb24 => 24,
            ImageFormat::Rgba32 => 32,
        }
    }

    /// Bytes each pixel occupies in the buffer: [`ImageFormat::bits_per_pixel`] rounded up.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        (self.bits_per_pixel() as usize).div_ceil(8)
    }

    /// Returns `true` if the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            ImageFormat::Rgba32 | ImageFormat::Rgba16 | ImageFormat::R5g5b5a1
        )
    }
}
