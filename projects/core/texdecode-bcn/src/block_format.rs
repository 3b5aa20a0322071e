//! The closed set of block compression formats.

use crate::{
    bc1_decode::decode_bc1_block, bc2_decode::decode_bc2_block, bc3_decode::decode_bc3_block,
    bc4_decode::decode_bc4_block, bc5_decode::decode_bc5_block, bc6h_decode::decode_bc6h_block,
    bc7_decode::decode_bc7_block,
};
use derive_enum_all_values::AllValues;
use texdecode_common::{decoded_4x4_block::Decoded4x4Block, image_format::ImageFormat};

/// Width and height of a block, in pixels.
pub const BLOCK_SIZE: u32 = 4;

/// A block compression format.
///
/// Selected once when the container header is parsed, then used to dispatch every block of the
/// surface through [`BlockFormat::decode_block`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// BC1 / DXT1: 565 color with optional punch-through alpha.
    Bc1,
    /// BC2 / DXT3: BC1 color plus explicit 4-bit alpha.
    Bc2,
    /// BC3 / DXT5: BC1 color plus an interpolated alpha gradient.
    Bc3,
    /// BC4 / ATI1: one unsigned channel.
    Bc4,
    /// BC4 with two's complement endpoints.
    Bc4Signed,
    /// BC5 / ATI2: two unsigned channels.
    Bc5,
    /// BC5 with two's complement endpoints.
    Bc5Signed,
    /// BC6H with unsigned half floats.
    Bc6h,
    /// BC6H with signed half floats.
    Bc6hSigned,
    /// BC7.
    Bc7,
}

impl BlockFormat {
    /// Size of one compressed block in bytes.
    #[inline]
    pub const fn block_bytes(self) -> usize {
        match self {
            BlockFormat::Bc1 | BlockFormat::Bc4 | BlockFormat::Bc4Signed => 8,
            _ => 16,
        }
    }

    /// Pixel layout a decoded block is written in.
    #[inline]
    pub const fn output_format(self) -> ImageFormat {
        match self {
            BlockFormat::Bc1 | BlockFormat::Bc5 | BlockFormat::Bc5Signed => ImageFormat::Rgb24,
            BlockFormat::Bc4 | BlockFormat::Bc4Signed => ImageFormat::Rgb8,
            BlockFormat::Bc2
            | BlockFormat::Bc3
            | BlockFormat::Bc6h
            | BlockFormat::Bc6hSigned
            | BlockFormat::Bc7 => ImageFormat::Rgba32,
        }
    }

    /// Whether the format stores two's complement data.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            BlockFormat::Bc4Signed | BlockFormat::Bc5Signed | BlockFormat::Bc6hSigned
        )
    }

    /// Decodes the block at the start of `src`.
    ///
    /// # Returns
    ///
    /// A decoded block, else [`None`] if the slice is shorter than [`Self::block_bytes`].
    #[inline]
    pub fn decode_block(self, src: &[u8]) -> Option<Decoded4x4Block> {
        let block = src.get(..self.block_bytes())?;
        Some(match self {
            BlockFormat::Bc1 => decode_bc1_block(block.try_into().ok()?),
            BlockFormat::Bc2 => decode_bc2_block(block.try_into().ok()?),
            BlockFormat::Bc3 => decode_bc3_block(block.try_into().ok()?),
            BlockFormat::Bc4 => decode_bc4_block(block.try_into().ok()?, false),
            BlockFormat::Bc4Signed => decode_bc4_block(block.try_into().ok()?, true),
            BlockFormat::Bc5 => decode_bc5_block(block.try_into().ok()?, false),
            BlockFormat::Bc5Signed => decode_bc5_block(block.try_into().ok()?, true),
            BlockFormat::Bc6h => decode_bc6h_block(block.try_into().ok()?, false),
            BlockFormat::Bc6hSigned => decode_bc6h_block(block.try_into().ok()?, true),
            BlockFormat::Bc7 => decode_bc7_block(block.try_into().ok()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(BlockFormat::Bc1, 8, 3)]
    #[case(BlockFormat::Bc2, 16, 4)]
    #[case(BlockFormat::Bc3, 16, 4)]
    #[case(BlockFormat::Bc4, 8, 1)]
    #[case(BlockFormat::Bc4Signed, 8, 1)]
    #[case(BlockFormat::Bc5, 16, 3)]
    #[case(BlockFormat::Bc5Signed, 16, 3)]
    #[case(BlockFormat::Bc6h, 16, 4)]
    #[case(BlockFormat::Bc6hSigned, 16, 4)]
    #[case(BlockFormat::Bc7, 16, 4)]
    fn format_constants(
        #[case] format: BlockFormat,
        #[case] block_bytes: usize,
        #[case] bytes_per_pixel: usize,
    ) {
        assert_eq!(format.block_bytes(), block_bytes);
        assert_eq!(format.output_format().bytes_per_pixel(), bytes_per_pixel);
    }

    #[test]
    fn short_slices_are_rejected() {
        for &format in BlockFormat::all_values() {
            let short = vec![0u8; format.block_bytes() - 1];
            assert_eq!(format.decode_block(&short), None, "{format:?}");

            let exact = vec![0u8; format.block_bytes() + 3];
            assert!(format.decode_block(&exact).is_some(), "{format:?}");
        }
    }

    #[test]
    fn only_signed_variants_report_signed() {
        let signed: Vec<_> = BlockFormat::all_values()
            .iter()
            .filter(|f| f.is_signed())
            .copied()
            .collect();
        assert_eq!(
            signed,
            [
                BlockFormat::Bc4Signed,
                BlockFormat::Bc5Signed,
                BlockFormat::Bc6hSigned
            ]
        );
    }
}
