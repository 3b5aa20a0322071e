//! Selects how the payload of a DDS file is decoded.
//!
//! The choice is a total function of the FourCC, the DXGI format (when a DX10 extension is
//! present) and, for legacy uncompressed files, the bit count and channel masks. Anything that
//! does not map to a decoder is [`DecodeError::UnsupportedFormat`].

use super::constants::*;
use super::parse_dds::{DdsHeader, DdsPixelFormat};
use texdecode_bcn::{BlockFormat, BLOCK_SIZE};
use texdecode_common::{
    error::{DecodeError, InvalidHeaderReason},
    image_format::ImageFormat,
    normalize::ChannelMasks,
};

/// How the payload of a DDS file is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdsFormat {
    /// Block-compressed tiles.
    Compressed(BlockFormat),
    /// Plain pixels.
    Uncompressed(UncompressedFormat),
}

/// Layout of an uncompressed DDS payload and what it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UncompressedFormat {
    /// Decoded pixel layout.
    pub output: ImageFormat,
    /// Bytes per stored pixel.
    pub source_bytes: usize,
    /// Channel masks of the stored pixels. Used to reorder 24 and 32-bit data.
    pub masks: ChannelMasks,
    /// Stored channels are two's complement and get biased into unsigned range.
    pub signed: bool,
}

impl UncompressedFormat {
    const fn new(output: ImageFormat, masks: ChannelMasks) -> Self {
        Self {
            output,
            source_bytes: output.bytes_per_pixel(),
            masks,
            signed: false,
        }
    }

    const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Whether stored pixels are reordered into B, G, R(, A) rather than copied.
    #[inline]
    pub const fn reorders_channels(&self) -> bool {
        matches!(self.output, ImageFormat::Rgb24 | ImageFormat::Rgba32)
    }
}

const RGBA8888: ChannelMasks = ChannelMasks::new(
    RGBA8888_RED_MASK,
    RGBA8888_GREEN_MASK,
    RGBA8888_BLUE_MASK,
    RGBA8888_ALPHA_MASK,
);
const BGRA8888: ChannelMasks = ChannelMasks::new(
    BGRA8888_RED_MASK,
    BGRA8888_GREEN_MASK,
    BGRA8888_BLUE_MASK,
    BGRA8888_ALPHA_MASK,
);
const BGRX8888: ChannelMasks =
    ChannelMasks::new(BGRA8888_RED_MASK, BGRA8888_GREEN_MASK, BGRA8888_BLUE_MASK, 0);
const NO_MASKS: ChannelMasks = ChannelMasks::new(0, 0, 0, 0);

impl DdsFormat {
    /// Determines the format of the payload described by `header`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedFormat`] for FourCC, DXGI or bit count values without a
    ///   decoder, including the premultiplied `DXT2` and `DXT4`.
    /// - [`DecodeError::InvalidHeader`] for an uncompressed format with a bit count of zero.
    pub fn from_header(header: &DdsHeader) -> Result<Self, DecodeError> {
        match header.dx10 {
            Some(dx10) => from_dxgi(dx10.dxgi_format),
            None if header.pixel_format.flags & DDPF_FOURCC != 0
                || header.pixel_format.fourcc != 0 =>
            {
                from_fourcc(header.pixel_format.fourcc)
            }
            None => from_pixel_masks(&header.pixel_format),
        }
    }

    /// The layout pixels are decoded to.
    #[inline]
    pub const fn output_format(&self) -> ImageFormat {
        match self {
            DdsFormat::Compressed(block) => block.output_format(),
            DdsFormat::Uncompressed(format) => format.output,
        }
    }

    /// Edge length of the storage unit: 4 for blocks, 1 for pixels.
    #[inline]
    pub const fn block_size(&self) -> u32 {
        match self {
            DdsFormat::Compressed(_) => BLOCK_SIZE,
            DdsFormat::Uncompressed(_) => 1,
        }
    }

    /// Bytes per storage unit: block bytes, or bytes per stored pixel.
    #[inline]
    pub const fn block_bytes(&self) -> usize {
        match self {
            DdsFormat::Compressed(block) => block.block_bytes(),
            DdsFormat::Uncompressed(format) => format.source_bytes,
        }
    }
}

fn unsupported_fourcc(fourcc: u32) -> DecodeError {
    let text: String = fourcc
        .to_le_bytes()
        .iter()
        .map(|&b| match b.is_ascii_graphic() {
            true => b as char,
            false => '?',
        })
        .collect();
    DecodeError::UnsupportedFormat(format!("FourCC '{text}' ({fourcc:#010X})"))
}

fn from_fourcc(fourcc: u32) -> Result<DdsFormat, DecodeError> {
    let block = match fourcc {
        FOURCC_DXT1 => BlockFormat::Bc1,
        FOURCC_DXT3 => BlockFormat::Bc2,
        FOURCC_DXT5 => BlockFormat::Bc3,
        FOURCC_ATI1 | FOURCC_BC4U => BlockFormat::Bc4,
        FOURCC_BC4S => BlockFormat::Bc4Signed,
        FOURCC_ATI2 | FOURCC_BC5U => BlockFormat::Bc5,
        FOURCC_BC5S => BlockFormat::Bc5Signed,
        FOURCC_DXT2 | FOURCC_DXT4 => {
            return Err(DecodeError::UnsupportedFormat(
                "premultiplied alpha (DXT2/DXT4)".into(),
            ))
        }
        _ => return Err(unsupported_fourcc(fourcc)),
    };
    Ok(DdsFormat::Compressed(block))
}

fn from_dxgi(dxgi_format: u32) -> Result<DdsFormat, DecodeError> {
    use ImageFormat::*;

    let block = match dxgi_format {
        DXGI_FORMAT_BC1_TYPELESS | DXGI_FORMAT_BC1_UNORM | DXGI_FORMAT_BC1_UNORM_SRGB => {
            BlockFormat::Bc1
        }
        DXGI_FORMAT_BC2_TYPELESS | DXGI_FORMAT_BC2_UNORM | DXGI_FORMAT_BC2_UNORM_SRGB => {
            BlockFormat::Bc2
        }
        DXGI_FORMAT_BC3_TYPELESS | DXGI_FORMAT_BC3_UNORM | DXGI_FORMAT_BC3_UNORM_SRGB => {
            BlockFormat::Bc3
        }
        DXGI_FORMAT_BC4_TYPELESS | DXGI_FORMAT_BC4_UNORM => BlockFormat::Bc4,
        DXGI_FORMAT_BC4_SNORM => BlockFormat::Bc4Signed,
        DXGI_FORMAT_BC5_TYPELESS | DXGI_FORMAT_BC5_UNORM => BlockFormat::Bc5,
        DXGI_FORMAT_BC5_SNORM => BlockFormat::Bc5Signed,
        DXGI_FORMAT_BC6H_TYPELESS | DXGI_FORMAT_BC6H_UF16 => BlockFormat::Bc6h,
        DXGI_FORMAT_BC6H_SF16 => BlockFormat::Bc6hSigned,
        DXGI_FORMAT_BC7_TYPELESS | DXGI_FORMAT_BC7_UNORM | DXGI_FORMAT_BC7_UNORM_SRGB => {
            BlockFormat::Bc7
        }
        _ => {
            let format = match dxgi_format {
                DXGI_FORMAT_R8G8B8A8_TYPELESS
                | DXGI_FORMAT_R8G8B8A8_UNORM
                | DXGI_FORMAT_R8G8B8A8_UNORM_SRGB
                | DXGI_FORMAT_R8G8B8A8_UINT
                | DXGI_FORMAT_R8G8B8A8_SINT => UncompressedFormat::new(Rgba32, RGBA8888),
                DXGI_FORMAT_R8G8B8A8_SNORM => UncompressedFormat::new(Rgba32, RGBA8888).signed(),
                DXGI_FORMAT_B8G8R8A8_UNORM
                | DXGI_FORMAT_B8G8R8A8_TYPELESS
                | DXGI_FORMAT_B8G8R8A8_UNORM_SRGB => UncompressedFormat::new(Rgba32, BGRA8888),
                DXGI_FORMAT_B8G8R8X8_UNORM
                | DXGI_FORMAT_B8G8R8X8_TYPELESS
                | DXGI_FORMAT_B8G8R8X8_UNORM_SRGB => UncompressedFormat::new(Rgba32, BGRX8888),
                DXGI_FORMAT_B5G6R5_UNORM => UncompressedFormat::new(R5g6b5, NO_MASKS),
                DXGI_FORMAT_B5G5R5A1_UNORM => UncompressedFormat::new(R5g5b5a1, NO_MASKS),
                DXGI_FORMAT_B4G4R4A4_UNORM => UncompressedFormat::new(Rgba16, NO_MASKS),
                DXGI_FORMAT_R8_UNORM | DXGI_FORMAT_A8_UNORM => {
                    UncompressedFormat::new(Rgb8, NO_MASKS)
                }
                _ => {
                    return Err(DecodeError::UnsupportedFormat(format!(
                        "DXGI format {dxgi_format}"
                    )))
                }
            };
            return Ok(DdsFormat::Uncompressed(format));
        }
    };
    Ok(DdsFormat::Compressed(block))
}

fn from_pixel_masks(pixel_format: &DdsPixelFormat) -> Result<DdsFormat, DecodeError> {
    use ImageFormat::*;

    let masks = pixel_format.masks;
    let has_color_masks = masks.r != 0 || masks.g != 0 || masks.b != 0;
    let format = match pixel_format.rgb_bit_count {
        0 => return Err(InvalidHeaderReason::ZeroPixelDepth.into()),
        8 => UncompressedFormat::new(Rgb8, masks),
        16 => {
            let format = if masks.a == RGBA4444_ALPHA_MASK
                && masks.r == RGBA4444_RED_MASK
                && masks.g == RGBA4444_GREEN_MASK
                && masks.b == RGBA4444_BLUE_MASK
            {
                Rgba16
            } else if pixel_format.flags & DDPF_ALPHAPIXELS != 0 {
                R5g5b5a1
            } else if masks.g == RGB565_GREEN_MASK {
                R5g6b5
            } else {
                R5g5b5
            };
            UncompressedFormat::new(format, masks)
        }
        24 => match has_color_masks {
            true => UncompressedFormat::new(Rgb24, masks),
            false => UncompressedFormat::new(Rgb24, BGRX8888),
        },
        32 => match has_color_masks {
            true => UncompressedFormat::new(Rgba32, masks),
            false => UncompressedFormat::new(Rgba32, BGRA8888),
        },
        bits => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{bits} bits per pixel"
            )))
        }
    };
    Ok(DdsFormat::Uncompressed(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::parse_dds::parse_dds_header;
    use crate::test_prelude::*;

    fn format_of(builder: DdsBuilder) -> Result<DdsFormat, DecodeError> {
        DdsFormat::from_header(&parse_dds_header(&builder.build()).unwrap())
    }

    #[rstest]
    #[case(*b"DXT1", BlockFormat::Bc1)]
    #[case(*b"DXT3", BlockFormat::Bc2)]
    #[case(*b"DXT5", BlockFormat::Bc3)]
    #[case(*b"ATI1", BlockFormat::Bc4)]
    #[case(*b"BC4U", BlockFormat::Bc4)]
    #[case(*b"BC4S", BlockFormat::Bc4Signed)]
    #[case(*b"ATI2", BlockFormat::Bc5)]
    #[case(*b"BC5U", BlockFormat::Bc5)]
    #[case(*b"BC5S", BlockFormat::Bc5Signed)]
    fn fourcc_selects_block_format(#[case] fourcc: [u8; 4], #[case] expected: BlockFormat) {
        let format = format_of(DdsBuilder::fourcc(fourcc, 4, 4)).unwrap();
        assert_eq!(format, DdsFormat::Compressed(expected));
    }

    #[rstest]
    #[case(*b"DXT2")]
    #[case(*b"DXT4")]
    #[case(*b"UNKN")]
    fn unsupported_fourcc_is_rejected(#[case] fourcc: [u8; 4]) {
        assert!(matches!(
            format_of(DdsBuilder::fourcc(fourcc, 4, 4)),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn unknown_fourcc_is_named_in_error() {
        let error = format_of(DdsBuilder::fourcc(*b"UNKN", 4, 4)).unwrap_err();
        assert!(error.to_string().contains("'UNKN'"), "{error}");
    }

    #[rstest]
    #[case(DXGI_FORMAT_BC1_TYPELESS, BlockFormat::Bc1)]
    #[case(DXGI_FORMAT_BC1_UNORM, BlockFormat::Bc1)]
    #[case(DXGI_FORMAT_BC1_UNORM_SRGB, BlockFormat::Bc1)]
    #[case(DXGI_FORMAT_BC2_UNORM, BlockFormat::Bc2)]
    #[case(DXGI_FORMAT_BC3_UNORM_SRGB, BlockFormat::Bc3)]
    #[case(DXGI_FORMAT_BC4_UNORM, BlockFormat::Bc4)]
    #[case(DXGI_FORMAT_BC4_SNORM, BlockFormat::Bc4Signed)]
    #[case(DXGI_FORMAT_BC5_TYPELESS, BlockFormat::Bc5)]
    #[case(DXGI_FORMAT_BC5_SNORM, BlockFormat::Bc5Signed)]
    #[case(DXGI_FORMAT_BC6H_UF16, BlockFormat::Bc6h)]
    #[case(DXGI_FORMAT_BC6H_SF16, BlockFormat::Bc6hSigned)]
    #[case(DXGI_FORMAT_BC7_UNORM, BlockFormat::Bc7)]
    fn dxgi_selects_block_format(#[case] dxgi_format: u32, #[case] expected: BlockFormat) {
        let format = format_of(DdsBuilder::dx10(dxgi_format, 4, 4)).unwrap();
        assert_eq!(format, DdsFormat::Compressed(expected));
    }

    #[rstest]
    #[case(DXGI_FORMAT_R8G8B8A8_UNORM, ImageFormat::Rgba32, false)]
    #[case(DXGI_FORMAT_R8G8B8A8_SNORM, ImageFormat::Rgba32, true)]
    #[case(DXGI_FORMAT_B8G8R8A8_UNORM_SRGB, ImageFormat::Rgba32, false)]
    #[case(DXGI_FORMAT_B8G8R8X8_UNORM, ImageFormat::Rgba32, false)]
    #[case(DXGI_FORMAT_B5G6R5_UNORM, ImageFormat::R5g6b5, false)]
    #[case(DXGI_FORMAT_B5G5R5A1_UNORM, ImageFormat::R5g5b5a1, false)]
    #[case(DXGI_FORMAT_B4G4R4A4_UNORM, ImageFormat::Rgba16, false)]
    #[case(DXGI_FORMAT_R8_UNORM, ImageFormat::Rgb8, false)]
    #[case(DXGI_FORMAT_A8_UNORM, ImageFormat::Rgb8, false)]
    fn dxgi_selects_uncompressed_format(
        #[case] dxgi_format: u32,
        #[case] expected: ImageFormat,
        #[case] signed: bool,
    ) {
        match format_of(DdsBuilder::dx10(dxgi_format, 4, 4)).unwrap() {
            DdsFormat::Uncompressed(format) => {
                assert_eq!(format.output, expected);
                assert_eq!(format.signed, signed);
                assert_eq!(format.source_bytes, expected.bytes_per_pixel());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_dxgi_is_rejected() {
        assert!(matches!(
            format_of(DdsBuilder::dx10(2, 4, 4)),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[rstest]
    #[case(8, ChannelMasks::new(0xFF, 0, 0, 0), false, ImageFormat::Rgb8)]
    #[case(16, ChannelMasks::new(0xF00, 0xF0, 0xF, 0xF000), true, ImageFormat::Rgba16)]
    #[case(16, ChannelMasks::new(0x7C00, 0x3E0, 0x1F, 0x8000), true, ImageFormat::R5g5b5a1)]
    #[case(16, ChannelMasks::new(0xF800, 0x7E0, 0x1F, 0), false, ImageFormat::R5g6b5)]
    #[case(16, ChannelMasks::new(0x7C00, 0x3E0, 0x1F, 0), false, ImageFormat::R5g5b5)]
    #[case(24, ChannelMasks::new(0xFF0000, 0xFF00, 0xFF, 0), false, ImageFormat::Rgb24)]
    #[case(32, RGBA8888, true, ImageFormat::Rgba32)]
    fn legacy_masks_select_uncompressed_format(
        #[case] bits: u32,
        #[case] masks: ChannelMasks,
        #[case] alpha_pixels: bool,
        #[case] expected: ImageFormat,
    ) {
        let builder = DdsBuilder::uncompressed(bits, masks, alpha_pixels, 4, 4);
        match format_of(builder).unwrap() {
            DdsFormat::Uncompressed(format) => {
                assert_eq!(format.output, expected);
                assert_eq!(format.masks, masks);
                assert!(!format.signed);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn legacy_32_bit_without_masks_defaults_to_bgra() {
        let builder = DdsBuilder::uncompressed(32, NO_MASKS, false, 4, 4);
        match format_of(builder).unwrap() {
            DdsFormat::Uncompressed(format) => assert_eq!(format.masks, BGRA8888),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    #[case(0, true)]
    #[case(12, false)]
    #[case(64, false)]
    fn legacy_bit_count_must_be_known(#[case] bits: u32, #[case] invalid_header: bool) {
        let result = format_of(DdsBuilder::uncompressed(bits, RGBA8888, false, 4, 4));
        match invalid_header {
            true => assert!(matches!(
                result,
                Err(DecodeError::InvalidHeader(InvalidHeaderReason::ZeroPixelDepth))
            )),
            false => assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_)))),
        }
    }

    #[test]
    fn storage_units() {
        let bc3 = DdsFormat::Compressed(BlockFormat::Bc3);
        assert_eq!((bc3.block_size(), bc3.block_bytes()), (4, 16));
        assert_eq!(bc3.output_format(), ImageFormat::Rgba32);

        let bgr = DdsFormat::Uncompressed(UncompressedFormat::new(ImageFormat::Rgb24, BGRX8888));
        assert_eq!((bgr.block_size(), bgr.block_bytes()), (1, 3));
        assert_eq!(bgr.output_format(), ImageFormat::Rgb24);
    }
}
