use super::constants::*;
use super::likely_dds;
use endian_writer::{EndianReader, LittleEndianReader};
use likely_stable::unlikely;
use texdecode_common::{
    error::{ensure_header, DecodeError, InvalidHeaderReason},
    normalize::ChannelMasks,
    stream::StreamSource,
};

/// The `DDS_PIXELFORMAT` block of a DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DdsPixelFormat {
    /// `DDPF_*` flags.
    pub flags: u32,
    /// FourCC code, `0` for uncompressed data.
    pub fourcc: u32,
    /// Bits per pixel of uncompressed data.
    pub rgb_bit_count: u32,
    /// Channel bit masks of uncompressed data.
    pub masks: ChannelMasks,
}

/// The `DDS_HEADER_DXT10` extension, present when the FourCC is `DX10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dx10Header {
    /// `DXGI_FORMAT` of the resource.
    pub dxgi_format: u32,
    /// `D3D10_RESOURCE_DIMENSION` of the resource.
    pub resource_dimension: u32,
    /// Number of textures in the array. Only the first is decoded.
    pub array_size: u32,
}

/// A parsed DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DdsHeader {
    /// `DDSD_*` flags.
    pub flags: u32,
    /// Width of the base level in pixels.
    pub width: u32,
    /// Height of the base level in pixels.
    pub height: u32,
    /// Raw mip map count. Only meaningful when [`DdsHeader::declared_mip_count`] is [`Some`].
    pub mip_map_count: u32,
    /// The pixel format block.
    pub pixel_format: DdsPixelFormat,
    /// The DX10 extension, if present.
    pub dx10: Option<Dx10Header>,
}

impl DdsHeader {
    /// Bytes occupied by the header, including the magic and the DX10 extension.
    #[inline]
    pub fn header_len(&self) -> usize {
        match self.dx10 {
            Some(_) => DDS_HEADER_SIZE + DX10_HEADER_SIZE,
            None => DDS_HEADER_SIZE,
        }
    }

    /// Mip count stated by the header, if the `DDSD_MIPMAPCOUNT` flag is set.
    #[inline]
    pub fn declared_mip_count(&self) -> Option<u32> {
        match self.flags & DDSD_MIPMAPCOUNT {
            0 => None,
            _ => Some(self.mip_map_count.max(1)),
        }
    }
}

/// Bytes needed to parse the header starting at `data`: 128, or 148 if the FourCC is `DX10`.
///
/// `data` must hold at least 128 bytes.
#[inline]
fn required_header_len(data: &[u8]) -> usize {
    // SAFETY: Caller guarantees data.len() >= DDS_HEADER_SIZE (128), so FOURCC_OFFSET (0x54) + 4 is in bounds
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let fourcc = unsafe { reader.read_u32_at(FOURCC_OFFSET as isize) };
    match fourcc {
        FOURCC_DX10 => DDS_HEADER_SIZE + DX10_HEADER_SIZE,
        _ => DDS_HEADER_SIZE,
    }
}

/// Parses a DDS header from the start of `data`.
///
/// # Errors
///
/// - [`DecodeError::TruncatedHeader`] if `data` is shorter than the header (148 bytes when a
///   DX10 extension is announced, else 128).
/// - [`DecodeError::InvalidHeader`] if the magic is wrong or a dimension is zero.
pub fn parse_dds_header(data: &[u8]) -> Result<DdsHeader, DecodeError> {
    ensure_header(DDS_HEADER_SIZE, data.len())?;
    if unlikely(!likely_dds(data)) {
        let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        return Err(InvalidHeaderReason::BadMagic(magic).into());
    }
    ensure_header(required_header_len(data), data.len())?;

    // SAFETY: We checked data.len() >= DDS_HEADER_SIZE (128); every offset read below is at most 0x68 + 4
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let (flags, height, width, mip_map_count) = unsafe {
        (
            reader.read_u32_at(DDS_FLAGS_OFFSET as isize),
            reader.read_u32_at(DDS_HEIGHT_OFFSET as isize),
            reader.read_u32_at(DDS_WIDTH_OFFSET as isize),
            reader.read_u32_at(DDS_MIPMAP_COUNT_OFFSET as isize),
        )
    };
    let pixel_format = unsafe {
        DdsPixelFormat {
            flags: reader.read_u32_at(DDS_PIXELFORMAT_FLAGS_OFFSET as isize),
            fourcc: reader.read_u32_at(FOURCC_OFFSET as isize),
            rgb_bit_count: reader.read_u32_at(DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET as isize),
            masks: ChannelMasks::new(
                reader.read_u32_at(DDS_PIXELFORMAT_RBITMASK_OFFSET as isize),
                reader.read_u32_at(DDS_PIXELFORMAT_GBITMASK_OFFSET as isize),
                reader.read_u32_at(DDS_PIXELFORMAT_BBITMASK_OFFSET as isize),
                reader.read_u32_at(DDS_PIXELFORMAT_ABITMASK_OFFSET as isize),
            ),
        }
    };

    let dx10 = match pixel_format.fourcc {
        // SAFETY: required_header_len made us check data.len() >= 148, so offsets up to 0x8C + 4 are in bounds
        FOURCC_DX10 => Some(unsafe {
            Dx10Header {
                dxgi_format: reader.read_u32_at(DX10_FORMAT_OFFSET as isize),
                resource_dimension: reader.read_u32_at(DX10_RESOURCE_DIMENSION_OFFSET as isize),
                array_size: reader.read_u32_at(DX10_ARRAY_SIZE_OFFSET as isize),
            }
        }),
        _ => None,
    };

    if unlikely(width == 0 || height == 0) {
        return Err(InvalidHeaderReason::ZeroDimension { width, height }.into());
    }

    Ok(DdsHeader {
        flags,
        width,
        height,
        mip_map_count,
        pixel_format,
        dx10,
    })
}

/// Reads and consumes a DDS header from `source`.
///
/// # Errors
///
/// As [`parse_dds_header`], plus any error raised by the source itself.
pub fn read_dds_header<S: StreamSource + ?Sized>(source: &mut S) -> Result<DdsHeader, DecodeError> {
    let window = source.fill(DDS_HEADER_SIZE + DX10_HEADER_SIZE)?;
    let header = parse_dds_header(window)?;
    source.consume(header.header_len());
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use endian_writer::{EndianWriter, LittleEndianWriter};
    use texdecode_common::stream::SliceSource;

    #[test]
    fn parses_legacy_header_fields() {
        let data = DdsBuilder::fourcc(*b"DXT1", 64, 32).mip_maps(7).build();
        let header = parse_dds_header(&data).unwrap();

        assert_eq!((header.width, header.height), (64, 32));
        assert_eq!(header.pixel_format.fourcc, FOURCC_DXT1);
        assert_eq!(header.declared_mip_count(), Some(7));
        assert_eq!(header.dx10, None);
        assert_eq!(header.header_len(), DDS_HEADER_SIZE);
    }

    #[test]
    fn parses_dx10_extension() {
        let data = DdsBuilder::dx10(DXGI_FORMAT_BC7_UNORM, 4, 4).build();
        let header = parse_dds_header(&data).unwrap();

        let dx10 = header.dx10.unwrap();
        assert_eq!(dx10.dxgi_format, DXGI_FORMAT_BC7_UNORM);
        assert_eq!(dx10.resource_dimension, 3);
        assert_eq!(dx10.array_size, 1);
        assert_eq!(header.header_len(), DDS_DX10_TOTAL_HEADER_SIZE);
    }

    #[test]
    fn mip_count_without_flag_is_not_declared() {
        let mut data = DdsBuilder::fourcc(*b"DXT1", 64, 64).build();
        let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };
        unsafe { writer.write_u32_at(5, DDS_MIPMAP_COUNT_OFFSET as isize) };

        let header = parse_dds_header(&data).unwrap();
        assert_eq!(header.mip_map_count, 5);
        assert_eq!(header.declared_mip_count(), None);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(DDS_HEADER_SIZE - 1)]
    fn short_legacy_header_is_truncated(#[case] len: usize) {
        let data = DdsBuilder::fourcc(*b"DXT1", 4, 4).build();
        match parse_dds_header(&data[..len]) {
            Err(DecodeError::TruncatedHeader { required, actual }) => {
                assert_eq!((required, actual), (DDS_HEADER_SIZE, len));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_dx10_header_is_truncated() {
        let data = DdsBuilder::dx10(DXGI_FORMAT_BC7_UNORM, 4, 4).build();
        match parse_dds_header(&data[..DDS_DX10_TOTAL_HEADER_SIZE - 1]) {
            Err(DecodeError::TruncatedHeader { required, .. }) => {
                assert_eq!(required, DDS_DX10_TOTAL_HEADER_SIZE);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_magic_is_invalid() {
        let mut data = DdsBuilder::fourcc(*b"DXT1", 4, 4).build();
        data[..4].copy_from_slice(b"XDDS");
        assert!(matches!(
            parse_dds_header(&data),
            Err(DecodeError::InvalidHeader(InvalidHeaderReason::BadMagic(_)))
        ));
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 0)]
    fn zero_dimension_is_invalid(#[case] width: u32, #[case] height: u32) {
        let data = DdsBuilder::fourcc(*b"DXT1", width, height).build();
        assert!(matches!(
            parse_dds_header(&data),
            Err(DecodeError::InvalidHeader(InvalidHeaderReason::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn handles_unaligned_reads() {
        let valid = DdsBuilder::fourcc(*b"DXT1", 64, 64).build();
        let mut misaligned = vec![0u8; valid.len() + 1];
        misaligned[1..].copy_from_slice(&valid);

        let header = parse_dds_header(&misaligned[1..]).unwrap();
        assert_eq!(header.width, 64);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn read_consumes_exactly_the_header(#[case] dx10: bool) {
        let builder = match dx10 {
            true => DdsBuilder::dx10(DXGI_FORMAT_BC1_UNORM, 4, 4),
            false => DdsBuilder::fourcc(*b"DXT1", 4, 4),
        };
        let data = builder.payload(vec![0xAB; 8]).build();

        let mut source = SliceSource::new(&data);
        let header = read_dds_header(&mut source).unwrap();
        assert_eq!(source.position(), header.header_len());
        assert_eq!(source.remaining(), &[0xAB; 8]);
    }
}
