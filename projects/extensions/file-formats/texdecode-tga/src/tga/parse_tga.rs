use super::constants::*;
use likely_stable::unlikely;
use texdecode_common::{
    error::{ensure_header, DecodeError, InvalidHeaderReason},
    image_format::ImageFormat,
    stream::StreamSource,
};
use tracing::debug;

/// What a TGA file stores, from the image type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    /// Uncompressed palette indices.
    ColorMapped = 1,
    /// Uncompressed true-color pixels.
    TrueColor = 2,
    /// Uncompressed grayscale pixels.
    Grayscale = 3,
    /// Run-length encoded palette indices.
    RunLengthColorMapped = 9,
    /// Run-length encoded true-color pixels.
    RunLengthTrueColor = 10,
    /// Run-length encoded grayscale pixels.
    RunLengthGrayscale = 11,
}

impl ImageType {
    /// Returns `true` if pixel data is made of run-length packets.
    #[inline]
    pub const fn is_run_length(self) -> bool {
        matches!(
            self,
            ImageType::RunLengthColorMapped
                | ImageType::RunLengthTrueColor
                | ImageType::RunLengthGrayscale
        )
    }

    /// Returns `true` if pixels are palette indices.
    #[inline]
    pub const fn is_color_mapped(self) -> bool {
        matches!(
            self,
            ImageType::ColorMapped | ImageType::RunLengthColorMapped
        )
    }
}

impl TryFrom<u8> for ImageType {
    type Error = InvalidHeaderReason;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => ImageType::ColorMapped,
            2 => ImageType::TrueColor,
            3 => ImageType::Grayscale,
            9 => ImageType::RunLengthColorMapped,
            10 => ImageType::RunLengthTrueColor,
            11 => ImageType::RunLengthGrayscale,
            _ => return Err(InvalidHeaderReason::UnknownImageType(value)),
        })
    }
}

/// Screen corner the first stored pixel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rows run bottom to top, pixels left to right. The TGA default.
    BottomLeft = 0,
    /// Rows run bottom to top, pixels right to left.
    BottomRight = 1,
    /// Rows run top to bottom, pixels left to right.
    TopLeft = 2,
    /// Rows run top to bottom, pixels right to left.
    TopRight = 3,
}

impl Orientation {
    /// Extracts the orientation from bits 4 and 5 of the image descriptor.
    #[inline]
    pub const fn from_descriptor(descriptor: u8) -> Self {
        match (descriptor >> ORIENTATION_SHIFT) & ORIENTATION_MASK {
            0 => Orientation::BottomLeft,
            1 => Orientation::BottomRight,
            2 => Orientation::TopLeft,
            _ => Orientation::TopRight,
        }
    }

    /// Lowercase name, as carried by [`DecodeError::UnsupportedOrientation`].
    pub const fn name(self) -> &'static str {
        match self {
            Orientation::BottomLeft => "bottom-left",
            Orientation::BottomRight => "bottom-right",
            Orientation::TopLeft => "top-left",
            Orientation::TopRight => "top-right",
        }
    }
}

/// The colormap fields of a TGA header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMapSpec {
    /// Palette index of the first stored entry.
    pub origin: u16,
    /// Number of stored entries.
    pub length: u16,
    /// Bits per entry: 15, 16, 24 or 32.
    pub depth: u8,
}

impl ColorMapSpec {
    /// Bytes per entry.
    #[inline]
    pub const fn entry_bytes(&self) -> usize {
        (self.depth as usize).div_ceil(8)
    }

    /// Bytes the stored entries occupy in the file.
    #[inline]
    pub const fn stored_len(&self) -> usize {
        self.length as usize * self.entry_bytes()
    }

    /// Format of a pixel once looked up in this colormap.
    pub const fn output_format(&self) -> ImageFormat {
        match self.depth {
            15 | 16 => ImageFormat::R5g5b5,
            24 => ImageFormat::Rgb24,
            _ => ImageFormat::Rgba32,
        }
    }
}

/// A parsed TGA header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TgaHeader {
    /// Length of the image ID field that follows the header.
    pub id_length: u8,
    /// How the pixel data is stored.
    pub image_type: ImageType,
    /// Present when the color map type byte is `1`.
    pub color_map: Option<ColorMapSpec>,
    /// Horizontal screen position of the image. Informational only.
    pub x_origin: u16,
    /// Vertical screen position of the image. Informational only.
    pub y_origin: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Bits per stored pixel, alpha included.
    pub pixel_depth: u8,
    /// Scan direction, from bits 4 and 5 of the image descriptor.
    pub orientation: Orientation,
}

impl TgaHeader {
    /// Bytes per stored pixel.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.pixel_depth as usize).div_ceil(8)
    }

    /// Layout of the decoded pixels, before any palette is applied.
    pub const fn output_format(&self) -> ImageFormat {
        match self.pixel_depth {
            8 => ImageFormat::Rgb8,
            15 | 16 => ImageFormat::R5g5b5,
            24 => ImageFormat::Rgb24,
            _ => ImageFormat::Rgba32,
        }
    }
}

#[inline]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Parses the fixed 18-byte TGA header at the start of `data`.
///
/// # Errors
///
/// - [`DecodeError::TruncatedHeader`] if `data` is shorter than 18 bytes.
/// - [`DecodeError::InvalidHeader`] for an unknown image type, a colormap origin past its
///   length, a zero dimension or a zero pixel depth.
/// - [`DecodeError::UnsupportedFormat`] for pixel or colormap depths without a decoder.
pub fn parse_tga_header(data: &[u8]) -> Result<TgaHeader, DecodeError> {
    ensure_header(TGA_HEADER_SIZE, data.len())?;
    let image_type = ImageType::try_from(data[IMAGE_TYPE_OFFSET])?;

    let color_map = match data[COLOR_MAP_TYPE_OFFSET] {
        COLOR_MAP_PRESENT => Some(ColorMapSpec {
            origin: read_u16(data, COLOR_MAP_ORIGIN_OFFSET),
            length: read_u16(data, COLOR_MAP_LENGTH_OFFSET),
            depth: data[COLOR_MAP_DEPTH_OFFSET],
        }),
        _ => None,
    };
    if let Some(map) = color_map {
        if unlikely(map.origin > map.length) {
            return Err(InvalidHeaderReason::PaletteOriginOutOfRange {
                origin: map.origin,
                length: map.length,
            }
            .into());
        }
    }

    let header = TgaHeader {
        id_length: data[ID_LENGTH_OFFSET],
        image_type,
        color_map,
        x_origin: read_u16(data, X_ORIGIN_OFFSET),
        y_origin: read_u16(data, Y_ORIGIN_OFFSET),
        width: read_u16(data, WIDTH_OFFSET),
        height: read_u16(data, HEIGHT_OFFSET),
        pixel_depth: data[PIXEL_DEPTH_OFFSET],
        orientation: Orientation::from_descriptor(data[DESCRIPTOR_OFFSET]),
    };

    if unlikely(header.width == 0 || header.height == 0) {
        return Err(InvalidHeaderReason::ZeroDimension {
            width: header.width as u32,
            height: header.height as u32,
        }
        .into());
    }
    validate_depths(&header)?;
    Ok(header)
}

fn validate_depths(header: &TgaHeader) -> Result<(), DecodeError> {
    match header.pixel_depth {
        0 => return Err(InvalidHeaderReason::ZeroPixelDepth.into()),
        8 => {}
        15 | 16 | 24 | 32 if !header.image_type.is_color_mapped() => {}
        depth => {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{depth}-bit {:?} TGA pixels",
                header.image_type
            )))
        }
    }

    match header.color_map {
        Some(ColorMapSpec { depth, .. }) if !matches!(depth, 15 | 16 | 24 | 32) => Err(
            DecodeError::UnsupportedFormat(format!("{depth}-bit TGA colormap entries")),
        ),
        _ => Ok(()),
    }
}

/// Reads a TGA header from `source` and skips the image ID after it.
///
/// The source is left at the colormap, or at the pixel data if there is none.
///
/// # Errors
///
/// As [`parse_tga_header`], plus [`DecodeError::TruncatedData`] if the image ID is cut short.
pub fn read_tga_header<S: StreamSource + ?Sized>(source: &mut S) -> Result<TgaHeader, DecodeError> {
    let window = source.fill(TGA_HEADER_SIZE)?;
    let header = parse_tga_header(window)?;
    source.consume(TGA_HEADER_SIZE);
    source.skip(header.id_length as usize)?;

    debug!(
        width = header.width,
        height = header.height,
        pixel_depth = header.pixel_depth,
        image_type = ?header.image_type,
        orientation = header.orientation.name(),
        color_map = ?header.color_map,
        "parsed TGA header"
    );
    Ok(header)
}

/// Reads the colormap announced by `header` into a lookup table indexed by palette index.
///
/// Stored entries start at index `origin`; entries below it are zero.
///
/// # Returns
///
/// [`None`] if the header declares no colormap.
pub fn read_colormap<S: StreamSource + ?Sized>(
    source: &mut S,
    header: &TgaHeader,
) -> Result<Option<Vec<u8>>, DecodeError> {
    let Some(map) = header.color_map else {
        return Ok(None);
    };

    let skipped = map.origin as usize * map.entry_bytes();
    let mut table = vec![0u8; skipped + map.stored_len()];
    source.read_exact_into(&mut table[skipped..])?;
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use texdecode_common::stream::SliceSource;

    #[test]
    fn parses_header_fields() {
        let data = TgaBuilder::new(2, 640, 480, 24).origin(3, 7).build();
        let header = parse_tga_header(&data).unwrap();

        assert_eq!(header.image_type, ImageType::TrueColor);
        assert_eq!((header.width, header.height), (640, 480));
        assert_eq!((header.x_origin, header.y_origin), (3, 7));
        assert_eq!(header.pixel_depth, 24);
        assert_eq!(header.color_map, None);
        assert_eq!(header.orientation, Orientation::BottomLeft);
        assert_eq!(header.output_format(), ImageFormat::Rgb24);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(TGA_HEADER_SIZE - 1)]
    fn short_header_is_truncated(#[case] len: usize) {
        let data = TgaBuilder::new(2, 4, 4, 32).build();
        match parse_tga_header(&data[..len]) {
            Err(DecodeError::TruncatedHeader { required, actual }) => {
                assert_eq!((required, actual), (TGA_HEADER_SIZE, len));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(8)]
    #[case(12)]
    #[case(0xFF)]
    fn unknown_image_type_is_invalid(#[case] image_type: u8) {
        let data = TgaBuilder::new(image_type, 4, 4, 24).build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::InvalidHeader(InvalidHeaderReason::UnknownImageType(t))) if t == image_type
        ));
    }

    #[rstest]
    #[case(1, false, true)]
    #[case(2, false, false)]
    #[case(3, false, false)]
    #[case(9, true, true)]
    #[case(10, true, false)]
    #[case(11, true, false)]
    fn image_type_flags(#[case] value: u8, #[case] run_length: bool, #[case] color_mapped: bool) {
        let image_type = ImageType::try_from(value).unwrap();
        assert_eq!(image_type as u8, value);
        assert_eq!(image_type.is_run_length(), run_length);
        assert_eq!(image_type.is_color_mapped(), color_mapped);
    }

    #[rstest]
    #[case(0x00, Orientation::BottomLeft)]
    #[case(0x10, Orientation::BottomRight)]
    #[case(0x20, Orientation::TopLeft)]
    #[case(0x30, Orientation::TopRight)]
    #[case(0x28, Orientation::TopLeft)] // alpha bits are ignored
    #[case(0xC0, Orientation::BottomLeft)] // so is interleaving
    fn orientation_comes_from_descriptor_bits(
        #[case] descriptor: u8,
        #[case] expected: Orientation,
    ) {
        let data = TgaBuilder::new(2, 4, 4, 24).descriptor(descriptor).build();
        assert_eq!(parse_tga_header(&data).unwrap().orientation, expected);
    }

    #[test]
    fn palette_origin_past_length_is_invalid() {
        let data = TgaBuilder::new(1, 4, 4, 8)
            .colormap(5, 24, vec![0; 4 * 3])
            .build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::InvalidHeader(
                InvalidHeaderReason::PaletteOriginOutOfRange {
                    origin: 5,
                    length: 4
                }
            ))
        ));
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 0)]
    fn zero_dimension_is_invalid(#[case] width: u16, #[case] height: u16) {
        let data = TgaBuilder::new(2, width, height, 24).build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::InvalidHeader(InvalidHeaderReason::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn zero_pixel_depth_is_invalid() {
        let data = TgaBuilder::new(2, 4, 4, 0).build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::InvalidHeader(InvalidHeaderReason::ZeroPixelDepth))
        ));
    }

    #[rstest]
    #[case(2, 12)]
    #[case(2, 48)]
    #[case(1, 16)]
    #[case(9, 24)]
    fn unsupported_pixel_depth_is_rejected(#[case] image_type: u8, #[case] depth: u8) {
        let data = TgaBuilder::new(image_type, 4, 4, depth).build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn unsupported_colormap_depth_is_rejected() {
        let data = TgaBuilder::new(1, 4, 4, 8)
            .colormap(0, 8, vec![0; 4])
            .build();
        assert!(matches!(
            parse_tga_header(&data),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[rstest]
    #[case(8, ImageFormat::Rgb8)]
    #[case(15, ImageFormat::R5g5b5)]
    #[case(16, ImageFormat::R5g5b5)]
    #[case(24, ImageFormat::Rgb24)]
    #[case(32, ImageFormat::Rgba32)]
    fn pixel_depth_selects_format(#[case] depth: u8, #[case] expected: ImageFormat) {
        let header = parse_tga_header(&TgaBuilder::new(2, 4, 4, depth).build()).unwrap();
        assert_eq!(header.output_format(), expected);
        assert_eq!(header.bytes_per_pixel(), expected.bytes_per_pixel());
    }

    #[test]
    fn read_skips_image_id() {
        let data = TgaBuilder::new(3, 2, 1, 8)
            .image_id(b"hello")
            .payload(vec![0xAA, 0xBB])
            .build();
        let mut source = SliceSource::new(&data);
        let header = read_tga_header(&mut source).unwrap();

        assert_eq!(header.id_length, 5);
        assert_eq!(source.remaining(), &[0xAA, 0xBB]);
    }

    #[test]
    fn truncated_image_id_is_truncated_data() {
        let data = TgaBuilder::new(3, 2, 1, 8).image_id(b"hello").build();
        let mut source = SliceSource::new(&data[..TGA_HEADER_SIZE + 2]);
        assert!(matches!(
            read_tga_header(&mut source),
            Err(DecodeError::TruncatedData { .. })
        ));
    }

    #[test]
    fn colormap_entries_start_at_origin() {
        let entries = vec![1, 2, 3, 4, 5, 6];
        let data = TgaBuilder::new(1, 2, 1, 8)
            .colormap(1, 24, entries.clone())
            .payload(vec![1, 2])
            .build();
        let mut source = SliceSource::new(&data);
        let header = read_tga_header(&mut source).unwrap();
        let table = read_colormap(&mut source, &header).unwrap().unwrap();

        assert_eq!(header.color_map.unwrap().entry_bytes(), 3);
        assert_eq!(&table[..3], &[0, 0, 0]);
        assert_eq!(&table[3..], entries.as_slice());
        assert_eq!(source.remaining(), &[1, 2]);
    }

    #[test]
    fn no_colormap_reads_nothing() {
        let data = TgaBuilder::new(2, 1, 1, 24).payload(vec![9, 9, 9]).build();
        let mut source = SliceSource::new(&data);
        let header = read_tga_header(&mut source).unwrap();
        assert_eq!(read_colormap(&mut source, &header).unwrap(), None);
        assert_eq!(source.remaining().len(), 3);
    }
}
