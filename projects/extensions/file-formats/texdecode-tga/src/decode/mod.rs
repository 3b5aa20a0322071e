//! Decoding of TGA pixel data into a [`Surface`].

mod raw;
pub mod run_length;

use crate::tga::{read_colormap, read_tga_header, Orientation, TgaHeader};
use raw::decode_raw;
use run_length::RunLengthDecoder;
use std::sync::Arc;
use texdecode_common::{
    allocate::RentedBuffer,
    config::Config,
    error::{ensure_data, DecodeError, InvalidHeaderReason},
    normalize::{expand_palette, flip_rows, stride},
    rows::decode_rows,
    stream::StreamSource,
    surface::Surface,
};
use tracing::debug;

/// A decoded TGA file.
#[derive(Debug)]
pub struct TgaImage {
    /// The parsed header.
    pub header: TgaHeader,
    /// Colormap lookup table, indexed by palette index. Cleared once applied.
    pub colormap: Option<Vec<u8>>,
    /// The decoded pixels.
    pub surface: Surface,
}

impl TgaImage {
    /// Replaces palette indices with their colormap entries.
    ///
    /// The surface takes the colormap depth as its format and is re-strided to match. Images
    /// that are not color-mapped, or whose palette was already applied, are left alone.
    pub fn apply_palette(&mut self) -> Result<(), DecodeError> {
        if !self.header.image_type.is_color_mapped() {
            return Ok(());
        }
        let (Some(map), Some(table)) = (self.header.color_map, self.colormap.as_deref()) else {
            return Ok(());
        };

        let format = map.output_format();
        let width = self.surface.width as usize;
        let stride = stride(self.surface.width, format.bits_per_pixel());
        let allocator = Arc::clone(self.surface.data.allocator());
        let mut data = RentedBuffer::rent(&allocator, stride * self.surface.height as usize)?;

        let rows = self.surface.data.chunks_exact(self.surface.stride);
        for (indices, out) in rows.zip(data.chunks_exact_mut(stride)) {
            expand_palette(&indices[..width], table, map.entry_bytes(), out);
        }

        debug!(?format, stride, "applied TGA colormap");
        self.colormap = None;
        self.surface = Surface {
            data,
            width: self.surface.width,
            height: self.surface.height,
            stride,
            bits_per_pixel: format.bits_per_pixel(),
            format,
            compressed: false,
            mip_maps: Vec::new(),
        };
        Ok(())
    }
}

/// Decodes a TGA file from `source`, header included.
///
/// # Errors
///
/// - Header errors from [`read_tga_header`].
/// - [`DecodeError::UnsupportedOrientation`] for bottom-right and top-right images.
/// - [`DecodeError::TruncatedData`] if the colormap or pixel data is cut short.
///
/// Raw images in direct mode are checked for a complete payload before the output is rented.
/// Everything else is decoded in storage order into an output that grows one row at a time,
/// then flipped if the image is bottom-up.
pub fn decode_tga<S: StreamSource + ?Sized>(
    source: &mut S,
    config: &Config,
) -> Result<TgaImage, DecodeError> {
    let header = read_tga_header(source)?;
    let bottom_up = match header.orientation {
        Orientation::BottomLeft => true,
        Orientation::TopLeft => false,
        other => return Err(DecodeError::UnsupportedOrientation(other.name())),
    };
    let colormap = read_colormap(source, &header)?;

    let format = header.output_format();
    let height = header.height as usize;
    let row_bytes = header.width as usize * header.bytes_per_pixel();
    let stride = stride(header.width as u32, format.bits_per_pixel());
    let len = stride
        .checked_mul(height)
        .ok_or(InvalidHeaderReason::DimensionsTooLarge {
            width: header.width as u32,
            height: header.height as u32,
        })?;

    let run_length = header.image_type.is_run_length();
    debug!(?format, stride, run_length, "decoding TGA");
    let available = source.remaining_contiguous().map(<[u8]>::len);
    let data = match (run_length, available) {
        (false, Some(available)) => {
            let pixels_len = row_bytes * height;
            ensure_data(pixels_len, available)?;
            let mut data = RentedBuffer::rent(&config.allocator, len)?;
            decode_raw(source.require(pixels_len)?, &mut data, row_bytes, stride, bottom_up);
            source.consume(pixels_len);
            data
        }
        _ => {
            let mut data = RentedBuffer::rent(&config.allocator, 0)?;
            let mut decoder = run_length.then(|| RunLengthDecoder::new(header.bytes_per_pixel()));
            decode_rows(&mut data, 0, height, stride, len, |row| match &mut decoder {
                Some(decoder) => decoder.decode_row(source, &mut row[..row_bytes]),
                None => source.read_exact_into(&mut row[..row_bytes]),
            })?;
            if bottom_up {
                flip_rows(&mut data, stride);
            }
            data
        }
    };

    Ok(TgaImage {
        header,
        colormap,
        surface: Surface {
            data,
            width: header.width as u32,
            height: header.height as u32,
            stride,
            bits_per_pixel: format.bits_per_pixel(),
            format,
            compressed: false,
            mip_maps: Vec::new(),
        },
    })
}
