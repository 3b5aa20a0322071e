//! Uncompressed DDS pixels.
//!
//! Stored rows are tightly packed. 24 and 32-bit pixels are reordered into B, G, R(, A)
//! according to the header's channel masks; 8 and 16-bit pixels are copied as they are.
//! Signed formats are biased into unsigned range after reordering.

use crate::dds::UncompressedFormat;
use texdecode_common::{
    error::DecodeError,
    normalize::{apply_signed_bias, reorder_channels},
    stream::StreamSource,
};

/// Bytes in one stored row of `width` pixels.
#[inline]
pub(crate) fn source_row_bytes(format: &UncompressedFormat, width: u32) -> usize {
    width as usize * format.source_bytes
}

/// Converts one stored row into its decoded form at the start of `out`.
pub(crate) fn normalize_row(format: &UncompressedFormat, row: &[u8], out: &mut [u8], width: usize) {
    let out_bytes = format.output.bytes_per_pixel();
    if format.reorders_channels() {
        reorder_channels(
            row,
            out,
            &format.masks,
            format.source_bytes,
            out_bytes,
            width,
        );
    } else {
        out[..row.len()].copy_from_slice(row);
    }

    if format.signed {
        apply_signed_bias(out, out_bytes, width);
    }
}

/// Converts a whole stored level held in memory.
///
/// # Parameters
///
/// - `src`: Stored pixels of the level, `height` rows of [`source_row_bytes`] each
/// - `dst`: Decoded level, rows `stride` bytes apart
pub(crate) fn normalize_level(
    format: &UncompressedFormat,
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    stride: usize,
) {
    let row_bytes = source_row_bytes(format, width);
    if row_bytes == 0 {
        return;
    }

    for (row, out) in src.chunks_exact(row_bytes).zip(dst.chunks_mut(stride)) {
        normalize_row(format, row, out, width as usize);
    }
}

/// Converts the next stored row of `source` into `out`.
///
/// # Errors
///
/// [`DecodeError::TruncatedData`] if the source ends inside the row.
pub(crate) fn normalize_row_from_stream<S: StreamSource + ?Sized>(
    format: &UncompressedFormat,
    source: &mut S,
    out: &mut [u8],
    width: u32,
) -> Result<(), DecodeError> {
    let row_bytes = source_row_bytes(format, width);
    let row = source.require(row_bytes)?;
    normalize_row(format, row, out, width as usize);
    source.consume(row_bytes);
    Ok(())
}
