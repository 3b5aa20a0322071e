//! # Row-at-a-time Output
//!
//! A header says how large the decoded image will be, not whether the source actually holds that
//! many pixels. Streaming decoders therefore extend their output with [`decode_rows`] one row at
//! a time, so memory is only committed for rows the source has delivered.

use crate::allocate::RentedBuffer;
use crate::error::DecodeError;

/// Decodes `rows` rows of `row_len` bytes into `data`, the first at `offset`.
///
/// Before each row `data` is grown to cover it (see [`RentedBuffer::grow`]), then `decode_row`
/// fills it. Row bytes `decode_row` leaves untouched read as zero.
///
/// # Parameters
///
/// - `limit`: Final length of `data` once every row of the image is decoded; caps growth
///
/// # Errors
///
/// The first error of `decode_row`, or [`DecodeError::Allocation`] if `data` cannot grow.
pub fn decode_rows<F>(
    data: &mut RentedBuffer,
    offset: usize,
    rows: usize,
    row_len: usize,
    limit: usize,
    mut decode_row: F,
) -> Result<(), DecodeError>
where
    F: FnMut(&mut [u8]) -> Result<(), DecodeError>,
{
    for index in 0..rows {
        let start = offset + index * row_len;
        data.grow(start + row_len, limit)?;
        decode_row(&mut data[start..start + row_len])?;
    }
    Ok(())
}
