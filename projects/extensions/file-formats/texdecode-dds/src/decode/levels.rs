//! Per-level decoding of a DDS payload.
//!
//! Each mip level writes its own disjoint range of the output buffer. In direct mode the
//! number of levels is known up front from the payload length, and the output is rented whole.
//! In chunked mode the output grows one row at a time as levels are decoded, until the source
//! runs dry; a level that cannot be completed is dropped.

use super::uncompressed::{normalize_level, normalize_row_from_stream};
use crate::dds::UncompressedFormat;
use texdecode_bcn::{
    tile_rows::{decode_surface, decode_surface_from_stream},
    BlockFormat, TileGrid, Workers,
};
use texdecode_common::{
    allocate::RentedBuffer,
    error::DecodeError,
    mip_chain::{MipChain, MipDescriptor},
    rows::decode_rows,
    stream::StreamSource,
};

/// What is done with each stored level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LevelDecoder {
    /// Decode blocks into pixels.
    Blocks(BlockFormat),
    /// Copy blocks as they are.
    Deferred,
    /// Normalize plain pixels.
    Pixels(UncompressedFormat),
}

/// Byte length of all levels in `layout`.
#[inline]
pub(crate) fn total_len(layout: &[MipDescriptor]) -> usize {
    layout.last().map_or(0, |mip| mip.offset + mip.len)
}

/// Splits `dst` into the consecutive, disjoint byte ranges of the levels in `layout`.
pub(crate) fn split_levels<'a>(mut dst: &'a mut [u8], layout: &[MipDescriptor]) -> Vec<&'a mut [u8]> {
    let mut levels = Vec::with_capacity(layout.len());
    for mip in layout {
        let (level, rest) = core::mem::take(&mut dst).split_at_mut(mip.len);
        levels.push(level);
        dst = rest;
    }
    levels
}

/// Decodes every level of `layout` from an in-memory payload.
///
/// `payload` must hold at least `chain.source_len(layout.len())` bytes. All levels share
/// `workers`.
pub(crate) fn decode_levels(
    decoder: LevelDecoder,
    chain: &MipChain,
    payload: &[u8],
    layout: &[MipDescriptor],
    dst: &mut [u8],
    workers: &Workers,
) -> Result<(), DecodeError> {
    let jobs: Vec<_> = layout
        .iter()
        .zip(split_levels(dst, layout))
        .enumerate()
        .map(|(level, (mip, out))| {
            let start = chain.source_offset(level as u32);
            let end = start.saturating_add(chain.level_source_len(level as u32));
            (mip, payload.get(start..end).unwrap_or_default(), out)
        })
        .collect();

    match decoder {
        LevelDecoder::Blocks(format) => {
            for (mip, src, out) in jobs {
                let grid = TileGrid::new(format, mip.width, mip.height)?;
                decode_surface(&grid, src, out, workers)?;
            }
        }
        LevelDecoder::Deferred => {
            for (_, src, out) in jobs {
                out[..src.len()].copy_from_slice(src);
            }
        }
        LevelDecoder::Pixels(format) => normalize_levels(&format, jobs, workers),
    }
    Ok(())
}

fn normalize_levels(
    format: &UncompressedFormat,
    jobs: Vec<(&MipDescriptor, &[u8], &mut [u8])>,
    workers: &Workers,
) {
    #[cfg(feature = "multithreaded")]
    {
        if !workers.is_sequential() && jobs.len() > 1 {
            use rayon::prelude::*;

            workers.install(|| {
                jobs.into_par_iter().for_each(|(mip, src, out)| {
                    normalize_level(format, src, out, mip.width, mip.stride)
                })
            });
            return;
        }
    }
    #[cfg(not(feature = "multithreaded"))]
    let _ = workers;

    for (mip, src, out) in jobs {
        normalize_level(format, src, out, mip.width, mip.stride);
    }
}

/// Decodes the levels of `layout` from `source` into `data`, growing it one row at a time and
/// stopping at the first level the source cannot complete.
///
/// # Returns
///
/// The number of levels fully decoded. `data` covers at least those levels.
///
/// # Errors
///
/// [`DecodeError::TruncatedData`] if not even the base level is complete, or any error of the
/// source itself.
pub(crate) fn decode_levels_from_stream<S: StreamSource + ?Sized>(
    decoder: LevelDecoder,
    source: &mut S,
    layout: &[MipDescriptor],
    data: &mut RentedBuffer,
) -> Result<usize, DecodeError> {
    let limit = total_len(layout);
    let mut decoded = 0;
    for (level, mip) in layout.iter().enumerate() {
        let result = match decoder {
            LevelDecoder::Blocks(format) => TileGrid::new(format, mip.width, mip.height)
                .and_then(|grid| {
                    let row = grid.row();
                    decode_rows(
                        data,
                        mip.offset,
                        grid.block_rows,
                        grid.tile_row_bytes(),
                        limit,
                        |out| decode_surface_from_stream(&row, source, out),
                    )
                }),
            LevelDecoder::Deferred => {
                let rows = mip.len.checked_div(mip.stride).unwrap_or(0);
                decode_rows(data, mip.offset, rows, mip.stride, limit, |out| {
                    source.read_exact_into(out)
                })
            }
            LevelDecoder::Pixels(format) => decode_rows(
                data,
                mip.offset,
                mip.height as usize,
                mip.stride,
                limit,
                |out| normalize_row_from_stream(&format, source, out, mip.width),
            ),
        };

        match result {
            Ok(()) => decoded += 1,
            Err(DecodeError::TruncatedData { .. }) if level > 0 => break,
            Err(error) => return Err(error),
        }
    }
    Ok(decoded)
}
