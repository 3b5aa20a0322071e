//! # Tile-Row Surface Decoding
//!
//! A block-compressed surface is a grid of 4x4 tiles stored row after row. One row of blocks
//! decodes into four rows of pixels, and distinct tile rows never write to the same bytes, so
//! rows are the unit of work for every decode path here:
//!
//! - [`decode_surface`] reads straight out of an in-memory source, optionally spreading rows
//!   across the `rayon` pool of a [`Workers`] (`multithreaded` feature).
//! - [`decode_surface_from_stream`] pulls one row at a time through a [`StreamSource`], so the
//!   working buffer only ever needs to hold a single row of blocks.
//!
//! Every path funnels into [`decode_tile_row`], which keeps their output byte-identical.

use crate::block_format::{BlockFormat, BLOCK_SIZE};
use crate::thread_pool::Workers;
use likely_stable::unlikely;
use texdecode_common::{
    error::{DecodeError, InvalidHeaderReason},
    normalize::checked_stride,
    stream::StreamSource,
};

/// Dimensions of a surface in blocks, plus the stride of its decoded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGrid {
    /// Compression format of every block.
    pub format: BlockFormat,
    /// Blocks per row: `ceil(width / 4)`.
    pub blocks_per_row: usize,
    /// Rows of blocks: `ceil(height / 4)`.
    pub block_rows: usize,
    /// Bytes per decoded pixel row.
    pub stride: usize,
}

impl TileGrid {
    /// Describes a `width` x `height` surface, with decoded rows padded to whole tiles.
    ///
    /// # Errors
    ///
    /// [`InvalidHeaderReason::DimensionsTooLarge`] if the compressed or decoded size of the
    /// surface does not fit in a `usize`. Every length method is overflow free afterwards.
    pub fn new(format: BlockFormat, width: u32, height: u32) -> Result<Self, DecodeError> {
        let tile = BLOCK_SIZE as usize;
        let blocks_per_row = width.max(1).div_ceil(BLOCK_SIZE) as usize;
        let block_rows = height.max(1).div_ceil(BLOCK_SIZE) as usize;
        let stride = blocks_per_row
            .checked_mul(tile)
            .and_then(|pixels| checked_stride(pixels, format.output_format().bits_per_pixel()));
        let decoded = stride.and_then(|stride| stride.checked_mul(tile)?.checked_mul(block_rows));
        let source = blocks_per_row
            .checked_mul(format.block_bytes())
            .and_then(|row| row.checked_mul(block_rows));

        match (stride, decoded, source) {
            (Some(stride), Some(_), Some(_)) => Ok(Self {
                format,
                blocks_per_row,
                block_rows,
                stride,
            }),
            _ => Err(InvalidHeaderReason::DimensionsTooLarge { width, height }.into()),
        }
    }

    /// A grid of a single row of blocks with the same width and format.
    #[inline]
    pub fn row(&self) -> Self {
        Self {
            block_rows: 1,
            ..*self
        }
    }

    /// Compressed bytes in one row of blocks.
    #[inline]
    pub fn source_row_bytes(&self) -> usize {
        self.blocks_per_row * self.format.block_bytes()
    }

    /// Compressed bytes in the whole surface.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_row_bytes() * self.block_rows
    }

    /// Decoded bytes written by one row of blocks.
    #[inline]
    pub fn tile_row_bytes(&self) -> usize {
        self.stride * BLOCK_SIZE as usize
    }

    /// Decoded bytes in the whole surface.
    #[inline]
    pub fn decoded_len(&self) -> usize {
        self.tile_row_bytes() * self.block_rows
    }
}

/// Decodes one row of blocks.
///
/// # Parameters
///
/// - `format`: Format of the blocks in `src`
/// - `src`: The compressed row. Trailing bytes that do not form a whole block are ignored.
/// - `dst`: Four pixel rows, `stride` bytes apart, starting at the row's top-left pixel
/// - `stride`: Bytes per pixel row in `dst`
#[inline]
pub fn decode_tile_row(format: BlockFormat, src: &[u8], dst: &mut [u8], stride: usize) {
    let bytes_per_pixel = format.output_format().bytes_per_pixel();
    let tile_width = bytes_per_pixel * BLOCK_SIZE as usize;
    for (x, block) in src.chunks_exact(format.block_bytes()).enumerate() {
        if let Some(decoded) = format.decode_block(block) {
            decoded.write_to(&mut dst[x * tile_width..], stride, bytes_per_pixel);
        }
    }
}

/// Decodes a whole surface held in memory.
///
/// # Parameters
///
/// - `grid`: Layout of the surface
/// - `src`: Compressed blocks; must hold at least [`TileGrid::source_len`] bytes
/// - `dst`: Output of at least [`TileGrid::decoded_len`] bytes
/// - `workers`: Where rows are decoded. Rows are spread across the pool unless the workers are
///   sequential or the surface has a single row of blocks.
///
/// # Errors
///
/// [`DecodeError::TruncatedData`] if `src` is shorter than the surface.
pub fn decode_surface(
    grid: &TileGrid,
    src: &[u8],
    dst: &mut [u8],
    workers: &Workers,
) -> Result<(), DecodeError> {
    let required = grid.source_len();
    if unlikely(src.len() < required) {
        return Err(DecodeError::TruncatedData {
            required,
            actual: src.len(),
        });
    }
    debug_assert!(dst.len() >= grid.decoded_len());

    let src = &src[..required];
    #[cfg(feature = "multithreaded")]
    {
        if !workers.is_sequential() && grid.block_rows > 1 {
            decode_rows_parallel(grid, src, dst, workers);
            return Ok(());
        }
    }
    #[cfg(not(feature = "multithreaded"))]
    let _ = workers;

    let rows = src.chunks_exact(grid.source_row_bytes());
    for (row, tile) in rows.zip(dst.chunks_exact_mut(grid.tile_row_bytes())) {
        decode_tile_row(grid.format, row, tile, grid.stride);
    }
    Ok(())
}

#[cfg(feature = "multithreaded")]
fn decode_rows_parallel(grid: &TileGrid, src: &[u8], dst: &mut [u8], workers: &Workers) {
    use rayon::prelude::*;

    workers.install(move || {
        dst.par_chunks_exact_mut(grid.tile_row_bytes())
            .zip(src.par_chunks_exact(grid.source_row_bytes()))
            .for_each(|(tile, row)| decode_tile_row(grid.format, row, tile, grid.stride));
    });
}

/// Decodes a surface pulled from `source` one row of blocks at a time.
///
/// Consumes exactly [`TileGrid::source_len`] bytes on success.
///
/// # Errors
///
/// [`DecodeError::TruncatedData`] if the source ends early, or any error of the source itself.
pub fn decode_surface_from_stream<S: StreamSource + ?Sized>(
    grid: &TileGrid,
    source: &mut S,
    dst: &mut [u8],
) -> Result<(), DecodeError> {
    let row_bytes = grid.source_row_bytes();
    for (y, tile) in dst
        .chunks_exact_mut(grid.tile_row_bytes())
        .take(grid.block_rows)
        .enumerate()
    {
        let row = source.fill(row_bytes)?;
        if unlikely(row.len() < row_bytes) {
            return Err(DecodeError::TruncatedData {
                required: grid.source_len(),
                actual: y * row_bytes + row.len(),
            });
        }
        decode_tile_row(grid.format, &row[..row_bytes], tile, grid.stride);
        source.consume(row_bytes);
    }
    Ok(())
}
