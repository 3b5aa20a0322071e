//! # Mip Chain Layout
//!
//! Computes per-level dimensions, byte offsets and byte lengths for a mipmap pyramid, both as
//! stored in a container (tightly packed blocks) and as laid out in a decoded buffer (whole
//! 4x4 tiles, rows padded to [`stride`]).
//!
//! Level `i` has dimensions `max(1, width >> i)` by `max(1, height >> i)`. Its stored size is
//! `ceil(w / block) * ceil(h / block) * block_bytes`, so a level never shrinks below one block
//! and non-multiple dimensions round up instead of drifting.

use crate::error::{DecodeError, InvalidHeaderReason};
use crate::normalize::checked_stride;

/// One level of a mip chain inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MipDescriptor {
    /// Width of the level in pixels.
    pub width: u32,
    /// Height of the level in pixels.
    pub height: u32,
    /// Bytes per row (or per tile-row of blocks, when still compressed).
    pub stride: usize,
    /// Byte offset of the level within the buffer.
    pub offset: usize,
    /// Byte length of the level.
    pub len: usize,
}

/// Geometry of a mip chain: base dimensions plus block granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipChain {
    width: u32,
    height: u32,
    block_size: u32,
    block_bytes: usize,
}

impl MipChain {
    /// Describes a chain with the given base dimensions.
    ///
    /// # Parameters
    ///
    /// - `block_size`: 4 for block-compressed data, 1 for uncompressed pixels
    /// - `block_bytes`: bytes per block, or bytes per pixel when `block_size` is 1
    pub const fn new(width: u32, height: u32, block_size: u32, block_bytes: usize) -> Self {
        Self {
            width,
            height,
            block_size,
            block_bytes,
        }
    }

    /// Dimensions of `level`.
    #[inline]
    pub fn level_dimensions(&self, level: u32) -> (u32, u32) {
        (
            self.width.checked_shr(level).unwrap_or(0).max(1),
            self.height.checked_shr(level).unwrap_or(0).max(1),
        )
    }

    /// Blocks per row and block rows of `level`.
    #[inline]
    pub fn level_blocks(&self, level: u32) -> (usize, usize) {
        let (w, h) = self.level_dimensions(level);
        (
            w.div_ceil(self.block_size) as usize,
            h.div_ceil(self.block_size) as usize,
        )
    }

    /// Stored byte length of `level`.
    ///
    /// Saturates at [`usize::MAX`] when the level is too large to address, so it never fits in
    /// an actual payload.
    #[inline]
    pub fn level_source_len(&self, level: u32) -> usize {
        let (bw, bh) = self.level_blocks(level);
        bw.saturating_mul(bh).saturating_mul(self.block_bytes)
    }

    /// Stored byte offset of `level`: the sum of all levels before it. Saturates like
    /// [`MipChain::level_source_len`].
    pub fn source_offset(&self, level: u32) -> usize {
        (0..level).fold(0usize, |total, i| total.saturating_add(self.level_source_len(i)))
    }

    /// Stored byte length of the first `levels` levels.
    pub fn source_len(&self, levels: u32) -> usize {
        self.source_offset(levels)
    }

    /// Number of levels in a full chain down to 1x1: `floor(log2(max(w, h))) + 1`.
    pub fn estimated_levels(&self) -> u32 {
        self.width.max(self.height).max(1).ilog2() + 1
    }

    /// Number of levels out of `declared` that are wholly contained in `available` bytes.
    pub fn levels_present(&self, declared: u32, available: usize) -> u32 {
        let mut total = 0usize;
        let mut levels = 0;
        while levels < declared {
            total = total.saturating_add(self.level_source_len(levels));
            if total > available {
                break;
            }
            levels += 1;
        }
        levels
    }

    /// Layout of the first `levels` levels once decoded to `bits_per_pixel`.
    ///
    /// Each level is padded to whole blocks: rows span `ceil(w / block) * block` pixels and
    /// there are `ceil(h / block) * block` rows.
    ///
    /// # Errors
    ///
    /// [`InvalidHeaderReason::DimensionsTooLarge`] if any length or offset overflows.
    pub fn decoded_layout(
        &self,
        levels: u32,
        bits_per_pixel: u32,
    ) -> Result<Vec<MipDescriptor>, DecodeError> {
        let block = self.block_size as usize;
        self.layout(levels, |level| {
            let (bw, bh) = self.level_blocks(level);
            let row = checked_stride(bw.checked_mul(block)?, bits_per_pixel)?;
            Some((row, row.checked_mul(bh)?.checked_mul(block)?))
        })
    }

    /// Layout of the first `levels` levels as stored, without decoding.
    ///
    /// # Errors
    ///
    /// [`InvalidHeaderReason::DimensionsTooLarge`] if any length or offset overflows.
    pub fn source_layout(&self, levels: u32) -> Result<Vec<MipDescriptor>, DecodeError> {
        self.layout(levels, |level| {
            let (bw, bh) = self.level_blocks(level);
            let row = bw.checked_mul(self.block_bytes)?;
            Some((row, row.checked_mul(bh)?))
        })
    }

    /// Lays out consecutive levels from their `(stride, len)`.
    fn layout<F>(&self, levels: u32, mut level_size: F) -> Result<Vec<MipDescriptor>, DecodeError>
    where
        F: FnMut(u32) -> Option<(usize, usize)>,
    {
        let too_large = InvalidHeaderReason::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        };

        let mut offset = 0usize;
        let mut layout = Vec::with_capacity(levels as usize);
        for level in 0..levels {
            let (width, height) = self.level_dimensions(level);
            let (stride, len) = level_size(level).ok_or(too_large)?;
            layout.push(MipDescriptor {
                width,
                height,
                stride,
                offset,
                len,
            });
            offset = offset.checked_add(len).ok_or(too_large)?;
        }
        Ok(layout)
    }
}
