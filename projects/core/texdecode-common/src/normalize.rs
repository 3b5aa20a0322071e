//! # Pixel Normalization
//!
//! Everything that turns raw pixel bytes from a container into the canonical layout of a
//! decoded buffer:
//!
//! - [`stride`]: bytes per output row, always a multiple of 4. [`checked_stride`] is the same
//!   formula for widths that come straight from an untrusted header.
//! - [`fill_bottom_left`] / [`fill_top_left`]: place tightly packed source rows into a strided
//!   destination, flipping vertically when the source is stored bottom-up.
//! - [`flip_rows`]: reverse the row order of a buffer that was filled in storage order.
//! - [`expand_palette`]: replace 8-bit indices with colormap entries.
//! - [`ChannelMasks`] and [`reorder_channels`]: rearrange mask-described pixels into
//!   B, G, R(, A) byte order.
//! - [`apply_signed_bias`]: shift signed channel data into unsigned range.
//!
//! Row padding is never written by these functions. Destination buffers are rented zeroed, so
//! padding stays zero.

/// Bytes per row of `width` pixels at `bits_per_pixel`, rounded up to a multiple of 4.
///
/// # Examples
///
/// ```
/// use texdecode_common::normalize::stride;
///
/// assert_eq!(stride(1, 32), 4);
/// assert_eq!(stride(2, 24), 8);
/// ```
#[inline]
pub const fn stride(width: u32, bits_per_pixel: u32) -> usize {
    let bytes_per_pixel = (bits_per_pixel as usize).div_ceil(8);
    (width as usize * bytes_per_pixel).div_ceil(4) * 4
}

/// [`stride`] for a width in `usize`, or [`None`] if the row length does not fit.
#[inline]
pub fn checked_stride(width: usize, bits_per_pixel: u32) -> Option<usize> {
    let bytes_per_pixel = (bits_per_pixel as usize).div_ceil(8);
    width
        .checked_mul(bytes_per_pixel)?
        .div_ceil(4)
        .checked_mul(4)
}

/// Writes the rows of `src` into `dst` in reverse order.
///
/// `src` holds tightly packed rows of `row_size` bytes, last image row first. Row `i` of `src`
/// lands at `dst[(rows - 1 - i) * stride..]`. Bytes between `row_size` and `stride` are left
/// untouched.
///
/// # Panics
///
/// If `dst` is shorter than `rows * stride` or `row_size > stride`.
pub fn fill_bottom_left(src: &[u8], dst: &mut [u8], row_size: usize, stride: usize) {
    if row_size == 0 {
        return;
    }

    let rows = src.len() / row_size;
    for (index, row) in src.chunks_exact(row_size).enumerate() {
        let offset = (rows - 1 - index) * stride;
        dst[offset..offset + row_size].copy_from_slice(row);
    }
}

/// Writes the rows of `src` into `dst` in order, skipping row padding in the destination.
pub fn fill_top_left(src: &[u8], dst: &mut [u8], row_size: usize, stride: usize) {
    if row_size == 0 {
        return;
    }

    for (row, out) in src.chunks_exact(row_size).zip(dst.chunks_mut(stride)) {
        out[..row_size].copy_from_slice(row);
    }
}

/// Reverses the order of the `stride` byte rows in `buf`, in place.
///
/// Trailing bytes that do not form a whole row stay where they are.
pub fn flip_rows(buf: &mut [u8], stride: usize) {
    if stride == 0 {
        return;
    }

    let rows = buf.len() / stride;
    let (top, bottom) = buf[..rows * stride].split_at_mut(rows / 2 * stride);
    for (upper, lower) in top
        .chunks_exact_mut(stride)
        .zip(bottom.rchunks_exact_mut(stride))
    {
        upper.swap_with_slice(lower);
    }
}

/// Replaces each index in `indices` with its `entry_bytes` wide entry from `palette`.
///
/// Indices past the end of the palette produce zeroed pixels. `dst` must hold at least
/// `indices.len() * entry_bytes` bytes.
pub fn expand_palette(indices: &[u8], palette: &[u8], entry_bytes: usize, dst: &mut [u8]) {
    for (&index, out) in indices.iter().zip(dst.chunks_exact_mut(entry_bytes)) {
        let start = index as usize * entry_bytes;
        match palette.get(start..start + entry_bytes) {
            Some(entry) => out.copy_from_slice(entry),
            None => out.fill(0),
        }
    }
}

/// The four channel bit masks of an uncompressed pixel format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMasks {
    /// Red bits.
    pub r: u32,
    /// Green bits.
    pub g: u32,
    /// Blue bits.
    pub b: u32,
    /// Alpha bits.
    pub a: u32,
}

impl ChannelMasks {
    /// Creates masks from their red, green, blue and alpha components.
    pub const fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self { r, g, b, a }
    }

    /// Masks in output order: B, G, R, A.
    #[inline]
    fn output_order(&self) -> [u32; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Source byte offset of each output channel, if every present channel occupies one
    /// whole byte.
    ///
    /// The non-zero masks are sorted; a channel's position in that order is its byte offset.
    /// Absent channels map to [`None`].
    pub fn byte_offsets(&self, bytes_per_pixel: usize) -> Option<[Option<usize>; 4]> {
        let mut present: Vec<u32> = self
            .output_order()
            .into_iter()
            .filter(|&mask| mask != 0)
            .collect();
        present.sort_unstable();
        present.dedup();

        let whole_bytes = present
            .iter()
            .all(|&mask| mask.count_ones() == 8 && (mask >> mask.trailing_zeros()) == 0xFF);
        if !whole_bytes || present.len() > bytes_per_pixel {
            return None;
        }

        let mut offsets = [None; 4];
        for (slot, mask) in offsets.iter_mut().zip(self.output_order()) {
            if mask != 0 {
                *slot = present.iter().position(|&m| m == mask);
            }
        }
        Some(offsets)
    }
}

/// Rearranges `width` pixels of `src_bytes` each into B, G, R(, A) order with `dst_bytes` per
/// pixel (3 or 4).
///
/// Formats whose channels each fill one whole byte are shuffled byte by byte. Anything else
/// (e.g. 10 or 15 bit channels) takes the shifting path: the pixel is read as a little endian
/// integer and each channel is extracted by mask and scaled to 8 bits. Channels without a mask
/// are written as `0xFF`.
pub fn reorder_channels(
    src: &[u8],
    dst: &mut [u8],
    masks: &ChannelMasks,
    src_bytes: usize,
    dst_bytes: usize,
    width: usize,
) {
    let pixels = src
        .chunks_exact(src_bytes)
        .zip(dst.chunks_exact_mut(dst_bytes))
        .take(width);

    match masks.byte_offsets(src_bytes) {
        Some(offsets) => {
            for (pixel, out) in pixels {
                for (channel, offset) in out.iter_mut().zip(offsets) {
                    *channel = offset.map_or(0xFF, |o| pixel[o]);
                }
            }
        }
        None => {
            let order = masks.output_order();
            for (pixel, out) in pixels {
                let value = pixel
                    .iter()
                    .take(4)
                    .enumerate()
                    .fold(0u32, |acc, (i, &b)| acc | (b as u32) << (i * 8));
                for (channel, mask) in out.iter_mut().zip(order) {
                    *channel = extract_channel(value, mask);
                }
            }
        }
    }
}

/// Pulls the bits selected by `mask` out of `value` and scales them to 0..=255.
#[inline]
pub fn extract_channel(value: u32, mask: u32) -> u8 {
    if mask == 0 {
        return 0xFF;
    }

    let bits = mask.count_ones();
    let raw = (value & mask) >> mask.trailing_zeros();
    if bits >= 8 {
        return (raw >> (bits - 8)) as u8;
    }

    let max = (1u32 << bits) - 1;
    ((raw * 255 + max / 2) / max) as u8
}

/// Shifts signed channel data into unsigned range for `width` B, G, R(, A) pixels.
///
/// 128 is subtracted (wrapping) from the blue and green bytes. Red and alpha are untouched.
pub fn apply_signed_bias(pixels: &mut [u8], bytes_per_pixel: usize, width: usize) {
    if bytes_per_pixel < 2 {
        return;
    }

    for pixel in pixels.chunks_exact_mut(bytes_per_pixel).take(width) {
        pixel[0] = pixel[0].wrapping_sub(128);
        pixel[1] = pixel[1].wrapping_sub(128);
    }
}
