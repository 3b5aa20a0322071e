//! BC2 (DXT3) decoding: an explicit 4-bit alpha plane followed by a four-color BC1 block.

use crate::bc1_decode::decode_color_block;
use texdecode_common::decoded_4x4_block::Decoded4x4Block;

/// Decodes a BC2 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC2 block (16 bytes)
#[inline]
pub fn decode_bc2_block(src: &[u8; 16]) -> Decoded4x4Block {
    let (alpha, color) = src.split_at(8);
    let mut color_block = [0u8; 8];
    color_block.copy_from_slice(color);

    let mut result = decode_color_block(&color_block, false);
    let alpha_bits = u64::from_le_bytes([
        alpha[0], alpha[1], alpha[2], alpha[3], alpha[4], alpha[5], alpha[6], alpha[7],
    ]);
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        // 4-bit alpha expanded by replication (x * 17).
        pixel.a = ((alpha_bits >> (i * 4)) & 0xF) as u8 * 17;
    }
    result
}
