//! BC3 (DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::alpha_gradient::decode_gradient_block;
use crate::bc1_decode::decode_color_block;
use texdecode_common::decoded_4x4_block::Decoded4x4Block;

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC3 block (16 bytes). The first 8 bytes hold the alpha gradient, the last
///   8 the color block.
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels with alpha
#[inline]
pub fn decode_bc3_block(src: &[u8; 16]) -> Decoded4x4Block {
    let mut alpha_block = [0u8; 8];
    let mut color_block = [0u8; 8];
    alpha_block.copy_from_slice(&src[..8]);
    color_block.copy_from_slice(&src[8..]);

    // BC3 always uses the 4-color mode (no transparency from color section)
    let mut result = decode_color_block(&color_block, false);
    let alpha = decode_gradient_block(&alpha_block, false);
    for (pixel, a) in result.pixels.iter_mut().zip(alpha) {
        pixel.a = a;
    }
    result
}
