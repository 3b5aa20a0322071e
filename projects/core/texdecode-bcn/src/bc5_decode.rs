//! BC5 (ATI2) decoding: two independent gradient channels, typically a tangent space normal map.

use crate::alpha_gradient::decode_gradient_block;
use texdecode_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Decodes a BC5 block. The first channel lands in red, the second in green, blue is zero.
///
/// # Parameters
///
/// - `src`: The source BC5 block (16 bytes)
/// - `signed`: Whether the endpoints are two's complement (`BC5_SNORM`)
#[inline]
pub fn decode_bc5_block(src: &[u8; 16], signed: bool) -> Decoded4x4Block {
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&src[..8]);
    second.copy_from_slice(&src[8..]);

    let red = decode_gradient_block(&first, signed);
    let green = decode_gradient_block(&second, signed);

    let mut result = Decoded4x4Block::default();
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        *pixel = Color8888::new(red[i], green[i], 0, 255);
    }
    result
}
