//! BC4 (ATI1) decoding: one gradient channel, written as gray.

use crate::alpha_gradient::decode_gradient_block;
use texdecode_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Decodes a BC4 block. Every pixel carries the channel in red, green and blue.
///
/// # Parameters
///
/// - `src`: The source BC4 block (8 bytes)
/// - `signed`: Whether the endpoints are two's complement (`BC4_SNORM`)
#[inline]
pub fn decode_bc4_block(src: &[u8; 8], signed: bool) -> Decoded4x4Block {
    let values = decode_gradient_block(src, signed);
    let mut result = Decoded4x4Block::default();
    for (pixel, value) in result.pixels.iter_mut().zip(values) {
        *pixel = Color8888::new(value, value, value, 255);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_gradient() {
        let block = [255, 0, 0b01_010_001, 0, 0, 0, 0, 0];
        let decoded = decode_bc4_block(&block, false);
        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(0, 0, 0, 255));
        assert_eq!(decoded.get_pixel(1, 0), Color8888::new(218, 218, 218, 255));
        assert_eq!(decoded.get_pixel(2, 0).r, 255);
        assert_eq!(decoded.get_pixel(3, 3).r, 255);
    }

    #[test]
    fn signed_zero_maps_to_mid_gray() {
        let decoded = decode_bc4_block(&[0, 0, 0, 0, 0, 0, 0, 0], true);
        assert!(decoded.pixels.iter().all(|p| p.r == 128));
    }
}
