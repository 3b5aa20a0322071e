//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>
//!
//! Uses the 'ideal' rounding described in the DX9 docs: 1/3 and 2/3 blends round down.

use texdecode_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Decodes the 8-byte color half shared by BC1, BC2 and BC3.
///
/// With `punch_through` set, a block whose first endpoint is not greater than the second uses
/// three colors plus transparent black. BC2 and BC3 always use four colors.
#[inline(always)]
pub(crate) fn decode_color_block(block: &[u8; 8], punch_through: bool) -> Decoded4x4Block {
    let c0 = Color565::from_le_bytes([block[0], block[1]]);
    let c1 = Color565::from_le_bytes([block[2], block[3]]);
    let idx = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);

    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    let mut dict = [c0.to_color_8888(), c1.to_color_8888(), Color8888::default(), Color8888::default()];
    if c0.greater_than(&c1) || !punch_through {
        // Four-color block
        dict[2] = Color8888::new(
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
            255,
        );
        dict[3] = Color8888::new(
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
            255,
        );
    } else {
        // Three-color block, 4th entry is transparent black
        dict[2] = Color8888::new(
            ((r0 + r1) / 2) as u8,
            ((g0 + g1) / 2) as u8,
            ((b0 + b1) / 2) as u8,
            255,
        );
    }

    let mut result = Decoded4x4Block::default();
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        *pixel = dict[((idx >> (i * 2)) & 0x3) as usize];
    }
    result
}

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC1 block (8 bytes)
///
/// # Example
///
/// ```
/// use texdecode_bcn::bc1_decode::decode_bc1_block;
///
/// let bc1_block = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0]; // Solid red
/// let decoded = decode_bc1_block(&bc1_block);
/// assert_eq!(decoded.get_pixel(0, 0).r, 255);
/// ```
#[inline]
pub fn decode_bc1_block(src: &[u8; 8]) -> Decoded4x4Block {
    decode_color_block(src, true)
}
