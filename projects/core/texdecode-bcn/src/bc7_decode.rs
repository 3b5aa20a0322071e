//! BC7 decoding, based on bcdec <https://github.com/iOrange/bcdec> and the D3D11 format
//! description <https://learn.microsoft.com/en-us/windows/win32/direct3d11/bc7-format>.
//!
//! The position of the lowest set bit of the first byte selects one of 8 modes. A mode fixes the
//! number of subsets, endpoint precision, whether endpoints carry parity bits, index precision,
//! and whether a second index set or a channel rotation is present. Every index is read with the
//! exact width its mode declares, so an index can never reach past its weight table.

use crate::bitstream::Bitstream;
use crate::partition_table::{ANCHOR, THREE_SUBSETS, TWO_SUBSETS};
use texdecode_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Bits per color channel of each endpoint, by mode.
const COLOR_BITS: [u32; 8] = [4, 6, 5, 7, 5, 7, 7, 5];
/// Bits per alpha channel of each endpoint, by mode. 0 means opaque.
const ALPHA_BITS: [u32; 8] = [0, 0, 0, 0, 6, 8, 7, 5];
/// Modes whose endpoints carry a parity bit: 0, 1, 3, 6 and 7.
const PBIT_MODES: u8 = 0b1100_1011;

const WEIGHTS_2: [u32; 4] = [0, 21, 43, 64];
const WEIGHTS_3: [u32; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
const WEIGHTS_4: [u32; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

fn weights(index_bits: u32) -> &'static [u32] {
    match index_bits {
        2 => &WEIGHTS_2,
        3 => &WEIGHTS_3,
        _ => &WEIGHTS_4,
    }
}

/// Widens a `bits` wide value to 8 bits by replicating its high bits into the low ones.
#[inline]
fn expand(value: u32, bits: u32) -> u32 {
    let shifted = value << (8 - bits);
    shifted | (shifted >> bits)
}

#[inline]
fn interpolate(a: u32, b: u32, weight: u32) -> u8 {
    ((a * (64 - weight) + b * weight + 32) >> 6) as u8
}

/// Decodes a BC7 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: The source BC7 block (16 bytes)
///
/// A block with no mode bit set (reserved) decodes to transparent black.
pub fn decode_bc7_block(src: &[u8; 16]) -> Decoded4x4Block {
    let mode = src[0].trailing_zeros() as usize;
    if mode >= 8 {
        return Decoded4x4Block::default();
    }

    let mut bits = Bitstream::new(src);
    bits.read(mode as u32 + 1);

    let (subsets, partition) = match mode {
        0 => (3, bits.read(4) as usize),
        2 => (3, bits.read(6) as usize),
        1 | 3 | 7 => (2, bits.read(6) as usize),
        _ => (1, 0),
    };
    let endpoint_count = subsets * 2;

    let (rotation, index_selection) = match mode {
        4 => {
            let rotation = bits.read(2);
            (rotation, bits.read_bit())
        }
        5 => (bits.read(2), 0),
        _ => (0, 0),
    };

    // [endpoint][r, g, b, a]
    let mut endpoints = [[0u32; 4]; 6];
    let color_bits = COLOR_BITS[mode];
    let alpha_bits = ALPHA_BITS[mode];
    for channel in 0..3 {
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            endpoint[channel] = bits.read(color_bits);
        }
    }
    if alpha_bits > 0 {
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            endpoint[3] = bits.read(alpha_bits);
        }
    }

    let has_pbits = PBIT_MODES & (1 << mode) != 0;
    if has_pbits {
        for endpoint in endpoints.iter_mut().take(endpoint_count) {
            for value in endpoint.iter_mut() {
                *value <<= 1;
            }
        }

        if mode == 1 {
            // One parity bit per subset, shared by both of its endpoints.
            let shared = [bits.read_bit(), bits.read_bit()];
            for (i, endpoint) in endpoints.iter_mut().take(4).enumerate() {
                for value in endpoint.iter_mut().take(3) {
                    *value |= shared[i / 2];
                }
            }
        } else {
            for endpoint in endpoints.iter_mut().take(endpoint_count) {
                let pbit = bits.read_bit();
                for value in endpoint.iter_mut() {
                    *value |= pbit;
                }
            }
        }
    }

    let pbit = has_pbits as u32;
    for endpoint in endpoints.iter_mut().take(endpoint_count) {
        for value in endpoint.iter_mut().take(3) {
            *value = expand(*value, color_bits + pbit);
        }
        endpoint[3] = match alpha_bits {
            0 => 255,
            _ => expand(endpoint[3], alpha_bits + pbit),
        };
    }

    let shape = |pixel: usize| -> u8 {
        match subsets {
            1 if pixel == 0 => ANCHOR,
            1 => 0,
            2 => TWO_SUBSETS[partition][pixel],
            _ => THREE_SUBSETS[partition][pixel],
        }
    };

    let index_bits = match mode {
        0 | 1 => 3,
        6 => 4,
        _ => 2,
    };
    let secondary_bits = match mode {
        4 => 3,
        5 => 2,
        _ => 0,
    };
    let primary_weights = weights(index_bits);
    let secondary_weights = weights(secondary_bits);

    // Primary indices for all pixels come first, then the secondary set.
    let mut indices = [0u32; 16];
    for (pixel, index) in indices.iter_mut().enumerate() {
        let anchor = shape(pixel) & ANCHOR != 0;
        *index = bits.read(index_bits - anchor as u32);
    }

    let mut result = Decoded4x4Block::default();
    for (pixel, out) in result.pixels.iter_mut().enumerate() {
        let subset = (shape(pixel) & !ANCHOR) as usize;
        let (e0, e1) = (endpoints[subset * 2], endpoints[subset * 2 + 1]);

        let primary = primary_weights[indices[pixel] as usize];
        let (color_weight, alpha_weight) = match secondary_bits {
            0 => (primary, primary),
            _ => {
                let count = if pixel == 0 { secondary_bits - 1 } else { secondary_bits };
                let secondary = secondary_weights[bits.read(count) as usize];
                match index_selection {
                    0 => (primary, secondary),
                    _ => (secondary, primary),
                }
            }
        };

        let mut rgba = [0u8; 4];
        for (channel, value) in rgba.iter_mut().enumerate() {
            let weight = if channel == 3 { alpha_weight } else { color_weight };
            *value = interpolate(e0[channel], e1[channel], weight);
        }
        match rotation {
            1 => rgba.swap(0, 3),
            2 => rgba.swap(1, 3),
            3 => rgba.swap(2, 3),
            _ => {}
        }
        *out = Color8888::new(rgba[0], rgba[1], rgba[2], rgba[3]);
    }
    result
}
