//! BC6H decoding, based on bcdec <https://github.com/iOrange/bcdec> and the D3D11 format
//! description <https://learn.microsoft.com/en-us/windows/win32/direct3d11/bc6h-format>.
//!
//! A BC6H block stores half float RGB. The 14 valid modes differ only in how the endpoint bits
//! are scattered through the first 77 (or 65) bits of the block, so each mode is described by a
//! table of [`Field`]s instead of its own code path. After the endpoints are assembled, every mode
//! shares the same sign extension, delta transform, unquantization and interpolation.
//!
//! The resulting half floats are converted to 8-bit with the sRGB transfer curve, since the
//! decoded surface is always an 8-bit BGRA buffer.

use crate::bitstream::Bitstream;
use crate::partition_table::{ANCHOR, TWO_SUBSETS};
use texdecode_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// A run of bits in the block that belongs to one endpoint channel.
#[derive(Debug, Clone, Copy)]
struct Field {
    /// 0 = red, 1 = green, 2 = blue
    channel: u8,
    endpoint: u8,
    /// Bit position within the endpoint value.
    shift: u8,
    count: u8,
    /// Stored most significant bit first.
    reversed: bool,
}

const fn field(channel: u8, endpoint: u8, shift: u8, count: u8) -> Field {
    Field {
        channel,
        endpoint,
        shift,
        count,
        reversed: false,
    }
}

const fn r(endpoint: u8, shift: u8, count: u8) -> Field {
    field(0, endpoint, shift, count)
}

const fn g(endpoint: u8, shift: u8, count: u8) -> Field {
    field(1, endpoint, shift, count)
}

const fn b(endpoint: u8, shift: u8, count: u8) -> Field {
    field(2, endpoint, shift, count)
}

const fn rev(mut field: Field) -> Field {
    field.reversed = true;
    field
}

#[rustfmt::skip]
const MODE_0: &[Field] = &[
    g(2, 4, 1), b(2, 4, 1), b(3, 4, 1), r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 5),
    g(3, 4, 1), g(2, 0, 4), g(1, 0, 5), b(3, 0, 1), g(3, 0, 4), b(1, 0, 5), b(3, 1, 1),
    b(2, 0, 4), r(2, 0, 5), b(3, 2, 1), r(3, 0, 5), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_1: &[Field] = &[
    g(2, 5, 1), g(3, 4, 1), g(3, 5, 1), r(0, 0, 7), b(3, 0, 1), b(3, 1, 1), b(2, 4, 1),
    g(0, 0, 7), b(2, 5, 1), b(3, 2, 1), g(2, 4, 1), b(0, 0, 7), b(3, 3, 1), b(3, 5, 1),
    b(3, 4, 1), r(1, 0, 6), g(2, 0, 4), g(1, 0, 6), g(3, 0, 4), b(1, 0, 6), b(2, 0, 4),
    r(2, 0, 6), r(3, 0, 6),
];

#[rustfmt::skip]
const MODE_2: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 5), r(0, 10, 1), g(2, 0, 4), g(1, 0, 4),
    g(0, 10, 1), b(3, 0, 1), g(3, 0, 4), b(1, 0, 4), b(0, 10, 1), b(3, 1, 1), b(2, 0, 4),
    r(2, 0, 5), b(3, 2, 1), r(3, 0, 5), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_3: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 4), r(0, 10, 1), g(3, 4, 1), g(2, 0, 4),
    g(1, 0, 5), g(0, 10, 1), g(3, 0, 4), b(1, 0, 4), b(0, 10, 1), b(3, 1, 1), b(2, 0, 4),
    r(2, 0, 4), b(3, 0, 1), b(3, 2, 1), r(3, 0, 4), g(2, 4, 1), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_4: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 4), r(0, 10, 1), b(2, 4, 1), g(2, 0, 4),
    g(1, 0, 4), g(0, 10, 1), b(3, 0, 1), g(3, 0, 4), b(1, 0, 5), b(0, 10, 1), b(2, 0, 4),
    r(2, 0, 4), b(3, 1, 1), b(3, 2, 1), r(3, 0, 4), b(3, 4, 1), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_5: &[Field] = &[
    r(0, 0, 9), b(2, 4, 1), g(0, 0, 9), g(2, 4, 1), b(0, 0, 9), b(3, 4, 1), r(1, 0, 5),
    g(3, 4, 1), g(2, 0, 4), g(1, 0, 5), b(3, 0, 1), g(3, 0, 4), b(1, 0, 5), b(3, 1, 1),
    b(2, 0, 4), r(2, 0, 5), b(3, 2, 1), r(3, 0, 5), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_6: &[Field] = &[
    r(0, 0, 8), g(3, 4, 1), b(2, 4, 1), g(0, 0, 8), b(3, 2, 1), g(2, 4, 1), b(0, 0, 8),
    b(3, 3, 1), b(3, 4, 1), r(1, 0, 6), g(2, 0, 4), g(1, 0, 5), b(3, 0, 1), g(3, 0, 4),
    b(1, 0, 5), b(3, 1, 1), b(2, 0, 4), r(2, 0, 6), r(3, 0, 6),
];

#[rustfmt::skip]
const MODE_7: &[Field] = &[
    r(0, 0, 8), b(3, 0, 1), b(2, 4, 1), g(0, 0, 8), g(2, 5, 1), g(2, 4, 1), b(0, 0, 8),
    g(3, 5, 1), b(3, 4, 1), r(1, 0, 5), g(3, 4, 1), g(2, 0, 4), g(1, 0, 6), g(3, 0, 4),
    b(1, 0, 5), b(3, 1, 1), b(2, 0, 4), r(2, 0, 5), b(3, 2, 1), r(3, 0, 5), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_8: &[Field] = &[
    r(0, 0, 8), b(3, 1, 1), b(2, 4, 1), g(0, 0, 8), b(2, 5, 1), g(2, 4, 1), b(0, 0, 8),
    b(3, 5, 1), b(3, 4, 1), r(1, 0, 5), g(3, 4, 1), g(2, 0, 4), g(1, 0, 5), b(3, 0, 1),
    g(3, 0, 4), b(1, 0, 6), b(2, 0, 4), r(2, 0, 5), b(3, 2, 1), r(3, 0, 5), b(3, 3, 1),
];

#[rustfmt::skip]
const MODE_9: &[Field] = &[
    r(0, 0, 6), g(3, 4, 1), b(3, 0, 1), b(3, 1, 1), b(2, 4, 1), g(0, 0, 6), g(2, 5, 1),
    b(2, 5, 1), b(3, 2, 1), g(2, 4, 1), b(0, 0, 6), g(3, 5, 1), b(3, 3, 1), b(3, 5, 1),
    b(3, 4, 1), r(1, 0, 6), g(2, 0, 4), g(1, 0, 6), g(3, 0, 4), b(1, 0, 6), b(2, 0, 4),
    r(2, 0, 6), r(3, 0, 6),
];

#[rustfmt::skip]
const MODE_10: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 10), g(1, 0, 10), b(1, 0, 10),
];

#[rustfmt::skip]
const MODE_11: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 9), r(0, 10, 1), g(1, 0, 9), g(0, 10, 1),
    b(1, 0, 9), b(0, 10, 1),
];

#[rustfmt::skip]
const MODE_12: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 8), rev(r(0, 10, 2)), g(1, 0, 8),
    rev(g(0, 10, 2)), b(1, 0, 8), rev(b(0, 10, 2)),
];

#[rustfmt::skip]
const MODE_13: &[Field] = &[
    r(0, 0, 10), g(0, 0, 10), b(0, 0, 10), r(1, 0, 4), rev(r(0, 10, 6)), g(1, 0, 4),
    rev(g(0, 10, 6)), b(1, 0, 4), rev(b(0, 10, 6)),
];

/// Precision per mode: base endpoint bits, then the red, green and blue bits of the other endpoints.
const ENDPOINT_BITS: [[u8; 14]; 4] = [
    [10, 7, 11, 11, 11, 9, 8, 8, 8, 6, 10, 11, 12, 16],
    [5, 6, 5, 4, 4, 5, 6, 5, 5, 6, 10, 9, 8, 4],
    [5, 6, 4, 5, 4, 5, 5, 6, 5, 6, 10, 9, 8, 4],
    [5, 6, 4, 4, 5, 5, 5, 5, 6, 6, 10, 9, 8, 4],
];

const WEIGHTS_3: [i32; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
const WEIGHTS_4: [i32; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

/// Maps the 2 or 5 mode bits to a mode number (0..14) and its field layout.
fn mode_layout(mode_bits: u32) -> Option<(usize, &'static [Field])> {
    Some(match mode_bits {
        0b00000 => (0, MODE_0),
        0b00001 => (1, MODE_1),
        0b00010 => (2, MODE_2),
        0b00110 => (3, MODE_3),
        0b01010 => (4, MODE_4),
        0b01110 => (5, MODE_5),
        0b10010 => (6, MODE_6),
        0b10110 => (7, MODE_7),
        0b11010 => (8, MODE_8),
        0b11110 => (9, MODE_9),
        0b00011 => (10, MODE_10),
        0b00111 => (11, MODE_11),
        0b01011 => (12, MODE_12),
        0b01111 => (13, MODE_13),
        _ => return None,
    })
}

#[inline]
fn extend_sign(value: i32, bits: u32) -> i32 {
    (value << (32 - bits)) >> (32 - bits)
}

#[inline]
fn transform_inverse(value: i32, base: i32, bits: u32, signed: bool) -> i32 {
    let value = (value + base) & ((1 << bits) - 1);
    match signed {
        true => extend_sign(value, bits),
        false => value,
    }
}

fn unquantize(value: i32, bits: u32, signed: bool) -> i32 {
    if !signed {
        return match value {
            _ if bits >= 15 => value,
            0 => 0,
            _ if value == (1 << bits) - 1 => 0xFFFF,
            _ => ((value << 16) + 0x8000) >> bits,
        };
    }

    if bits >= 16 {
        return value;
    }

    let magnitude = value.abs();
    let unquantized = if magnitude == 0 {
        0
    } else if magnitude >= (1 << (bits - 1)) - 1 {
        0x7FFF
    } else {
        ((magnitude << 15) + 0x4000) >> (bits - 1)
    };
    match value < 0 {
        true => -unquantized,
        false => unquantized,
    }
}

#[inline]
fn interpolate(a: i32, b: i32, weight: i32) -> i32 {
    (a * (64 - weight) + b * weight + 32) >> 6
}

/// Scales an interpolated value to the final half float bit pattern.
#[inline]
fn finish_unquantize(value: i32, signed: bool) -> u16 {
    if !signed {
        return ((value * 31) >> 6) as u16;
    }

    let scaled = (value.abs() * 31) >> 5;
    match value < 0 {
        true => 0x8000 | scaled as u16,
        false => scaled as u16,
    }
}

/// Converts an IEEE 754 half to `f32`.
pub fn half_to_f32(half: u16) -> f32 {
    const SHIFTED_EXPONENT: u32 = 0x7C00 << 13;

    let bits = (half as u32 & 0x7FFF) << 13;
    let exponent = bits & SHIFTED_EXPONENT;
    let rebased = bits + ((127 - 15) << 23);

    let magnitude = if exponent == SHIFTED_EXPONENT {
        // Inf/NaN
        f32::from_bits(rebased + ((128 - 16) << 23))
    } else if exponent == 0 {
        // Subnormal
        f32::from_bits(rebased + (1 << 23)) - f32::from_bits(113 << 23)
    } else {
        f32::from_bits(rebased)
    };

    f32::from_bits(magnitude.to_bits() | ((half as u32 & 0x8000) << 16))
}

/// Maps a linear value to an 8-bit display value with the sRGB transfer curve.
/// Negative values and NaN become 0, values of 1 and above saturate.
pub fn linear_to_display(value: f32) -> u8 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value <= 0.003_130_8 {
        (255.0 * value * 12.92 + 0.5) as u8
    } else if value < 1.0 {
        (255.0 * (1.055 * value.powf(1.0 / 2.4) - 0.055) + 0.5) as u8
    } else {
        255
    }
}

/// Decodes a BC6H block, tone mapped to 8-bit B, G, R with opaque alpha.
///
/// # Parameters
///
/// - `src`: The source BC6H block (16 bytes)
/// - `signed`: `true` for `BC6H_SF16`, `false` for `BC6H_UF16`
///
/// Reserved mode values decode to opaque black.
pub fn decode_bc6h_block(src: &[u8; 16], signed: bool) -> Decoded4x4Block {
    let mut bits = Bitstream::new(src);
    let mut mode_bits = bits.read(2);
    if mode_bits > 1 {
        mode_bits |= bits.read(3) << 2;
    }

    let Some((mode, layout)) = mode_layout(mode_bits) else {
        return Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
    };

    // [channel][endpoint]
    let mut endpoints = [[0i32; 4]; 3];
    for field in layout {
        let value = match field.reversed {
            true => bits.read_reversed(field.count as u32),
            false => bits.read(field.count as u32),
        };
        endpoints[field.channel as usize][field.endpoint as usize] |=
            (value as i32) << field.shift;
    }

    let partitioned = mode < 10;
    let partition = match partitioned {
        true => bits.read(5) as usize,
        false => 0,
    };
    let endpoint_count = if partitioned { 4 } else { 2 };
    let base_bits = ENDPOINT_BITS[0][mode] as u32;
    let transformed = mode != 9 && mode != 10;

    for (channel, values) in endpoints.iter_mut().enumerate() {
        if signed {
            values[0] = extend_sign(values[0], base_bits);
        }

        let base = values[0];
        let delta_bits = ENDPOINT_BITS[channel + 1][mode] as u32;
        for value in values.iter_mut().take(endpoint_count).skip(1) {
            if transformed || signed {
                *value = extend_sign(*value, delta_bits);
            }
            if transformed {
                *value = transform_inverse(*value, base, base_bits, signed);
            }
        }

        for value in values.iter_mut().take(endpoint_count) {
            *value = unquantize(*value, base_bits, signed);
        }
    }

    let weights: &[i32] = match partitioned {
        true => &WEIGHTS_3,
        false => &WEIGHTS_4,
    };
    let full_index_bits = if partitioned { 3 } else { 4 };

    let mut result = Decoded4x4Block::default();
    for (i, pixel) in result.pixels.iter_mut().enumerate() {
        let entry = match partitioned {
            true => TWO_SUBSETS[partition][i],
            false if i == 0 => ANCHOR,
            false => 0,
        };
        let index_bits = match entry & ANCHOR != 0 {
            true => full_index_bits - 1,
            false => full_index_bits,
        };
        let weight = weights[bits.read(index_bits) as usize];
        let subset = (entry & 1) as usize * 2;

        let channel = |c: usize| {
            let value = interpolate(endpoints[c][subset], endpoints[c][subset + 1], weight);
            linear_to_display(half_to_f32(finish_unquantize(value, signed)))
        };
        *pixel = Color8888::new(channel(0), channel(1), channel(2), 255);
    }
    result
}
