//! The eight-entry gradient shared by BC3 alpha, BC4 and BC5.
//!
//! Two endpoint bytes expand into eight values. When `e0 > e1` the six intermediates are
//! `((7 - i) * e0 + i * e1) / 7`; otherwise four intermediates use `/ 5` and the last two slots are
//! the minimum and maximum of the range. Sixteen 3-bit indices then pick one value per pixel.

/// Builds the unsigned gradient.
#[inline]
pub fn unsigned_gradient(e0: u8, e1: u8) -> [u8; 8] {
    let (a, b) = (e0 as u16, e1 as u16);
    let mut values = [e0, e1, 0, 0, 0, 0, 0, 255];
    if e0 > e1 {
        for (i, value) in values.iter_mut().enumerate().skip(2) {
            let w = i as u16 - 1;
            *value = (((7 - w) * a + w * b) / 7) as u8;
        }
    } else {
        for (i, value) in values.iter_mut().enumerate().take(6).skip(2) {
            let w = i as u16 - 1;
            *value = (((5 - w) * a + w * b) / 5) as u8;
        }
    }
    values
}

/// Builds the signed gradient and maps it to unsigned bytes (`value + 128`).
///
/// Endpoints are two's complement; -128 is treated as -127.
#[inline]
pub fn signed_gradient(e0: u8, e1: u8) -> [u8; 8] {
    let a = (e0 as i8).max(-127) as i16;
    let b = (e1 as i8).max(-127) as i16;
    let mut values = [a, b, 0, 0, 0, 0, -127, 127];
    if a > b {
        for (i, value) in values.iter_mut().enumerate().skip(2) {
            let w = i as i16 - 1;
            *value = ((7 - w) * a + w * b) / 7;
        }
    } else {
        for (i, value) in values.iter_mut().enumerate().take(6).skip(2) {
            let w = i as i16 - 1;
            *value = ((5 - w) * a + w * b) / 5;
        }
    }
    values.map(|v| (v + 128) as u8)
}

/// Expands an 8-byte gradient block (2 endpoints, 48 bits of indices) into 16 values.
#[inline]
pub fn decode_gradient_block(block: &[u8; 8], signed: bool) -> [u8; 16] {
    let values = match signed {
        true => signed_gradient(block[0], block[1]),
        false => unsigned_gradient(block[0], block[1]),
    };

    let mut indices = u64::from_le_bytes(*block) >> 16;
    let mut out = [0u8; 16];
    for value in out.iter_mut() {
        *value = values[(indices & 0b111) as usize];
        indices >>= 3;
    }
    out
}
