//! Uncompressed TGA pixel rows.

use texdecode_common::normalize::{fill_bottom_left, fill_top_left};

/// Copies tightly packed rows of `row_bytes` from `pixels` into `dst`, rows `stride` bytes
/// apart. Bottom-up images have their row order reversed on the way.
///
/// `pixels` must hold whole rows only; `dst` must have room for all of them.
pub(crate) fn decode_raw(
    pixels: &[u8],
    dst: &mut [u8],
    row_bytes: usize,
    stride: usize,
    bottom_up: bool,
) {
    match bottom_up {
        true => fill_bottom_left(pixels, dst, row_bytes, stride),
        false => fill_top_left(pixels, dst, row_bytes, stride),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    const ROWS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

    #[rstest]
    #[case(true, [7, 8, 9, 0, 4, 5, 6, 0, 1, 2, 3, 0])]
    #[case(false, [1, 2, 3, 0, 4, 5, 6, 0, 7, 8, 9, 0])]
    fn rows_land_by_orientation(#[case] bottom_up: bool, #[case] expected: [u8; 12]) {
        let mut dst = [0u8; 12];
        decode_raw(&ROWS, &mut dst, 3, 4, bottom_up);
        assert_eq!(dst, expected);
    }

    #[test]
    fn padding_is_left_untouched() {
        let mut dst = [0xEEu8; 8];
        decode_raw(&ROWS[..6], &mut dst, 3, 4, false);
        assert_eq!(dst, [1, 2, 3, 0xEE, 4, 5, 6, 0xEE]);
    }
}
