//! Common test imports and utilities for BCn tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// External crates commonly used in tests
pub use rstest::rstest;

// Common types from texdecode_common
pub use texdecode_common::color_8888::Color8888;
pub use texdecode_common::decoded_4x4_block::Decoded4x4Block;

/// Packs `(value, bit_count)` pairs into a 16-byte block, least significant bit first.
///
/// Values are masked to their bit count; unused trailing bits are zero.
pub(crate) fn pack_bits(fields: &[(u128, u32)]) -> [u8; 16] {
    let mut packed = 0u128;
    let mut position = 0u32;
    for &(value, count) in fields {
        assert!(position + count <= 128, "block overflows 128 bits");
        let mask = match count {
            128 => u128::MAX,
            _ => (1u128 << count) - 1,
        };
        if count > 0 {
            packed |= (value & mask) << position;
        }
        position += count;
    }
    packed.to_le_bytes()
}

/// Builds `count` blocks where block `i` holds the solid BC1 color `colors[i % colors.len()]`.
pub(crate) fn solid_bc1_blocks(colors: &[u16], count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| {
            let [lo, hi] = colors[i % colors.len()].to_le_bytes();
            [lo, hi, lo, hi, 0, 0, 0, 0]
        })
        .collect()
}
