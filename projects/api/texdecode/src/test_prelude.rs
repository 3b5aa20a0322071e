//! Common test imports and utilities for texdecode tests
#![allow(unused_imports)]

pub use rstest::rstest;

use endian_writer::{EndianWriter, LittleEndianWriter};

/// A DXT1 file of `width` x `height` with one level of solid blue blocks.
pub fn bc1_dds(width: u32, height: u32) -> Vec<u8> {
    let blocks = width.div_ceil(4) as usize * height.div_ceil(4) as usize;
    let mut data = vec![0u8; 0x80];

    let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(u32::from_le_bytes(*b"DDS "), 0);
        writer.write_u32_at(124, 4);
        writer.write_u32_at(0x1007, 0x08); // caps | height | width | pixel format
        writer.write_u32_at(height, 0x0C);
        writer.write_u32_at(width, 0x10);
        writer.write_u32_at(32, 0x4C);
        writer.write_u32_at(0x4, 0x50); // DDPF_FOURCC
        writer.write_u32_at(u32::from_le_bytes(*b"DXT1"), 0x54);
    }

    data.extend_from_slice(&[0x1F, 0x00, 0x1F, 0x00, 0, 0, 0, 0].repeat(blocks));
    data
}

/// An uncompressed bottom-left TGA with a patterned payload.
pub fn tga_image(image_type: u8, depth: u8, width: u16, height: u16) -> Vec<u8> {
    let mut data = vec![0, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[depth, 0]);

    let len = width as usize * height as usize * (depth as usize).div_ceil(8);
    data.extend((0..len).map(|i| (i * 13) as u8));
    data
}
