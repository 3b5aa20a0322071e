//! Common test imports and utilities for DDS tests
#![allow(unused_imports)]

pub use rstest::rstest;

use crate::dds::constants::*;
use crate::dds::{parse_dds_header, DdsFormat};
use endian_writer::{EndianWriter, LittleEndianWriter};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use texdecode_common::allocate::{AllocateError, BufferAllocator, HeapAllocator, RawBuffer};
use texdecode_common::mip_chain::MipChain;
use texdecode_common::normalize::ChannelMasks;

/// Total size of DDS header + DX10 header (used in tests)
pub const DDS_DX10_TOTAL_HEADER_SIZE: usize = DDS_HEADER_SIZE + DX10_HEADER_SIZE;

enum PixelFormat {
    FourCC([u8; 4]),
    Dx10(u32),
    Masks {
        bits: u32,
        masks: ChannelMasks,
        alpha_pixels: bool,
    },
}

/// Builds DDS files for tests.
pub struct DdsBuilder {
    width: u32,
    height: u32,
    mip_maps: Option<u32>,
    pixel_format: PixelFormat,
    payload: Vec<u8>,
}

impl DdsBuilder {
    fn new(pixel_format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mip_maps: None,
            pixel_format,
            payload: Vec::new(),
        }
    }

    /// A legacy header with a FourCC.
    pub fn fourcc(fourcc: [u8; 4], width: u32, height: u32) -> Self {
        Self::new(PixelFormat::FourCC(fourcc), width, height)
    }

    /// A `DX10` header with a 2D, single element resource of `dxgi_format`.
    pub fn dx10(dxgi_format: u32, width: u32, height: u32) -> Self {
        Self::new(PixelFormat::Dx10(dxgi_format), width, height)
    }

    /// A legacy uncompressed header with the given bit count and channel masks.
    pub fn uncompressed(
        bits: u32,
        masks: ChannelMasks,
        alpha_pixels: bool,
        width: u32,
        height: u32,
    ) -> Self {
        let pixel_format = PixelFormat::Masks {
            bits,
            masks,
            alpha_pixels,
        };
        Self::new(pixel_format, width, height)
    }

    /// Declares `count` mip levels and sets `DDSD_MIPMAPCOUNT`.
    pub fn mip_maps(mut self, count: u32) -> Self {
        self.mip_maps = Some(count);
        self
    }

    /// Bytes appended after the header.
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// A deterministic, non-uniform payload holding exactly the declared levels (one level if
    /// none are declared).
    pub fn patterned_payload(self) -> Self {
        let header = parse_dds_header(&self.header()).unwrap();
        let format = DdsFormat::from_header(&header).unwrap();
        let chain = MipChain::new(
            self.width,
            self.height,
            format.block_size(),
            format.block_bytes(),
        );
        let len = chain.source_len(self.mip_maps.unwrap_or(1));
        let payload = (0..len).map(|i| (i * 31 + i / 7) as u8).collect();
        self.payload(payload)
    }

    fn header(&self) -> Vec<u8> {
        let header_len = match self.pixel_format {
            PixelFormat::Dx10(_) => DDS_DX10_TOTAL_HEADER_SIZE,
            _ => DDS_HEADER_SIZE,
        };
        let mut data = vec![0u8; header_len];

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;
        if self.mip_maps.is_some() {
            flags |= DDSD_MIPMAPCOUNT;
        }

        let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };
        unsafe {
            writer.write_u32_at(DDS_MAGIC, 0);
            writer.write_u32_at(124, 4);
            writer.write_u32_at(flags, DDS_FLAGS_OFFSET as isize);
            writer.write_u32_at(self.height, DDS_HEIGHT_OFFSET as isize);
            writer.write_u32_at(self.width, DDS_WIDTH_OFFSET as isize);
            writer.write_u32_at(self.mip_maps.unwrap_or(0), DDS_MIPMAP_COUNT_OFFSET as isize);

            match self.pixel_format {
                PixelFormat::FourCC(fourcc) => {
                    writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                    writer.write_u32_at(u32::from_le_bytes(fourcc), FOURCC_OFFSET as isize);
                }
                PixelFormat::Dx10(dxgi_format) => {
                    writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                    writer.write_u32_at(FOURCC_DX10, FOURCC_OFFSET as isize);
                    writer.write_u32_at(dxgi_format, DX10_FORMAT_OFFSET as isize);
                    writer.write_u32_at(3, DX10_RESOURCE_DIMENSION_OFFSET as isize);
                    writer.write_u32_at(1, DX10_ARRAY_SIZE_OFFSET as isize);
                }
                PixelFormat::Masks {
                    bits,
                    masks,
                    alpha_pixels,
                } => {
                    let pf_flags = match alpha_pixels {
                        true => DDPF_RGB | DDPF_ALPHAPIXELS,
                        false => DDPF_RGB,
                    };
                    writer.write_u32_at(pf_flags, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
                    writer.write_u32_at(bits, DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET as isize);
                    writer.write_u32_at(masks.r, DDS_PIXELFORMAT_RBITMASK_OFFSET as isize);
                    writer.write_u32_at(masks.g, DDS_PIXELFORMAT_GBITMASK_OFFSET as isize);
                    writer.write_u32_at(masks.b, DDS_PIXELFORMAT_BBITMASK_OFFSET as isize);
                    writer.write_u32_at(masks.a, DDS_PIXELFORMAT_ABITMASK_OFFSET as isize);
                }
            }
        }
        data
    }

    /// Header followed by the payload.
    pub fn build(&self) -> Vec<u8> {
        let mut data = self.header();
        data.extend_from_slice(&self.payload);
        data
    }
}

/// `blocks` BC1 blocks that all decode to the 565 `color`.
pub fn solid_bc1_payload(color: u16, blocks: usize) -> Vec<u8> {
    let [lo, hi] = color.to_le_bytes();
    [lo, hi, lo, hi, 0, 0, 0, 0].repeat(blocks)
}

/// Rents from the heap and remembers the largest size asked for.
#[derive(Debug, Default)]
pub struct LargestRent(AtomicUsize);

impl LargestRent {
    pub fn largest(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

impl BufferAllocator for LargestRent {
    fn rent(&self, size: usize) -> Result<RawBuffer, AllocateError> {
        self.0.fetch_max(size, Ordering::AcqRel);
        HeapAllocator.rent(size)
    }

    fn release(&self, buffer: RawBuffer) {
        HeapAllocator.release(buffer);
    }
}

/// A reader that returns at most `max_read` bytes per call, so that windows straddle refills.
pub struct ChunkedReader {
    data: Vec<u8>,
    position: usize,
    max_read: usize,
}

impl ChunkedReader {
    pub fn new(data: Vec<u8>, max_read: usize) -> Self {
        Self {
            data,
            position: 0,
            max_read,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = &self.data[self.position..];
        let n = remaining.len().min(buf.len()).min(self.max_read);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}
