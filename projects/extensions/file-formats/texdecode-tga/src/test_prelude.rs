//! Common test imports and utilities for TGA tests
#![allow(unused_imports)]

pub use rstest::rstest;

use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use texdecode_common::allocate::{AllocateError, BufferAllocator, HeapAllocator, RawBuffer};

/// Colormap fields and stored entries.
#[derive(Clone)]
struct Colormap {
    origin: u16,
    depth: u8,
    entries: Vec<u8>,
}

/// Builds TGA files for tests.
#[derive(Clone)]
pub struct TgaBuilder {
    image_type: u8,
    width: u16,
    height: u16,
    pixel_depth: u8,
    x_origin: u16,
    y_origin: u16,
    descriptor: u8,
    colormap: Option<Colormap>,
    image_id: Vec<u8>,
    payload: Vec<u8>,
}

impl TgaBuilder {
    pub fn new(image_type: u8, width: u16, height: u16, pixel_depth: u8) -> Self {
        Self {
            image_type,
            width,
            height,
            pixel_depth,
            x_origin: 0,
            y_origin: 0,
            descriptor: 0,
            colormap: None,
            image_id: Vec::new(),
            payload: Vec::new(),
        }
    }

    pub fn origin(mut self, x: u16, y: u16) -> Self {
        self.x_origin = x;
        self.y_origin = y;
        self
    }

    pub fn descriptor(mut self, descriptor: u8) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Adds a colormap. Its length is the number of whole entries in `entries`.
    pub fn colormap(mut self, origin: u16, depth: u8, entries: Vec<u8>) -> Self {
        self.colormap = Some(Colormap {
            origin,
            depth,
            entries,
        });
        self
    }

    pub fn image_id(mut self, id: &[u8]) -> Self {
        self.image_id = id.to_vec();
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// Fills the payload with every pixel of the image.
    ///
    /// Run-length types get alternating runs of 3 and raw packets of 2.
    pub fn patterned_payload(mut self) -> Self {
        let bpp = (self.pixel_depth as usize).div_ceil(8);
        let pixels = self.width as usize * self.height as usize;
        let mut counter = 0usize;
        let mut next_pixel = |out: &mut Vec<u8>| {
            for _ in 0..bpp {
                out.push((counter * 31 + counter / 7) as u8);
                counter += 1;
            }
        };

        let mut payload = Vec::new();
        match self.image_type {
            9..=11 => {
                let mut left = pixels;
                let mut run = true;
                while left > 0 {
                    let count = left.min(if run { 3 } else { 2 });
                    match run {
                        true => {
                            payload.push(0x80 | (count as u8 - 1));
                            next_pixel(&mut payload);
                        }
                        false => {
                            payload.push(count as u8 - 1);
                            for _ in 0..count {
                                next_pixel(&mut payload);
                            }
                        }
                    }
                    left -= count;
                    run = !run;
                }
            }
            _ => {
                for _ in 0..pixels {
                    next_pixel(&mut payload);
                }
            }
        }
        self.payload = payload;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (map_type, origin, length, map_depth) = match &self.colormap {
            Some(map) => {
                let entry_bytes = (map.depth as usize).div_ceil(8).max(1);
                (1u8, map.origin, (map.entries.len() / entry_bytes) as u16, map.depth)
            }
            None => (0, 0, 0, 0),
        };

        let mut data = vec![self.image_id.len() as u8, map_type, self.image_type];
        data.extend_from_slice(&origin.to_le_bytes());
        data.extend_from_slice(&length.to_le_bytes());
        data.push(map_depth);
        for field in [self.x_origin, self.y_origin, self.width, self.height] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.push(self.pixel_depth);
        data.push(self.descriptor);

        data.extend_from_slice(&self.image_id);
        if let Some(map) = &self.colormap {
            data.extend_from_slice(&map.entries);
        }
        data.extend_from_slice(&self.payload);
        data
    }
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
