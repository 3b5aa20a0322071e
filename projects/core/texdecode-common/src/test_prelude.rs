//! Common test imports and utilities for texdecode-common tests
#![allow(unused_imports)]

pub use rstest::rstest;
pub use std::io::Read;

/// A reader that returns at most `max_read` bytes per call, so that windows straddle refills.
pub(crate) struct ChunkedReader {
    data: Vec<u8>,
    position: usize,
    max_read: usize,
}

impl ChunkedReader {
    pub(crate) fn new(data: Vec<u8>, max_read: usize) -> Self {
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
