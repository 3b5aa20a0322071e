//! Little endian bit reader over a 16-byte block, as used by BC6H and BC7.

/// Reads bits from the low end of a 128-bit block, least significant bit first.
#[derive(Debug, Clone, Copy)]
pub struct Bitstream {
    low: u64,
    high: u64,
}

impl Bitstream {
    /// Wraps a 16-byte block.
    #[inline]
    pub fn new(block: &[u8; 16]) -> Self {
        let value = u128::from_le_bytes(*block);
        Self {
            low: value as u64,
            high: (value >> 64) as u64,
        }
    }

    /// Reads `count` bits (at most 32).
    #[inline]
    pub fn read(&mut self, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }

        let mask = (1u64 << count) - 1;
        let bits = self.low & mask;
        self.low = (self.low >> count) | ((self.high & mask) << (64 - count));
        self.high >>= count;
        bits as u32
    }

    /// Reads one bit.
    #[inline]
    pub fn read_bit(&mut self) -> u32 {
        self.read(1)
    }

    /// Reads `count` bits and reverses their order.
    #[inline]
    pub fn read_reversed(&mut self, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        self.read(count).reverse_bits() >> (32 - count)
    }
}
