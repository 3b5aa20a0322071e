use super::constants::*;

/// Determines if the given data likely represents a DDS texture.
/// This is done by checking the 'MAGIC' header, 'DDS ' at offset 0.
/// The rest of the header is validated by [`parse_dds_header`].
///
/// [`parse_dds_header`]: crate::dds::parse_dds::parse_dds_header
#[inline(always)]
pub fn likely_dds(data: &[u8]) -> bool {
    // from_le_bytes ensures correct reading on all platforms since DDS is little-endian.
    matches!(data.first_chunk::<4>(), Some(magic) if u32::from_le_bytes(*magic) == DDS_MAGIC)
}
