/// Shared constants between modules.
pub mod constants;

/// Map header fields to a decoder.
pub mod dds_format;

/// Determine if a file is a DDS file.
pub mod likely_dds;

/// Parse the DDS header.
pub mod parse_dds;

pub use dds_format::*;
pub use likely_dds::*;
pub use parse_dds::*;
