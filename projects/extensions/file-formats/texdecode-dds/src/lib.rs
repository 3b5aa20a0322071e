#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

/// DDS header parsing and format selection.
pub mod dds;

/// Payload decoding.
pub mod decode;

pub use dds::{likely_dds, DdsFormat, DdsHeader};
pub use decode::{decode_dds, DdsImage};

#[cfg(test)]
mod test_prelude;
