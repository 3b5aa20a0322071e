#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

/// Container detection and the decode entry points.
pub mod api;

/// The decoded image returned by the entry points.
pub mod image;

pub use api::{decode_from_reader, decode_from_slice, detect_container, Container};
pub use image::{DecodedImage, ImageKind};

// Re-export the types callers need to configure a decode and read its result.
pub use texdecode_common::allocate::{BufferAllocator, HeapAllocator, PoolAllocator};
pub use texdecode_common::config::Config;
pub use texdecode_common::error::{DecodeError, InvalidHeaderReason};
pub use texdecode_common::image_format::ImageFormat;
pub use texdecode_common::mip_chain::MipDescriptor;

#[cfg(test)]
mod test_prelude;
