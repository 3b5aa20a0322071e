#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod allocate;
pub mod color_565;
pub mod color_8888;
pub mod config;
pub mod decoded_4x4_block;
pub mod error;
pub mod image_format;
pub mod mip_chain;
pub mod normalize;
pub mod rows;
pub mod stream;
pub mod surface;

#[cfg(test)]
mod test_prelude;
