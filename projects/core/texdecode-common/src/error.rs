//! Error types shared by every decoder.

use crate::allocate::AllocateError;
use thiserror::Error;

/// An error that happened while decoding an image.
///
/// Every variant is terminal for the decode attempt that produced it. Buffers rented before the
/// failure are released before the error reaches the caller.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Fewer bytes were available than the minimum header size.
    #[error("Header is truncated. Required {required} bytes, got {actual}.")]
    TruncatedHeader {
        /// Bytes needed to parse the header.
        required: usize,
        /// Bytes that were available.
        actual: usize,
    },

    /// The header has the right length but carries an out-of-range field.
    #[error("Invalid header: {0}")]
    InvalidHeader(InvalidHeaderReason),

    /// A well-formed header describes a format that has no decoder.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The scan direction is recognized but not implemented.
    #[error("Unsupported scanline orientation: {0}")]
    UnsupportedOrientation(&'static str),

    /// The source ran out before the declared pixel or block count was satisfied.
    #[error("Image data is truncated. Required {required} bytes, got {actual}.")]
    TruncatedData {
        /// Bytes needed to complete the decode step.
        required: usize,
        /// Bytes that were available.
        actual: usize,
    },

    /// A buffer could not be rented.
    #[error(transparent)]
    Allocation(#[from] AllocateError),

    /// The underlying reader failed during a refill.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The specific out-of-range field behind [`DecodeError::InvalidHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidHeaderReason {
    /// The block container magic did not match.
    #[error("bad magic {0:#010X}")]
    BadMagic(u32),

    /// The scanline image type byte is not one of the known values.
    #[error("unknown image type {0}")]
    UnknownImageType(u8),

    /// The declared palette origin lies beyond the palette length.
    #[error("palette origin {origin} exceeds palette length {length}")]
    PaletteOriginOutOfRange {
        /// First palette entry index.
        origin: u16,
        /// Number of palette entries.
        length: u16,
    },

    /// Width or height is zero.
    #[error("zero dimension ({width}x{height})")]
    ZeroDimension {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Bits per pixel is zero.
    #[error("zero pixel depth")]
    ZeroPixelDepth,

    /// The decoded size of the image does not fit in the address space.
    #[error("dimensions {width}x{height} are too large to decode")]
    DimensionsTooLarge {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
}

impl From<InvalidHeaderReason> for DecodeError {
    fn from(reason: InvalidHeaderReason) -> Self {
        DecodeError::InvalidHeader(reason)
    }
}

/// Returns [`DecodeError::TruncatedData`] unless `actual >= required`.
#[inline]
pub fn ensure_data(required: usize, actual: usize) -> Result<(), DecodeError> {
    if actual < required {
        return Err(DecodeError::TruncatedData { required, actual });
    }
    Ok(())
}

/// Returns [`DecodeError::TruncatedHeader`] unless `actual >= required`.
#[inline]
pub fn ensure_header(required: usize, actual: usize) -> Result<(), DecodeError> {
    if actual < required {
        return Err(DecodeError::TruncatedHeader { required, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(10, 9, false)]
    #[case(10, 10, true)]
    #[case(0, 0, true)]
    fn ensure_helpers_compare_lengths(
        #[case] required: usize,
        #[case] actual: usize,
        #[case] ok: bool,
    ) {
        assert_eq!(ensure_data(required, actual).is_ok(), ok);
        match ensure_header(required, actual) {
            Ok(()) => assert!(ok),
            Err(DecodeError::TruncatedHeader {
                required: r,
                actual: a,
            }) => {
                assert!(!ok);
                assert_eq!((r, a), (required, actual));
            }
            Err(e) => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn invalid_header_message_names_reason() {
        let error: DecodeError = InvalidHeaderReason::UnknownImageType(7).into();
        assert_eq!(error.to_string(), "Invalid header: unknown image type 7");
    }
}
