//! Error type shared by every stage of the codec.
//!
//! Format and size-validation failures are raised at the point of parsing
//! and carry a distinct variant per failure class, so callers can tell a
//! bad BMP from a bad container from a truncated container. IO errors pass
//! through unchanged.

use std::io;

/// Failure modes of the compress/decompress pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input does not start with the `BM` bitmap signature.
    #[error("not a BMP file (missing BM signature)")]
    NotABitmap,

    /// The input does not start with the `CMPT365` container magic.
    #[error("not a .cmpt365 compressed file (bad magic)")]
    NotACompressedFile,

    /// Pixel extraction was attempted at a bit depth the codec does not decode.
    #[error("unsupported bit depth: {0} bpp")]
    UnsupportedBitDepth(u16),

    /// A declared size is inconsistent with the actual buffer contents.
    #[error("malformed container: {0}")]
    MalformedContainer(&'static str),

    /// Read/write/open failure on the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
