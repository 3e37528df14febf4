//! Lossless compressor for uncompressed Windows BMP bitmaps.
//!
//! Version 0.1.0
//!
//! Compresses the raw pixel section of a BMP into a `.cmpt365` container
//! using a canonical Huffman code built from the pixel byte frequencies,
//! and reverses the process to recover the original pixel data bit for bit.
//!
//! The pipeline runs in this order when compressing:
//! - Bitmap parsing: pull width, height, bit depth, colour table and the raw
//!   (row-padded, bottom-up) pixel block out of the BMP byte buffer.
//! - Frequency counting: one bucket per byte value over the whole pixel block.
//! - Code length derivation: greedy two-lowest-node merging with a fixed
//!   tie-break, so encode and decode always agree on the tree shape.
//! - Canonical code assignment: concrete prefix-free bit patterns from the
//!   length table alone.
//! - Bit packing: the pixel bytes become a packed bitstream.
//! - Container serialization: metadata + colour table + length table +
//!   packed payload, all little-endian.
//!
//! Decompression walks the same stages in reverse, rebuilding the codes from
//! the stored length table.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> cmpt365 -z image.bmp`
//!
//! This will compress the file and create the file image.cmpt365.
//! `cmpt365 -d image.cmpt365` recovers a standard BMP from the container.
//!
pub mod bitmap;
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{CodecError, Result};
