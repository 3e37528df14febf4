//! The bitmap module handles the uncompressed Windows BMP format for the cmpt365 compressor.
//!
//! Only plain, uncompressed BMPs are in scope: `BM` signature, the common
//! 54-byte file+info header, bottom-up row order, rows padded to a 4-byte
//! boundary. Compressed variants, 16/32 bpp pixel decoding and alpha
//! channels are not supported.
//!
//! The pieces are:
//! - parser: pull the header fields, colour table and raw pixel block out of a BMP byte buffer.
//! - pixels: per-depth (x, y) -> RGB sample extraction for 1, 4, 8 and 24 bpp.
//! - writer: reassemble a standard BMP byte buffer after decompression.
//!
pub mod parser;
pub mod pixels;
pub mod writer;

#[cfg(test)]
pub mod test_images;

pub use parser::Bitmap;
pub use pixels::{PixelFormat, Rgb};
