//! The bitstream module forms the bit-level I/O layer of the cmpt365 compressor.
//!
//! Huffman codes are not byte aligned, so the packer keeps a bit queue and
//! emits bytes as they fill, most significant bit first; the reader walks
//! the packed bytes back one bit at a time in the same order. Both sides
//! work on in-memory buffers - the whole pixel block of one image is
//! materialized at once, so there is no streaming to coordinate.
//!
//! This layer is designed for the needs of this codec. It has not been
//! generalized for wider use.
//!
pub mod bitpacker;
pub mod bitreader;
