//! The compression module manages both directions of the cmpt365 pipeline.
//!
//! Compression happens in the following steps:
//! - Bitmap parsing: extract the header fields, colour table and raw pixel block.
//! - Frequency counting: one bucket per byte value over the whole pixel block.
//! - Code length derivation: greedy huffman tree merging with a fixed tie-break.
//! - Canonical code assignment: prefix-free bit patterns from the lengths alone.
//! - Bit packing: pixel bytes to a packed bitstream plus an exact bit count.
//! - Container serialization: the .cmpt365 layout, little-endian throughout.
//!
//! Decompression is the inverse. The container stores only the 256 code
//! lengths, so the decoder rebuilds the canonical codes, walks the payload
//! one bit at a time until the stored bit count runs out, and reassembles
//! a standard BMP from the recovered pixel block and metadata.
//!
//! Both directions run on the calling thread to completion. The compressed
//! bytes depend on nothing but the input bytes, so compressing the same
//! image twice produces identical containers.
//!
pub mod compress;
pub mod container;
pub mod decompress;
