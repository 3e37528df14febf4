//! The huffman_coding module derives the code tables for the cmpt365 compressor.
//!
//! Coding happens in two steps, and only the first ever sees the pixel
//! data. First a code length is derived for every byte value that occurs,
//! by greedily merging the two lowest-frequency nodes until one tree
//! remains - with a fixed tie-break, because the tree shape decides the
//! lengths and the lengths decide every bit that gets written. Then the
//! lengths alone are turned into canonical prefix-free codes, which is why
//! the container only has to store 256 length bytes and not the codes
//! themselves: the decoder rebuilds the identical code table from the
//! lengths.
//!
pub mod canonical;
pub mod code_lengths;
