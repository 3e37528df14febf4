//! Packs variable-length codes into a byte buffer, tracking the exact bit count.

use log::error;

use crate::error::{CodecError, Result};
use crate::huffman_coding::canonical::CodeTable;

/// Creates a packed bitstream for output.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into
    /// the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bits pushed so far, excluding any final padding.
    bit_count: u64,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified.
    /// Call flush() before reading the output or bits may be left in the
    /// internal queue.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
            bit_count: 0,
        }
    }

    /// Internal bitstream write function common to the push functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Push one code of `length` bits, aligned to the least significant bit
    /// of `code`. The queue drains after every push, so `length` may be
    /// anything up to 56 bits - far above what a 256-symbol tree over a
    /// 32-bit byte count can produce.
    pub fn push_code(&mut self, code: u64, length: u8) {
        debug_assert!(self.q_bits as u32 + length as u32 <= 64);
        self.queue <<= length; //shift queue by bit length
        self.queue |= code; //add the code to the queue
        self.q_bits += length; //update depth of queue bits
        self.bit_count += length as u64;
        self.write_stream();
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in
    /// the least significant bits. The padding is not counted in
    /// bit_length().
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Total encoded bits pushed so far. Trailing pad bits from flush() are
    /// excluded, so after encoding this equals the sum of the code lengths
    /// of every input symbol.
    pub fn bit_length(&self) -> u64 {
        self.bit_count
    }
}

/// Encode a byte sequence with a canonical code table. Returns the packed
/// bytes and the exact encoded bit count (excluding final padding).
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, u64)> {
    // Worst case is no compression at all: one byte per byte.
    let mut packer = BitPacker::new(data.len());
    for &byte in data {
        let (code, length) = codes.get(byte);
        if length == 0 {
            // Only reachable with a table built from different data.
            return Err(CodecError::MalformedContainer(
                "pixel byte has no entry in the code table",
            ));
        }
        packer.push_code(code, length);
    }
    packer.flush();
    Ok((packer.output, packer.bit_count))
}
