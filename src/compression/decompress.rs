//! Whole-file decompression driver and the bit unpacker.

use std::time::Instant;

use log::{debug, info};

use crate::bitmap::parser::Bitmap;
use crate::bitmap::writer;
use crate::bitstream::bitreader::BitReader;
use crate::compression::compress::write_output;
use crate::compression::container::Container;
use crate::error::{CodecError, Result};
use crate::huffman_coding::canonical::decode_map;
use crate::tools::cli::CmpOpts;

/// Decode a packed payload back into the original byte sequence.
///
/// The canonical codes are rebuilt from the stored lengths and walked
/// against the payload one bit at a time, most significant bit first.
/// Exactly `bit_length` bits are consumed; whatever is left in the final
/// byte is padding and stays unexamined. A payload that runs dry early, or
/// a bit pattern no code ever completes, means the container does not match
/// its own length table.
pub fn unpack(payload: &[u8], bit_length: u64, lengths: &[u8; 256]) -> Result<Vec<u8>> {
    // A real tree over a 32-bit byte count never gets near 64-bit codes,
    // so longer declared lengths can only come from a corrupt table.
    if lengths.iter().any(|&len| len > 64) {
        return Err(CodecError::MalformedContainer(
            "code length table entry exceeds 64 bits",
        ));
    }
    let decode = decode_map(lengths);
    if decode.is_empty() {
        if bit_length > 0 {
            return Err(CodecError::MalformedContainer(
                "bit length declared but the code length table is empty",
            ));
        }
        return Ok(Vec::new());
    }
    // No code is longer than the longest length in the table, so an
    // accumulator past that point can never match anything.
    let max_length = decode.keys().map(|&(_, len)| len).max().unwrap_or(0);

    let mut reader = BitReader::new(payload);
    let mut output = Vec::new();
    let mut value = 0_u64;
    let mut length = 0_u8;
    for _ in 0..bit_length {
        let bit = reader.bit().ok_or(CodecError::MalformedContainer(
            "payload ends before the declared bit length",
        ))?;
        value = value << 1 | bit as u64;
        length += 1;
        if let Some(&symbol) = decode.get(&(value, length)) {
            output.push(symbol);
            value = 0;
            length = 0;
        } else if length >= max_length {
            return Err(CodecError::MalformedContainer(
                "bitstream does not match the code length table",
            ));
        }
    }
    if length != 0 {
        return Err(CodecError::MalformedContainer(
            "bitstream ends in the middle of a code",
        ));
    }
    Ok(output)
}

/// Decompress a .cmpt365 container buffer into standard BMP file bytes.
pub fn decompress_bytes(container_bytes: &[u8]) -> Result<Vec<u8>> {
    let container = Container::parse(container_bytes)?;
    debug!(
        "Container: {}x{} at {} bpp, {} payload bytes.",
        container.width,
        container.height,
        container.bits_per_pixel,
        container.payload.len()
    );

    let pixel_data = unpack(
        &container.payload,
        container.bit_length,
        &container.code_lengths,
    )?;
    if pixel_data.len() != container.pixel_data_size as usize {
        return Err(CodecError::MalformedContainer(
            "decoded size does not match the declared pixel data size",
        ));
    }

    let bitmap = Bitmap {
        file_size: container.original_file_size,
        width: container.width,
        height: container.height,
        bits_per_pixel: container.bits_per_pixel,
        colour_table: container.colour_table,
        pixel_data,
    };
    Ok(writer::write(&bitmap))
}

/// Decompress the container named in opts and write a BMP next to it.
pub fn decompress(opts: &CmpOpts) -> Result<()> {
    let start = Instant::now();

    let container_bytes = std::fs::read(&opts.file)?;
    let out = decompress_bytes(&container_bytes)?;

    let outname = opts.output_path();
    write_output(&outname, &out, opts.force)?;

    info!("Decompressed {} -> {}.", &opts.file, &outname);
    info!(
        "Decompressed size: {} bytes. Time: {:.2} ms.",
        out.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
