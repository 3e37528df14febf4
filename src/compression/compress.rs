//! Whole-file compression driver.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::time::Instant;

use log::{debug, info, warn};

use crate::bitmap::parser;
use crate::bitstream::bitpacker::pack;
use crate::compression::container::Container;
use crate::error::{CodecError, Result};
use crate::huffman_coding::canonical::canonical_codes;
use crate::huffman_coding::code_lengths::code_lengths;
use crate::tools::cli::CmpOpts;
use crate::tools::freq_count::freqs;

/// Compress a BMP byte buffer into the bytes of a .cmpt365 container.
///
/// The result depends on nothing but the input bytes: the tree tie-break
/// and the canonical assignment are pure functions of the pixel block, so
/// the same image always produces an identical container.
pub fn compress_bytes(bmp_bytes: &[u8]) -> Result<Vec<u8>> {
    let bitmap = parser::parse(bmp_bytes)?;
    let pixel_data_size = u32::try_from(bitmap.pixel_data.len())
        .map_err(|_| CodecError::MalformedContainer("pixel block larger than 4 GiB"))?;

    let freq_table = freqs(&bitmap.pixel_data);
    let lengths = code_lengths(&freq_table);
    let codes = canonical_codes(&lengths);
    let (payload, bit_length) = pack(&bitmap.pixel_data, &codes)?;
    debug!(
        "Packed {} pixel bytes into {} bits.",
        bitmap.pixel_data.len(),
        bit_length
    );

    let container = Container {
        original_file_size: bitmap.file_size,
        width: bitmap.width,
        height: bitmap.height,
        bits_per_pixel: bitmap.bits_per_pixel,
        colour_table: bitmap.colour_table,
        pixel_data_size,
        code_lengths: lengths,
        bit_length,
        payload,
    };
    Ok(container.serialize())
}

/// Compress the input file named in opts and write the container next to it.
pub fn compress(opts: &CmpOpts) -> Result<()> {
    let start = Instant::now();

    let bmp_bytes = std::fs::read(&opts.file)?;
    let out = compress_bytes(&bmp_bytes)?;

    let outname = opts.output_path();
    write_output(&outname, &out, opts.force)?;

    info!("Compressed {} -> {}.", &opts.file, &outname);
    info!(
        "Original size: {} bytes. Compressed size: {} bytes. Ratio: {:.4}. Time: {:.2} ms.",
        bmp_bytes.len(),
        out.len(),
        bmp_bytes.len() as f64 / out.len() as f64,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Write an output file, refusing to clobber an existing one unless forced.
pub(crate) fn write_output(path: &str, bytes: &[u8], force: bool) -> Result<()> {
    let mut f_out = if force {
        File::create(path)?
    } else {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| {
                if err.kind() == io::ErrorKind::AlreadyExists {
                    warn!("{} already exists. Use --force to overwrite.", path);
                }
                err
            })?
    };
    f_out.write_all(bytes)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitmap::test_images::{indexed_bmp, rgb_bmp};

    #[test]
    fn produces_a_parseable_container() {
        let bmp = rgb_bmp(5, 4);
        let bitmap = parser::parse(&bmp).unwrap();
        let container = Container::parse(&compress_bytes(&bmp).unwrap()).unwrap();
        assert_eq!(container.width, 5);
        assert_eq!(container.height, 4);
        assert_eq!(container.bits_per_pixel, 24);
        assert_eq!(container.original_file_size, bmp.len() as u32);
        assert_eq!(container.pixel_data_size as usize, bitmap.pixel_data.len());
        assert!(container.colour_table.is_none());
    }

    #[test]
    fn carries_the_colour_table() {
        let container = Container::parse(&compress_bytes(&indexed_bmp(4, 6, 3)).unwrap()).unwrap();
        assert_eq!(container.colour_table, Some(crate::bitmap::test_images::palette(4)));
    }

    #[test]
    fn bit_length_is_the_sum_of_code_lengths() {
        let bmp = indexed_bmp(8, 7, 5);
        let bitmap = parser::parse(&bmp).unwrap();
        let container = Container::parse(&compress_bytes(&bmp).unwrap()).unwrap();
        let expected: u64 = bitmap
            .pixel_data
            .iter()
            .map(|&b| container.code_lengths[b as usize] as u64)
            .sum();
        assert_eq!(container.bit_length, expected);
        // The payload holds exactly the bits plus final-byte padding.
        assert_eq!(container.payload.len() as u64, (container.bit_length + 7) / 8);
    }

    #[test]
    fn compression_is_deterministic() {
        let bmp = rgb_bmp(9, 9);
        assert_eq!(compress_bytes(&bmp).unwrap(), compress_bytes(&bmp).unwrap());
    }

    #[test]
    fn rejects_non_bmp_input() {
        assert!(compress_bytes(b"PNG not really").is_err());
    }
}
