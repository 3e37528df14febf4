//! Reassembles a standard BMP byte buffer from decompressed parts.
//!
//! The output uses the same 54-byte file+info header layout the parser
//! expects: any colour table directly after the header, then the pixel
//! block exactly as it was stored (row-padded, bottom-up). Feeding the
//! result back through the parser yields the original fields.

use crate::bitmap::parser::{Bitmap, HEADER_SIZE};

/// Serialize a bitmap back into BMP file bytes.
pub fn write(bitmap: &Bitmap) -> Vec<u8> {
    let table_len = bitmap.colour_table.as_ref().map_or(0, |t| t.len());
    let pixel_data_offset = HEADER_SIZE + table_len;
    let file_size = pixel_data_offset + bitmap.pixel_data.len();

    let mut out = Vec::with_capacity(file_size);

    // File header (14 bytes).
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0_u8; 4]); // reserved
    out.extend_from_slice(&(pixel_data_offset as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes).
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&bitmap.width.to_le_bytes());
    out.extend_from_slice(&bitmap.height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1_u16.to_le_bytes()); // planes
    out.extend_from_slice(&bitmap.bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes()); // compression: none
    out.extend_from_slice(&(bitmap.pixel_data.len() as u32).to_le_bytes());
    out.extend_from_slice(&2835_u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835_u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&((table_len / 4) as u32).to_le_bytes()); // colours used
    out.extend_from_slice(&0_u32.to_le_bytes()); // important colours

    if let Some(table) = &bitmap.colour_table {
        out.extend_from_slice(table);
    }
    out.extend_from_slice(&bitmap.pixel_data);
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitmap::parser::parse;
    use crate::bitmap::test_images::{indexed_bmp, rgb_bmp};

    #[test]
    fn parse_of_written_bitmap_preserves_fields() {
        for bmp in [rgb_bmp(5, 3), indexed_bmp(8, 5, 3), indexed_bmp(1, 11, 2)] {
            let original = parse(&bmp).unwrap();
            let rebuilt = parse(&write(&original)).unwrap();
            assert_eq!(rebuilt.width, original.width);
            assert_eq!(rebuilt.height, original.height);
            assert_eq!(rebuilt.bits_per_pixel, original.bits_per_pixel);
            assert_eq!(rebuilt.colour_table, original.colour_table);
            assert_eq!(rebuilt.pixel_data, original.pixel_data);
        }
    }

    #[test]
    fn written_header_is_54_bytes_with_correct_offset() {
        let bitmap = parse(&indexed_bmp(8, 4, 2)).unwrap();
        let out = write(&bitmap);
        assert_eq!(&out[0..2], b"BM");
        let offset = u32::from_le_bytes([out[10], out[11], out[12], out[13]]);
        assert_eq!(offset as usize, 54 + 4 * 4);
        let declared = u32::from_le_bytes([out[2], out[3], out[4], out[5]]);
        assert_eq!(declared as usize, out.len());
    }
}
