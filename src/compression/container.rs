//! The .cmpt365 container: metadata, colour table, code lengths and payload.
//!
//! Byte layout, all multi-byte integers little-endian:
//!
//! | offset            | size | field                          |
//! |-------------------|------|--------------------------------|
//! | 0                 | 7    | magic `CMPT365`                |
//! | 7                 | 4    | original file size             |
//! | 11                | 4    | width                          |
//! | 15                | 4    | height                         |
//! | 19                | 2    | bits per pixel                 |
//! | 21                | 4    | colour table size (0 if none)  |
//! | 25                | 4    | pixel data size                |
//! | 29                | n    | colour table bytes             |
//! | 29+n              | 256  | code length table, 1 byte each |
//! | +256              | 8    | bit length of the payload      |
//! | +8                | rest | packed payload                 |

use crate::error::{CodecError, Result};

/// The seven magic bytes at the front of every container.
pub const MAGIC: &[u8; 7] = b"CMPT365";

/// Fixed bytes before the colour table.
const FIXED_HEADER: usize = 29;

/// One compressed image, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Declared size of the BMP this was compressed from.
    pub original_file_size: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub colour_table: Option<Vec<u8>>,
    /// Byte length of the uncompressed pixel block.
    pub pixel_data_size: u32,
    /// Huffman code length per byte value; zero marks an absent symbol.
    pub code_lengths: [u8; 256],
    /// Exact encoded bit count, excluding the final byte's padding.
    pub bit_length: u64,
    /// The packed bitstream.
    pub payload: Vec<u8>,
}

impl Container {
    /// Serialize to the on-disk layout.
    pub fn serialize(&self) -> Vec<u8> {
        let table_len = self.colour_table.as_ref().map_or(0, |t| t.len());
        let mut out =
            Vec::with_capacity(FIXED_HEADER + table_len + 256 + 8 + self.payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.original_file_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&(table_len as u32).to_le_bytes());
        out.extend_from_slice(&self.pixel_data_size.to_le_bytes());
        if let Some(table) = &self.colour_table {
            out.extend_from_slice(table);
        }
        out.extend_from_slice(&self.code_lengths);
        out.extend_from_slice(&self.bit_length.to_le_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parse a container from its on-disk bytes. Fails with
    /// `NotACompressedFile` on a magic mismatch and `MalformedContainer`
    /// when a declared size runs past the end of the buffer.
    pub fn parse(bytes: &[u8]) -> Result<Container> {
        if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
            return Err(CodecError::NotACompressedFile);
        }
        if bytes.len() < FIXED_HEADER {
            return Err(CodecError::MalformedContainer(
                "container shorter than its fixed header",
            ));
        }

        let original_file_size = read_u32(bytes, 7);
        let width = read_u32(bytes, 11);
        let height = read_u32(bytes, 15);
        let bits_per_pixel = u16::from_le_bytes([bytes[19], bytes[20]]);
        let colour_table_size = read_u32(bytes, 21) as usize;
        let pixel_data_size = read_u32(bytes, 25);

        let mut at = FIXED_HEADER;
        let colour_table = if colour_table_size > 0 {
            if at + colour_table_size > bytes.len() {
                return Err(CodecError::MalformedContainer(
                    "colour table runs past the end of the container",
                ));
            }
            let table = bytes[at..at + colour_table_size].to_vec();
            at += colour_table_size;
            Some(table)
        } else {
            None
        };

        if at + 256 + 8 > bytes.len() {
            return Err(CodecError::MalformedContainer(
                "code length table runs past the end of the container",
            ));
        }
        let mut code_lengths = [0_u8; 256];
        code_lengths.copy_from_slice(&bytes[at..at + 256]);
        at += 256;

        let bit_length = u64::from_le_bytes([
            bytes[at],
            bytes[at + 1],
            bytes[at + 2],
            bytes[at + 3],
            bytes[at + 4],
            bytes[at + 5],
            bytes[at + 6],
            bytes[at + 7],
        ]);
        at += 8;

        Ok(Container {
            original_file_size,
            width,
            height,
            bits_per_pixel,
            colour_table,
            pixel_data_size,
            code_lengths,
            bit_length,
            payload: bytes[at..].to_vec(),
        })
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_container() -> Container {
        let mut code_lengths = [0_u8; 256];
        code_lengths[5] = 1;
        code_lengths[7] = 1;
        Container {
            original_file_size: 1000,
            width: 12,
            height: 7,
            bits_per_pixel: 8,
            colour_table: Some(vec![1, 2, 3, 0, 4, 5, 6, 0]),
            pixel_data_size: 4,
            code_lengths,
            bit_length: 4,
            payload: vec![0x10],
        }
    }

    #[test]
    fn round_trips_every_field() {
        let container = sample_container();
        assert_eq!(Container::parse(&container.serialize()).unwrap(), container);
    }

    #[test]
    fn round_trips_without_a_colour_table() {
        let mut container = sample_container();
        container.colour_table = None;
        container.bits_per_pixel = 24;
        assert_eq!(Container::parse(&container.serialize()).unwrap(), container);
    }

    #[test]
    fn layout_is_byte_exact() {
        let container = sample_container();
        let bytes = container.serialize();
        assert_eq!(&bytes[0..7], b"CMPT365");
        assert_eq!(u32::from_le_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]), 1000);
        assert_eq!(u16::from_le_bytes([bytes[19], bytes[20]]), 8);
        // Colour table size 8, so the length table starts at 37.
        assert_eq!(u32::from_le_bytes([bytes[21], bytes[22], bytes[23], bytes[24]]), 8);
        assert_eq!(bytes[37 + 5], 1);
        assert_eq!(bytes[37 + 7], 1);
        // Bit length sits after the 256 length bytes; payload is last.
        assert_eq!(bytes[37 + 256], 4);
        assert_eq!(*bytes.last().unwrap(), 0x10);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample_container().serialize();
        bytes[0] = b'X';
        assert!(matches!(
            Container::parse(&bytes),
            Err(CodecError::NotACompressedFile)
        ));
        assert!(matches!(
            Container::parse(b"CMP"),
            Err(CodecError::NotACompressedFile)
        ));
    }

    #[test]
    fn rejects_truncated_colour_table() {
        let bytes = sample_container().serialize();
        // Cut inside the colour table.
        assert!(matches!(
            Container::parse(&bytes[..31]),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn rejects_truncated_length_table() {
        let bytes = sample_container().serialize();
        assert!(matches!(
            Container::parse(&bytes[..100]),
            Err(CodecError::MalformedContainer(_))
        ));
    }
}
