//! Per-depth pixel sample extraction.
//!
//! The four supported layouts differ only in how a pixel's bits are found
//! inside its padded row: 24 bpp stores (blue, green, red) triples, 8 bpp
//! one palette index per byte, 4 bpp two indices per byte (even x in the
//! high nibble), and 1 bpp eight indices per byte, most significant bit
//! first. The layout is selected once per image from the header bit depth;
//! everything downstream sees one uniform sample(x, y) operation.

use crate::bitmap::parser::Bitmap;
use crate::error::{CodecError, Result};

/// A resolved full-colour sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pixel layout strategy, chosen once per image by its bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 bpp, eight palette indices per byte, MSB first.
    Mono1,
    /// 4 bpp, two palette indices per byte.
    Pal4,
    /// 8 bpp, one palette index per byte.
    Pal8,
    /// 24 bpp, (blue, green, red) triples.
    Rgb24,
}

impl PixelFormat {
    /// Select the layout for a bit depth. 16 bpp passes the upstream BMP
    /// validity check but has no defined sample layout here, so it fails
    /// like every other unsupported depth rather than guessing at 5-6-5.
    pub fn from_bpp(bits_per_pixel: u16) -> Result<Self> {
        match bits_per_pixel {
            1 => Ok(PixelFormat::Mono1),
            4 => Ok(PixelFormat::Pal4),
            8 => Ok(PixelFormat::Pal8),
            24 => Ok(PixelFormat::Rgb24),
            other => Err(CodecError::UnsupportedBitDepth(other)),
        }
    }
}

impl Bitmap {
    /// Resolve the sample at (x, y), with (0, 0) the top-left corner.
    ///
    /// Fails with `UnsupportedBitDepth` for depths outside {1, 4, 8, 24}
    /// and with `MalformedContainer` when the pixel block or colour table
    /// is too short for the requested coordinate.
    pub fn sample(&self, x: u32, y: u32) -> Result<Rgb> {
        if x >= self.width || y >= self.height {
            return Err(CodecError::MalformedContainer(
                "pixel coordinate outside the image",
            ));
        }
        let format = PixelFormat::from_bpp(self.bits_per_pixel)?;
        let row_start = self.row_start(y);
        match format {
            PixelFormat::Rgb24 => {
                let at = row_start + 3 * x as usize;
                if at + 2 >= self.pixel_data.len() {
                    return Err(CodecError::MalformedContainer(
                        "pixel block too short for the declared dimensions",
                    ));
                }
                Ok(Rgb {
                    r: self.pixel_data[at + 2],
                    g: self.pixel_data[at + 1],
                    b: self.pixel_data[at],
                })
            }
            PixelFormat::Pal8 => {
                let at = row_start + x as usize;
                self.palette_entry(self.byte_at(at)? as usize)
            }
            PixelFormat::Pal4 => {
                let byte = self.byte_at(row_start + x as usize / 2)?;
                let index = if x % 2 == 0 { byte >> 4 } else { byte & 0x0f };
                self.palette_entry(index as usize)
            }
            PixelFormat::Mono1 => {
                let byte = self.byte_at(row_start + x as usize / 8)?;
                let index = (byte >> (7 - (x % 8))) & 0x01;
                self.palette_entry(index as usize)
            }
        }
    }

    fn byte_at(&self, at: usize) -> Result<u8> {
        self.pixel_data.get(at).copied().ok_or(
            CodecError::MalformedContainer("pixel block too short for the declared dimensions"),
        )
    }

    /// Resolve a palette index to a colour. Entries are 4 bytes:
    /// blue, green, red, reserved.
    fn palette_entry(&self, index: usize) -> Result<Rgb> {
        let table = self
            .colour_table
            .as_ref()
            .ok_or(CodecError::MalformedContainer("missing colour table"))?;
        let at = index * 4;
        if at + 2 >= table.len() {
            return Err(CodecError::MalformedContainer(
                "colour table entry out of range",
            ));
        }
        Ok(Rgb {
            r: table[at + 2],
            g: table[at + 1],
            b: table[at],
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitmap::parser::parse;
    use crate::bitmap::test_images::{index_at, indexed_bmp, palette, rgb_at, rgb_bmp};

    /// The colour the test palette assigns to an index.
    fn palette_rgb(bpp: u16, index: u8) -> Rgb {
        let table = palette(bpp);
        let at = index as usize * 4;
        Rgb {
            r: table[at + 2],
            g: table[at + 1],
            b: table[at],
        }
    }

    #[test]
    fn format_selection() {
        assert_eq!(PixelFormat::from_bpp(1).unwrap(), PixelFormat::Mono1);
        assert_eq!(PixelFormat::from_bpp(24).unwrap(), PixelFormat::Rgb24);
        assert!(matches!(
            PixelFormat::from_bpp(16),
            Err(CodecError::UnsupportedBitDepth(16))
        ));
        assert!(matches!(
            PixelFormat::from_bpp(32),
            Err(CodecError::UnsupportedBitDepth(32))
        ));
    }

    #[test]
    fn samples_24bpp_across_padded_rows() {
        // Width 3 gives 9 data bytes padded to a 12-byte stride.
        let bitmap = parse(&rgb_bmp(3, 2)).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let (b, g, r) = rgb_at(x, y);
                assert_eq!(bitmap.sample(x, y).unwrap(), Rgb { r, g, b });
            }
        }
    }

    #[test]
    fn samples_8bpp_with_stride_padding() {
        // Width 5 at 8 bpp pads each row from 5 to 8 bytes.
        let bitmap = parse(&indexed_bmp(8, 5, 3)).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let expect = palette_rgb(8, index_at(8, x, y));
                assert_eq!(bitmap.sample(x, y).unwrap(), expect, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn samples_4bpp_nibble_order() {
        let bitmap = parse(&indexed_bmp(4, 5, 2)).unwrap();
        for y in 0..2 {
            for x in 0..5 {
                let expect = palette_rgb(4, index_at(4, x, y));
                assert_eq!(bitmap.sample(x, y).unwrap(), expect, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn samples_1bpp_msb_first() {
        let bitmap = parse(&indexed_bmp(1, 11, 2)).unwrap();
        for y in 0..2 {
            for x in 0..11 {
                let expect = palette_rgb(1, index_at(1, x, y));
                assert_eq!(bitmap.sample(x, y).unwrap(), expect, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn rejects_out_of_image_coordinates() {
        let bitmap = parse(&rgb_bmp(3, 2)).unwrap();
        assert!(bitmap.sample(3, 0).is_err());
        assert!(bitmap.sample(0, 2).is_err());
    }

    #[test]
    fn truncated_pixel_block_is_malformed() {
        let mut bitmap = parse(&rgb_bmp(3, 2)).unwrap();
        bitmap.pixel_data.truncate(4);
        assert!(matches!(
            bitmap.sample(2, 0),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn out_of_range_palette_index_is_malformed() {
        let mut bitmap = parse(&indexed_bmp(8, 4, 2)).unwrap();
        // Leave one palette entry so index 1 resolves but index 3 cannot.
        bitmap.colour_table = Some(bitmap.colour_table.unwrap()[..4].to_vec());
        assert!(matches!(
            bitmap.sample(2, 0),
            Err(CodecError::MalformedContainer(_))
        ));
    }
}
