use std::convert::TryInto;
use std::fmt;
use std::num::TryFromIntError;


#[derive(Debug)]
pub enum BitmapError {
    IncorrectPixelCount { expected: usize, obtained: usize },
    DimensionConversion { dimension: &'static str, value: usize, target_type: &'static str, error: TryFromIntError },
    PngEncoding(png::EncodingError),
}
impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncorrectPixelCount { expected, obtained }
                => write!(f, "incorrect pixel count; expected {}, obtained {}", expected, obtained),
            Self::DimensionConversion { dimension, value, target_type, error }
                => write!(f, "failed to convert {} ({}) to {}: {}", dimension, value, target_type, error),
            Self::PngEncoding(e)
                => write!(f, "PNG encoding failed: {}", e),
        }
    }
}
impl std::error::Error for BitmapError {
}


/// Options for [`BarcodeBitmap::render`]: a blank border around the image and the number of
/// output pixels per input pixel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BitmapRenderOptions {
    quiet_zone_pixels: usize,
    point_scale: usize,
}
impl BitmapRenderOptions {
    pub fn new() -> Self {
        Self {
            quiet_zone_pixels: 0,
            point_scale: 1,
        }
    }

    pub fn set_quiet_zone(&mut self, quiet_zone_pixels: usize) {
        self.quiet_zone_pixels = quiet_zone_pixels;
    }

    /// Sets the point scale. A scale of 0 is treated as 1.
    pub fn set_point_scale(&mut self, point_scale: usize) {
        self.point_scale = point_scale.max(1);
    }

    pub fn quiet_zone_pixels(&self) -> usize { self.quiet_zone_pixels }
    pub fn point_scale(&self) -> usize { self.point_scale }
}
impl Default for BitmapRenderOptions {
    fn default() -> Self { Self::new() }
}


/// A black-and-white bitmap, stored row by row. `true` is black.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BarcodeBitmap {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}
impl BarcodeBitmap {
    pub fn new(
        width: usize,
        height: usize,
        bits: Vec<bool>,
    ) -> Result<Self, BitmapError> {
        if width * height != bits.len() {
            return Err(BitmapError::IncorrectPixelCount { expected: width * height, obtained: bits.len() });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Creates an all-white bitmap.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn bits(&self) -> &[bool] { self.bits.as_slice() }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.bits[y * self.width + x])
    }

    /// Sets a pixel. Coordinates outside the bitmap are ignored.
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        if x < self.width && y < self.height {
            self.bits[y * self.width + x] = black;
        }
    }

    /// Copies `other` into this bitmap with its top left corner at `(x, y)`. The parts of `other`
    /// that do not fit are clipped.
    pub fn paste(&mut self, other: &BarcodeBitmap, x: usize, y: usize) {
        for other_y in 0..other.height {
            let target_y = y + other_y;
            if target_y >= self.height {
                break;
            }
            for other_x in 0..other.width {
                let target_x = x + other_x;
                if target_x >= self.width {
                    break;
                }
                self.bits[target_y * self.width + target_x] = other.bits[other_y * other.width + other_x];
            }
        }
    }

    /// Converts the bitmap from bits to bytes. Bits within a byte are ordered depending on the
    /// `most_significant_first` argument: if `true`, they are ordered from most significant to
    /// least significant (as expected e.g. by PNG); if `false`, they are ordered from least to most
    /// significant. If the total number of bits is not divisible by 8, the remaining bits in the
    /// last byte are set to 0. This padding either happens once per row (if `pad_by_row` is `true`,
    /// as expected by PNG) or at the end of the whole image (if it is `false`).
    pub fn to_bytes(&self, most_significant_first: bool, pad_by_row: bool) -> Vec<u8> {
        let mut ret = Vec::with_capacity(self.bits.len() / 8 + 1);
        let mut cur_byte = 0u8;

        let mut bit_index = 0;
        for (i, b) in self.bits.iter().enumerate() {
            if *b {
                if most_significant_first {
                    cur_byte |= 1 << (7 - bit_index);
                } else {
                    cur_byte |= 1 << bit_index;
                }
            }
            if bit_index == 7 {
                ret.push(cur_byte);
                cur_byte = 0x00;
                bit_index = 0;
            } else if pad_by_row && i % self.width == (self.width - 1) {
                // last pixel in the row => pad and flush
                ret.push(cur_byte);
                cur_byte = 0x00;
                bit_index = 0;
            } else {
                bit_index += 1;
            }
        }

        if !pad_by_row && self.bits.len() % 8 != 0 {
            // non-full byte at the end
            ret.push(cur_byte);
        }

        ret
    }

    /// Scales every pixel by the point scale and surrounds the result with the quiet zone.
    pub fn render(&self, bitmap_opts: &BitmapRenderOptions) -> BarcodeBitmap {
        let quiet = bitmap_opts.quiet_zone_pixels;
        let scale = bitmap_opts.point_scale;
        let new_width = quiet + scale * self.width + quiet;
        let new_height = quiet + scale * self.height + quiet;

        let quiet_row = vec![false; new_width];
        let mut rendered_pixels = Vec::with_capacity(new_width * new_height);

        for _ in 0..quiet {
            rendered_pixels.extend_from_slice(&quiet_row);
        }

        for row in self.bits.chunks(self.width.max(1)).take(self.height) {
            let mut this_row = Vec::with_capacity(new_width);
            this_row.resize(quiet, false);
            for pixel in row {
                for _ in 0..scale {
                    this_row.push(*pixel);
                }
            }
            this_row.resize(new_width, false);

            for _ in 0..scale {
                rendered_pixels.extend_from_slice(&this_row);
            }
        }

        for _ in 0..quiet {
            rendered_pixels.extend_from_slice(&quiet_row);
        }

        BarcodeBitmap {
            width: new_width,
            height: new_height,
            bits: rendered_pixels,
        }
    }

    pub fn to_png(&self) -> Result<Vec<u8>, BitmapError> {
        // encode as PNG
        let mut png = Vec::new();

        let width_u32 = self.width.try_into()
            .map_err(|e| BitmapError::DimensionConversion { dimension: "width", value: self.width, target_type: "u32", error: e })?;
        let height_u32 = self.height.try_into()
            .map_err(|e| BitmapError::DimensionConversion { dimension: "height", value: self.height, target_type: "u32", error: e })?;

        let bitmap_bytes = self.to_bytes(true, true);

        {
            let mut png_encoder = png::Encoder::new(&mut png, width_u32, height_u32);
            png_encoder.set_color(png::ColorType::Indexed);
            png_encoder.set_depth(png::BitDepth::One);
            png_encoder.set_palette(vec![0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
            let mut writer = png_encoder.write_header()
                .map_err(|e| BitmapError::PngEncoding(e))?;
            writer.write_image_data(&bitmap_bytes)
                .map_err(|e| BitmapError::PngEncoding(e))?;
        }

        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn checkerboard_3x3() -> BarcodeBitmap {
        BarcodeBitmap::new(
            3, 3, vec![
                true, false, true,
                false, true, false,
                true, false, true,
            ],
        ).unwrap()
    }

    #[test]
    fn test_incorrect_pixel_count() {
        let err = BarcodeBitmap::new(2, 2, vec![true; 3]).unwrap_err();
        assert!(matches!(err, BitmapError::IncorrectPixelCount { expected: 4, obtained: 3 }));
    }

    #[test]
    fn test_to_bytes_1x1() {
        let bmp = BarcodeBitmap::new(1, 1, vec![true]).unwrap();

        let bs_msb = bmp.to_bytes(true, false);
        assert_eq!(vec![0x80], bs_msb);

        let bs_lsb = bmp.to_bytes(false, false);
        assert_eq!(vec![0x01], bs_lsb);
    }

    #[test]
    fn test_to_bytes_3x3() {
        let bmp = checkerboard_3x3();

        let bs_msb = bmp.to_bytes(true, false);
        assert_eq!(vec![0xaa, 0x80], bs_msb);

        let bs_lsb = bmp.to_bytes(false, false);
        assert_eq!(vec![0x55, 0x01], bs_lsb);
    }

    #[test]
    fn test_to_bytes_3x3_row_pad() {
        let bmp = checkerboard_3x3();

        let bs_msb = bmp.to_bytes(true, true);
        assert_eq!(vec![0xa0, 0x40, 0xa0], bs_msb);

        let bs_lsb = bmp.to_bytes(false, true);
        assert_eq!(vec![0x05, 0x02, 0x05], bs_lsb);
    }

    #[test]
    fn test_render_scale_and_quiet_zone() {
        let bmp = BarcodeBitmap::new(2, 1, vec![true, false]).unwrap();
        let mut opts = BitmapRenderOptions::new();
        opts.set_quiet_zone(1);
        opts.set_point_scale(2);

        let rendered = bmp.render(&opts);
        assert_eq!(rendered.width(), 1 + 4 + 1);
        assert_eq!(rendered.height(), 1 + 2 + 1);
        assert_eq!(rendered.bits().iter().filter(|b| **b).count(), 4);
        assert_eq!(rendered.get(0, 0), Some(false));
        assert_eq!(rendered.get(1, 1), Some(true));
        assert_eq!(rendered.get(2, 2), Some(true));
        assert_eq!(rendered.get(3, 1), Some(false));
        assert_eq!(rendered.get(6, 0), None);
    }

    #[test]
    fn test_render_default_is_identity() {
        let bmp = checkerboard_3x3();
        assert_eq!(bmp.render(&BitmapRenderOptions::default()), bmp);
    }

    #[test]
    fn test_paste_clips() {
        let mut canvas = BarcodeBitmap::blank(4, 4);
        canvas.paste(&checkerboard_3x3(), 2, 2);
        assert_eq!(canvas.get(2, 2), Some(true));
        assert_eq!(canvas.get(3, 2), Some(false));
        assert_eq!(canvas.get(3, 3), Some(true));
        assert_eq!(canvas.bits().iter().filter(|b| **b).count(), 2);
    }

    #[test]
    fn test_to_png_signature() {
        let png = checkerboard_3x3().to_png().unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }
}
