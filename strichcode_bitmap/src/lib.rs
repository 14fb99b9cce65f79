//! Drawing of encoded barcodes into black-and-white bitmaps.


mod bitmap;


use std::collections::HashMap;

use strichcode_render_text::{TextRenderer, map_to_black_pixels, map_to_dimensions};
use strichcode_symbology::{Barcode, SymbologyLayout};
use strichcode_symbology::encode::{NARROW_BAR, WIDE_BAR, WIDE_SPACE};
use tracing::debug;

pub use crate::bitmap::{BarcodeBitmap, BitmapError, BitmapRenderOptions};


/// Caption pixels at least this intense are drawn black.
const CAPTION_THRESHOLD: u8 = 128;

/// Multiple of the narrow width used for wide CODE39 elements.
const WIDE_FACTOR: usize = 3;


fn to_usize(dimension: &'static str, value: u32) -> Result<usize, BitmapError> {
    usize::try_from(value)
        .map_err(|e| BitmapError::DimensionConversion { dimension, value: value as usize, target_type: "usize", error: e })
}


/// Draws the bars of a barcode without padding or caption.
///
/// The narrow column width is the image width of the symbology divided by the number of columns
/// the barcode needs, but at least one pixel; the bitmap is exactly as wide as the bars.
pub fn rasterize_bars(barcode: &Barcode) -> Result<BarcodeBitmap, BitmapError> {
    let (image_width, image_height) = barcode.image_size();
    let image_width = to_usize("image width", image_width)?;
    let height = to_usize("image height", image_height)?;

    let column_count = barcode.column_count();
    let narrow = (image_width / column_count.max(1)).max(1);
    let bits = barcode.bit_string();

    // black/white state of each column of one row
    let mut row: Vec<bool> = Vec::with_capacity(column_count * narrow);
    match barcode.descriptor().layout {
        SymbologyLayout::Ean(_) => {
            for module in bits.chars() {
                row.extend(std::iter::repeat(module == '1').take(narrow));
            }
        },
        SymbologyLayout::Code39 => {
            let symbols: Vec<char> = bits.chars().collect();
            for (i, symbol) in symbols.iter().enumerate() {
                match *symbol {
                    NARROW_BAR => row.extend(std::iter::repeat(true).take(narrow)),
                    WIDE_BAR => row.extend(std::iter::repeat(true).take(narrow * WIDE_FACTOR)),
                    WIDE_SPACE => row.extend(std::iter::repeat(false).take(narrow * WIDE_FACTOR)),
                    _ => {},
                }
                if *symbol != WIDE_SPACE && symbols.get(i + 1) != Some(&WIDE_SPACE) {
                    // narrow gap
                    row.extend(std::iter::repeat(false).take(narrow));
                }
            }
        },
    }

    let width = row.len();
    debug!(
        "rasterizing {:?}: {} columns of {} px, bars {}x{}",
        barcode, column_count, narrow, width, height,
    );

    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        pixels.extend_from_slice(&row);
    }
    BarcodeBitmap::new(width, height, pixels)
}


/// Draws a complete barcode image: the bars centered on a white canvas the size of the image
/// plus the symbology's padding and, if a text renderer is given, the code as a caption centered
/// below the bars.
///
/// The caption is rendered at the symbology's font size; parts of it that do not fit on the canvas
/// are clipped.
pub fn compose(barcode: &Barcode, caption: Option<&TextRenderer>) -> Result<BarcodeBitmap, BitmapError> {
    let geometry = &barcode.descriptor().geometry;
    let (image_width, image_height) = barcode.image_size();
    let canvas_width = to_usize("canvas width", image_width.saturating_add(geometry.padding.width))?;
    let canvas_height = to_usize("canvas height", image_height.saturating_add(geometry.padding.height))?;

    let bars = rasterize_bars(barcode)?;
    let mut canvas = BarcodeBitmap::blank(canvas_width, canvas_height);

    let bars_x = canvas_width.saturating_sub(bars.width()) / 2;
    let bars_y = canvas_height.saturating_sub(bars.height()) / 2;
    canvas.paste(&bars, bars_x, bars_y);

    if let Some(renderer) = caption {
        let sized = renderer.with_size(geometry.font_size as f32);
        let text_map = sized.render_text(barcode.code());
        overlay_caption(&mut canvas, &text_map, caption_top(canvas_height, bars.height()))?;
    }

    Ok(canvas)
}


/// The row at which the caption starts: the bottom edge of bars centered vertically on the canvas.
pub fn caption_top(canvas_height: usize, bars_height: usize) -> usize {
    canvas_height - canvas_height.saturating_sub(bars_height) / 2
}


/// Draws a rendered caption onto the canvas, centered horizontally with its top row at `top`.
///
/// Pixels at least as intense as the caption threshold become black; pixels outside the canvas
/// are dropped.
pub fn overlay_caption(
    canvas: &mut BarcodeBitmap,
    text_map: &HashMap<(u32, u32), u8>,
    top: usize,
) -> Result<(), BitmapError> {
    let (text_width, _text_height) = map_to_dimensions(text_map);
    let text_width = to_usize("caption width", text_width)?;
    let left = canvas.width().saturating_sub(text_width) / 2;

    for (x, y) in map_to_black_pixels(text_map, CAPTION_THRESHOLD) {
        let x = to_usize("caption x", x)?;
        let y = to_usize("caption y", y)?;
        canvas.set(left + x, top + y, true);
    }
    Ok(())
}
