//! Rendering of barcode captions into pixel intensity maps.

use std::collections::HashMap;

use swash::FontRef;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::shape::ShapeContext;
use swash::zeno::Vector;
use tracing::warn;


pub const DEFAULT_SIZE_PX: f32 = 16.0;


/// The text renderer. Allows the rendering of text in a specific font at a specific pixel size.
pub struct TextRenderer<'a> {
    pub font: FontRef<'a>,
    pub size_px: f32,
}
impl<'a> TextRenderer<'a> {
    /// Loads the first font from the given font file data (TrueType or OpenType). Returns `None`
    /// if the data does not contain a font.
    pub fn new(font_data: &'a [u8], size_px: f32) -> Option<Self> {
        let font = FontRef::from_index(font_data, 0)?;
        Some(Self {
            font,
            size_px,
        })
    }

    /// Returns a renderer for the same font at a different pixel size.
    pub fn with_size(&self, size_px: f32) -> Self {
        Self {
            font: self.font,
            size_px,
        }
    }

    /// Renders the given text and returns a map of coordinates to pixel intensity values, where
    /// higher values are more intense.
    ///
    /// Any pixels not contained in the map can be assumed to be blank (equivalent to intensity value
    /// 0). Glyphs that cannot be rendered are skipped.
    pub fn render_text(&self, text: &str) -> HashMap<(u32, u32), u8> {
        let metrics = self.font.metrics(&[]);
        let ascender_px_f32 = metrics.ascent * self.size_px / f32::from(metrics.units_per_em);
        let ascender_px: i32 = ascender_px_f32.ceil() as i32;

        // shape text
        let mut shape_ctx = ShapeContext::new();
        let mut shaper = shape_ctx.builder(self.font)
            .size(self.size_px)
            .build();
        shaper.add_str(text);
        let mut glyphs = Vec::new();
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                glyphs.push(*glyph);
            }
        });

        // render text
        let mut context = ScaleContext::new();
        let mut scaler = context.builder(self.font)
            .size(self.size_px)
            .hint(false)
            .build();
        let mut renderer = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ]);
        let mut pixel_values: HashMap<(u32, u32), u8> = HashMap::new();
        let mut pos_x: f32 = 0.0;
        for glyph in &glyphs {
            let pos_x_int: i32 = pos_x.trunc() as i32;
            let pos_x_frac = pos_x.fract();
            renderer.offset(Vector::new(pos_x_frac, 0.0));
            let img = match renderer.render(&mut scaler, glyph.id) {
                Some(i) => i,
                None => {
                    warn!("failed to render glyph {} of {:?}", glyph.id, text);
                    pos_x += glyph.advance;
                    continue;
                },
            };

            let placement_width = usize::try_from(img.placement.width).unwrap_or(0);
            for (i, b) in img.data.iter().enumerate() {
                if *b == 0 || placement_width == 0 {
                    continue;
                }
                let x = (i % placement_width) as i32;
                let y = (i / placement_width) as i32;
                let actual_x: u32 = match (img.placement.left + pos_x_int + x).try_into() {
                    Ok(ax) => ax,
                    Err(_) => continue,
                };
                let actual_y: u32 = match (ascender_px - img.placement.top + y).try_into() {
                    Ok(ay) => ay,
                    Err(_) => continue,
                };
                let pixel_ref = pixel_values
                    .entry((actual_x, actual_y))
                    .or_insert(0);
                *pixel_ref = pixel_ref.saturating_add(*b);
            }

            pos_x += glyph.advance;
        }

        pixel_values
    }
}

/// Obtains the minimum dimensions of the image described by the given pixel value map.
///
/// The return value is a tuple `(width, height)`.
pub fn map_to_dimensions(pixel_values: &HashMap<(u32, u32), u8>) -> (u32, u32) {
    let image_width = pixel_values.keys()
        .map(|(x, _y)| *x + 1)
        .max()
        .unwrap_or(0);
    let image_height = pixel_values.keys()
        .map(|(_x, y)| *y + 1)
        .max()
        .unwrap_or(0);
    (image_width, image_height)
}

/// Returns the coordinates of all pixels whose intensity is at least `threshold`, sorted by row
/// and then by column.
pub fn map_to_black_pixels(pixel_values: &HashMap<(u32, u32), u8>, threshold: u8) -> Vec<(u32, u32)> {
    let mut ret: Vec<(u32, u32)> = pixel_values.iter()
        .filter(|(_coords, intensity)| **intensity >= threshold)
        .map(|(coords, _intensity)| *coords)
        .collect();
    ret.sort_unstable_by_key(|(x, y)| (*y, *x));
    ret
}
