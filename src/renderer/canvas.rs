use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::RenderError;
use crate::geometry::{CanvasSize, Point};
use crate::text::SizedFont;

use super::glyph_cache::GlyphCache;

/// The raster surface of a single render.
///
/// Owned by one render call; never shared between renders.
pub struct Canvas {
    image: RgbaImage,
    glyphs: GlyphCache,
}

impl Canvas {
    /// A canvas filled with `background`.
    ///
    /// Sides come from validated settings and so stay within
    /// [`crate::settings::MAX_SIDE`].
    pub fn new(size: CanvasSize, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width, size.height, background.to_rgba8()),
            glyphs: GlyphCache::new(),
        }
    }

    /// Width and height in pixels.
    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.image.width(), self.image.height())
    }

    /// Draws a single line whose line box has its top-left corner at
    /// `position`. The baseline sits one ascent below.
    pub fn draw_text(&mut self, position: Point, text: &str, font: &SizedFont, color: Color) {
        let baseline = position.y as f32 + font.ascent();
        let (width, height) = self.image.dimensions();

        for glyph in font.place_glyphs(text) {
            let cached = self.glyphs.get_or_rasterize(font, glyph.glyph_index);
            if cached.width == 0 || cached.height == 0 {
                continue;
            }

            let origin_x = (position.x as f32 + glyph.x).round() as i64;
            let origin_y = (baseline + glyph.y).round() as i64;

            for row in 0..cached.height {
                let y = origin_y + row as i64;
                if y < 0 || y >= height as i64 {
                    continue;
                }

                for col in 0..cached.width {
                    let coverage = cached.data[row * cached.width + col];
                    if coverage == 0 {
                        continue;
                    }

                    let x = origin_x + col as i64;
                    if x < 0 || x >= width as i64 {
                        continue;
                    }

                    blend(
                        self.image.get_pixel_mut(x as u32, y as u32),
                        color,
                        coverage as f32 / 255.0,
                    );
                }
            }
        }
    }

    /// Composites `image` with its own alpha as the mask, top-left corner at
    /// `position`. Parts outside the canvas are clipped.
    pub fn paste(&mut self, image: &RgbaImage, position: Point) {
        image::imageops::overlay(&mut self.image, image, position.x as i64, position.y as i64);
    }

    /// Encodes the canvas as PNG and writes it to `path` in one go.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let mut encoded = Cursor::new(Vec::new());
        self.image
            .write_to(&mut encoded, ImageFormat::Png)
            .map_err(|source| RenderError::Image {
                path: path.to_path_buf(),
                source,
            })?;

        if let Err(source) = std::fs::write(path, encoded.into_inner()) {
            // do not leave a truncated file behind
            let _ = std::fs::remove_file(path);
            return Err(RenderError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
        Ok(())
    }

    /// The pixels drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas, returning its pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Source-over blend of `color` at `coverage` onto a straight-alpha pixel.
fn blend(pixel: &mut Rgba<u8>, color: Color, coverage: f32) {
    let a = color.a as f32 / 255.0 * coverage;
    if a <= 0.0 {
        return;
    }

    let bg_a = pixel[3] as f32 / 255.0;
    let out_a = a + bg_a * (1.0 - a);
    if out_a <= 0.0 {
        return;
    }

    let channel = |src: u8, dst: u8| {
        let src = src as f32 / 255.0;
        let dst = dst as f32 / 255.0;
        let out = (src * a + dst * bg_a * (1.0 - a)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    *pixel = Rgba([
        channel(color.r, pixel[0]),
        channel(color.g, pixel[1]),
        channel(color.b, pixel[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}
