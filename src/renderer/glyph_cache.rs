use std::collections::HashMap;

use crate::text::SizedFont;

/// Key of a rasterized glyph: face, glyph, and pixel size bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GlyphKey {
    font_id: fontdb::ID,
    glyph_index: u16,
    px_bits: u32,
}

/// A coverage bitmap, one byte per pixel, row-major.
#[derive(Clone, Debug)]
pub struct CachedGlyph {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Rasterized glyphs of one canvas.
///
/// Quote text repeats letters heavily, so each glyph is rasterized once per
/// font and size.
#[derive(Default)]
pub struct GlyphCache {
    glyphs: HashMap<GlyphKey, CachedGlyph, fxhash::FxBuildHasher>,
}

impl GlyphCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the coverage bitmap of `glyph_index`, rasterizing it on first use.
    pub fn get_or_rasterize(&mut self, font: &SizedFont, glyph_index: u16) -> &CachedGlyph {
        let key = GlyphKey {
            font_id: font.font_id(),
            glyph_index,
            px_bits: font.px().to_bits(),
        };

        self.glyphs.entry(key).or_insert_with(|| {
            let (metrics, data) = font.font().rasterize_indexed(glyph_index, font.px());
            CachedGlyph {
                width: metrics.width,
                height: metrics.height,
                data,
            }
        })
    }
}
