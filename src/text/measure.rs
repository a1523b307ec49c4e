use std::sync::Arc;

/// Ink extent of one line of text, relative to its pen origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMeasure {
    /// Right edge of the rightmost glyph's ink.
    pub width: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Ink that hangs below the baseline (never negative).
    pub descent: f32,
}

impl LineMeasure {
    /// Whole-pixel height of the line without any margin.
    pub fn height(&self) -> f32 {
        (self.ascent + self.descent).ceil()
    }

    /// Whole-pixel width of the line.
    pub fn pixel_width(&self) -> f32 {
        self.width.ceil()
    }
}

/// Source of line measurements for the layout stage.
///
/// The layout math only needs these numbers, so it can run against a real
/// font or against fixed metrics.
pub trait TextMeasure {
    fn measure(&self, line: &str) -> LineMeasure;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure(&self, line: &str) -> LineMeasure {
        (**self).measure(line)
    }
}

/// A glyph positioned on a line, **Y-axis goes down**.
///
/// `x` is the left edge of the glyph bitmap measured from the line's pen
/// origin; `y` is the top edge of the bitmap measured from the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub glyph_index: u16,
    pub x: f32,
    pub y: f32,
    pub metrics: fontdue::Metrics,
}

/// A loaded font at a fixed pixel size.
#[derive(Clone)]
pub struct SizedFont {
    font_id: fontdb::ID,
    font: Arc<fontdue::Font>,
    px: f32,
}

impl std::fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizedFont")
            .field("font_id", &self.font_id)
            .field("px", &self.px)
            .finish()
    }
}

impl SizedFont {
    /// Wraps a parsed face at `px` pixels.
    pub fn new(font_id: fontdb::ID, font: Arc<fontdue::Font>, px: f32) -> Self {
        Self { font_id, font, px }
    }

    /// Database id of the face, used as a cache key.
    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    /// The parsed face.
    pub fn font(&self) -> &fontdue::Font {
        &self.font
    }

    /// Point size, used as the pixel size.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|metrics| metrics.ascent)
            .unwrap_or(self.px)
    }

    /// Positions every glyph of `line` along the baseline, applying kerning
    /// between neighbouring glyphs.
    pub fn place_glyphs(&self, line: &str) -> Vec<PlacedGlyph> {
        let mut glyphs = Vec::with_capacity(line.len());
        let mut origin_x = 0.0f32;
        let mut previous: Option<(u16, f32)> = None;

        for ch in line.chars() {
            let glyph_index = self.font.lookup_glyph_index(ch);
            let metrics = self.font.metrics_indexed(glyph_index, self.px);

            if let Some((last_glyph, last_advance)) = previous {
                let kerning = self
                    .font
                    .horizontal_kern_indexed(last_glyph, glyph_index, self.px)
                    .unwrap_or(0.0);
                origin_x += last_advance + kerning;
            }

            glyphs.push(PlacedGlyph {
                glyph_index,
                x: origin_x + metrics.xmin as f32,
                y: -(metrics.ymin as f32 + metrics.height as f32),
                metrics,
            });
            previous = Some((glyph_index, metrics.advance_width));
        }

        glyphs
    }
}

impl TextMeasure for SizedFont {
    fn measure(&self, line: &str) -> LineMeasure {
        let glyphs = self.place_glyphs(line);

        let width = glyphs
            .iter()
            .filter(|glyph| glyph.metrics.width > 0)
            .map(|glyph| glyph.x + glyph.metrics.width as f32)
            .fold(0.0f32, f32::max);
        let descent = glyphs
            .iter()
            .filter(|glyph| glyph.metrics.height > 0)
            .map(|glyph| -(glyph.metrics.ymin as f32))
            .fold(0.0f32, f32::max);

        LineMeasure {
            width,
            ascent: self.ascent(),
            descent,
        }
    }
}
