use super::measure::{LineMeasure, TextMeasure};

/// Fixed metrics: `scale` px per character, lines `2 * scale` tall.
pub(crate) struct GridFont {
    pub scale: f32,
}

impl TextMeasure for GridFont {
    fn measure(&self, line: &str) -> LineMeasure {
        LineMeasure {
            width: line.chars().count() as f32 * self.scale,
            ascent: self.scale * 1.5,
            descent: self.scale * 0.5,
        }
    }
}
