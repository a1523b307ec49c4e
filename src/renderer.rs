//! Drawing computed layouts onto a [`Canvas`].

mod canvas;
mod glyph_cache;

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::color::ColorScheme;
use crate::geometry::CanvasSize;
use crate::post::PostLayout;
use crate::text::{LayoutBlock, SizedFont};

pub use canvas::Canvas;
pub use glyph_cache::{CachedGlyph, GlyphCache};

/// Draws a centered quote/lyric block on a fresh canvas.
pub fn draw_quote(
    layout: &LayoutBlock,
    font: &SizedFont,
    canvas_size: CanvasSize,
    colors: ColorScheme,
) -> Canvas {
    let mut canvas = Canvas::new(canvas_size, colors.background);
    for line in &layout.lines {
        canvas.draw_text(line.position, &line.text, font, colors.foreground);
    }
    canvas
}

/// Draws a post: avatar, username lines, handle, then the body.
///
/// `avatar` must already be masked and sized to the placement in the layout.
pub fn draw_post(
    layout: &PostLayout,
    avatar: Option<&RgbaImage>,
    header_font: &SizedFont,
    text_font: &SizedFont,
    canvas_size: CanvasSize,
    colors: ColorScheme,
) -> Canvas {
    let mut canvas = Canvas::new(canvas_size, colors.background);

    if let (Some(placement), Some(avatar)) = (layout.header.avatar, avatar) {
        canvas.paste(avatar, placement.position);
    }

    for line in layout
        .header
        .username
        .iter()
        .chain(std::iter::once(&layout.header.handle))
    {
        canvas.draw_text(line.position, &line.text, header_font, colors.foreground);
    }

    for line in &layout.body.lines {
        canvas.draw_text(line.position, &line.text, text_font, colors.foreground);
    }

    canvas
}

/// Where the PNG for `stem` goes: `<dir>/<stem>.png`, or the current
/// directory when `dir` is `None`.
pub fn output_path(dir: Option<&Path>, stem: &str) -> PathBuf {
    let file_name = format!("{stem}.png");
    match dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_is_named_after_the_title() {
        assert_eq!(
            output_path(None, "Who needs memories"),
            PathBuf::from("Who needs memories.png")
        );
        assert_eq!(
            output_path(Some(Path::new("out")), "sample"),
            Path::new("out").join("sample.png")
        );
    }
}
