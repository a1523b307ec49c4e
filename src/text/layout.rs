use std::num::NonZeroUsize;

use crate::error::ContentError;
use crate::geometry::{BlockSize, CanvasSize, Point, centered_offset};

use super::measure::TextMeasure;
use super::wrap::wrap;

/// Measured footprint of one wrapped line.
///
/// `height` already contains the trailing margin for every line except the
/// last one in its block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub width: f32,
    pub height: f32,
}

/// Horizontal placement of lines inside a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HorizontalAlign {
    /// Every line starts at the block's x.
    Left,
    /// Every line is centered on its own inside a container of this width.
    Center { container_width: f32 },
}

/// A single line ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub metrics: LineMetrics,
    /// Top-left corner of the line box.
    pub position: Point,
}

/// A renderable block of lines with its anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBlock {
    /// Top-left corner where the first line box starts.
    pub origin: Point,
    pub size: BlockSize,
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// Stacks `lines` downward from `origin`, advancing by each line's own
    /// height.
    pub fn stack(
        origin: Point,
        lines: Vec<String>,
        metrics: Vec<LineMetrics>,
        align: HorizontalAlign,
    ) -> Self {
        debug_assert_eq!(lines.len(), metrics.len());

        let size = block_size(&metrics);
        let mut cursor_y = origin.y as f32;
        let mut placed = Vec::with_capacity(lines.len());

        for (text, line_metrics) in lines.into_iter().zip(metrics) {
            let x = match align {
                HorizontalAlign::Left => origin.x,
                HorizontalAlign::Center { container_width } => {
                    centered_offset(container_width, line_metrics.width)
                }
            };

            placed.push(LayoutLine {
                text,
                metrics: line_metrics,
                position: Point::new(x, cursor_y.floor() as i32),
            });
            cursor_y += line_metrics.height;
        }

        Self {
            origin,
            size,
            lines: placed,
        }
    }

    /// Height of all lines including the margins between them.
    pub fn total_height(&self) -> f32 {
        self.size.height
    }

    /// Per-line heights in top-to-bottom order.
    pub fn heights(&self) -> Vec<f32> {
        self.lines.iter().map(|line| line.metrics.height).collect()
    }

    /// The y just below the last line.
    pub fn bottom(&self) -> f32 {
        self.origin.y as f32 + self.size.height
    }
}

/// Measures every line; all but the last carry `margin` in their height.
pub fn measure_lines<M: TextMeasure + ?Sized>(
    lines: &[String],
    font: &M,
    margin: f32,
) -> Vec<LineMetrics> {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let measure = font.measure(line);
            let trailing = if i == last { 0.0 } else { margin };
            LineMetrics {
                width: measure.pixel_width(),
                height: measure.height() + trailing,
            }
        })
        .collect()
}

/// Widest line by total height.
pub fn block_size(metrics: &[LineMetrics]) -> BlockSize {
    let width = metrics.iter().map(|m| m.width).fold(0.0f32, f32::max);
    let height = metrics.iter().map(|m| m.height).sum();
    BlockSize::new(width, height)
}

/// Wraps then measures `text`, rejecting text that produces no lines.
pub fn wrap_and_measure<M: TextMeasure + ?Sized>(
    field: &'static str,
    text: &str,
    wrap_limit: NonZeroUsize,
    font: &M,
    margin: f32,
) -> Result<(Vec<String>, Vec<LineMetrics>), ContentError> {
    let lines = wrap(text, wrap_limit);
    if lines.is_empty() {
        return Err(ContentError::new(field, "wraps to zero lines"));
    }
    let metrics = measure_lines(&lines, font, margin);
    Ok((lines, metrics))
}

/// Lays text out centered on a canvas, both axes.
///
/// Used by the quote/lyric pipeline. The engine holds nothing but the
/// parameters, so a single value can lay out any number of texts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLayoutEngine {
    pub canvas: CanvasSize,
    pub wrap_limit: NonZeroUsize,
    pub margin: f32,
}

impl TextLayoutEngine {
    /// Engine centering text on a canvas of `canvas` size.
    pub fn new(canvas: CanvasSize, wrap_limit: NonZeroUsize, margin: f32) -> Self {
        Self {
            canvas,
            wrap_limit,
            margin,
        }
    }

    /// Produces the centered block for `text`.
    ///
    /// The block starts at `floor((canvas_h - total_h) / 2)` and every line is
    /// centered horizontally on its own.
    pub fn layout<M: TextMeasure + ?Sized>(
        &self,
        text: &str,
        font: &M,
    ) -> Result<LayoutBlock, ContentError> {
        let (lines, metrics) =
            wrap_and_measure("text", text, self.wrap_limit, font, self.margin)?;

        let size = block_size(&metrics);
        let canvas_width = self.canvas.width as f32;
        let start_x = centered_offset(canvas_width, size.width);
        let start_y = centered_offset(self.canvas.height as f32, size.height);

        log::debug!(
            "centered {} lines ({}x{}) at y={start_y}",
            lines.len(),
            size.width,
            size.height
        );

        Ok(LayoutBlock::stack(
            Point::new(start_x, start_y),
            lines,
            metrics,
            HorizontalAlign::Center {
                container_width: canvas_width,
            },
        ))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::LineMeasure;
    use crate::text::testing::GridFont;

    /// Glyph extents of Ink Free at 250pt for the lyric fixture lines.
    struct FixtureFont;

    impl TextMeasure for FixtureFont {
        fn measure(&self, line: &str) -> LineMeasure {
            let (width, descent) = match line {
                "You don't get" => (1391.0, 84.0),
                "anything playing the" => (2163.0, 84.0),
                "part when it's" => (1517.0, 51.0),
                "insincere" => (873.0, 11.0),
                _ => (100.0, 0.0),
            };
            LineMeasure {
                width,
                ascent: 226.0,
                descent,
            }
        }
    }

    /// Every character is 10px wide and lines are 20px tall.
    const GRID: GridFont = GridFont { scale: 10.0 };

    fn engine(width: u32, height: u32, wrap: usize, margin: f32) -> TextLayoutEngine {
        TextLayoutEngine::new(
            CanvasSize::new(width, height),
            NonZeroUsize::new(wrap).unwrap(),
            margin,
        )
    }

    #[test]
    fn lyric_fixture_is_vertically_centered() {
        let block = engine(2800, 2800, 20, 0.0)
            .layout(
                "You don't get anything playing the part when it's insincere",
                &FixtureFont,
            )
            .unwrap();

        assert_eq!(block.origin.y, 833);
        assert_eq!(block.heights(), vec![310.0, 310.0, 277.0, 237.0]);
        assert_eq!(block.lines[0].position.y, 833);
        assert_eq!(block.lines[1].position.y, 1143);
        assert_eq!(block.lines[3].position.y, 1730);
    }

    #[test]
    fn lyric_fixture_lines_are_centered_independently() {
        let block = engine(2800, 2800, 20, 0.0)
            .layout(
                "You don't get anything playing the part when it's insincere",
                &FixtureFont,
            )
            .unwrap();

        let xs: Vec<i32> = block.lines.iter().map(|l| l.position.x).collect();
        assert_eq!(xs, vec![704, 318, 641, 963]);
    }

    #[test]
    fn last_line_carries_no_margin() {
        let block = engine(400, 400, 9, 50.0)
            .layout("Who needs memories", &GRID)
            .unwrap();

        assert_eq!(block.heights(), vec![70.0, 20.0]);
        assert_eq!(block.total_height(), 90.0);
        assert_eq!(block.origin.y, 155);
        assert_eq!(block.lines[1].position.y, 225);
    }

    #[test]
    fn total_height_is_sum_of_line_heights() {
        let block = engine(1000, 1000, 12, 7.5)
            .layout("one two three four five six seven eight nine ten", &GRID)
            .unwrap();

        let sum: f32 = block.heights().iter().sum();
        assert_eq!(sum, block.total_height());
        let with_margins = 20.0 * block.lines.len() as f32 + 7.5 * (block.lines.len() - 1) as f32;
        assert_eq!(block.total_height(), with_margins);
    }

    #[test]
    fn single_line_goes_through_same_centering() {
        let block = engine(300, 101, 40, 10.0)
            .layout("hello", &GRID)
            .unwrap();

        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.heights(), vec![20.0]);
        assert_eq!(block.lines[0].position, Point::new(125, 40));
    }

    #[test]
    fn empty_text_is_invalid_content() {
        let err = engine(100, 100, 10, 0.0).layout("   ", &GRID).unwrap_err();
        assert_eq!(err.field, "text");
    }

    #[test]
    fn layout_is_deterministic() {
        let engine = engine(800, 600, 14, 3.0);
        let text = "the quick brown fox jumps over the lazy dog";
        let first = engine.layout(text, &GRID).unwrap();
        let second = engine.layout(text, &GRID).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn left_aligned_stack_shares_origin_x() {
        let lines = vec!["ab".to_string(), "abcd".to_string()];
        let metrics = measure_lines(&lines, &GRID, 5.0);
        let block = LayoutBlock::stack(Point::new(12, 30), lines, metrics, HorizontalAlign::Left);

        assert!(block.lines.iter().all(|l| l.position.x == 12));
        assert_eq!(block.lines[1].position.y, 55);
        assert_eq!(block.size, BlockSize::new(40.0, 45.0));
        assert_eq!(block.bottom(), 75.0);
    }
}
