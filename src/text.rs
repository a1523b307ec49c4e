/// The centering layout engine and its output types.
pub mod layout;
/// Font-metric measuring of single lines.
pub mod measure;
/// Greedy word wrapping at a character limit.
pub mod wrap;

#[cfg(test)]
pub(crate) mod testing;

pub use layout::{HorizontalAlign, LayoutBlock, LayoutLine, LineMetrics, TextLayoutEngine};
pub use measure::{LineMeasure, PlacedGlyph, SizedFont, TextMeasure};
pub use wrap::wrap;
