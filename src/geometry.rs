//! Pixel-space geometry shared by the layout and rendering stages.
//!
//! **Y-axis goes down**, origin at the top-left corner of the canvas.

use euclid::{Point2D, Size2D, UnknownUnit};

/// Integer pixel position on a canvas.
pub type Point = Point2D<i32, UnknownUnit>;

/// Measured extent of a text block. Heights may carry a fractional margin.
pub type BlockSize = Size2D<f32, UnknownUnit>;

/// Canvas extent in whole pixels.
pub type CanvasSize = Size2D<u32, UnknownUnit>;

/// Offset that centers `extent` inside `available`, rounded toward negative
/// infinity so odd remainders favour the top/left edge.
///
/// Content larger than the available space yields a negative offset.
pub fn centered_offset(available: f32, extent: f32) -> i32 {
    ((available - extent) / 2.0).floor() as i32
}
