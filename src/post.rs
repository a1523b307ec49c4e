//! Geometry of the social-post graphic: header (avatar, username, handle)
//! stacked above the wrapped body text, the pair centered as a unit.

mod dimensions;
mod header;

use std::num::NonZeroUsize;

use crate::content::PostContent;
use crate::error::ContentError;
use crate::geometry::{CanvasSize, Point, centered_offset};
use crate::settings::PostSettings;
use crate::text::TextMeasure;
use crate::text::layout::{HorizontalAlign, LayoutBlock, LineMetrics, block_size, wrap_and_measure};

pub use dimensions::{
    ContentDimensions, HeaderMeasure, HeaderMode, USERNAME_WRAP_WITH_AVATAR,
    USERNAME_WRAP_WITHOUT_AVATAR,
};
pub use header::{AvatarPlacement, HeaderLayout};

/// Everything the post renderer needs to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct PostLayout {
    pub dimensions: ContentDimensions,
    pub header: HeaderLayout,
    pub body: LayoutBlock,
}

/// Measured but not yet positioned post.
#[derive(Clone, Debug, PartialEq)]
pub struct PostMeasure {
    pub header: HeaderMeasure,
    pub body: Vec<String>,
    pub body_metrics: Vec<LineMetrics>,
}

impl PostMeasure {
    /// Header and body footprints.
    pub fn dimensions(&self) -> ContentDimensions {
        ContentDimensions {
            header: self.header.size,
            text: block_size(&self.body_metrics),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostLayoutEngine {
    pub canvas: CanvasSize,
    pub wrap_limit: NonZeroUsize,
    pub margin: f32,
}

impl PostLayoutEngine {
    /// Engine for a canvas of `canvas` size, wrapping the body at `wrap_limit`.
    pub fn new(canvas: CanvasSize, wrap_limit: NonZeroUsize, margin: f32) -> Self {
        Self {
            canvas,
            wrap_limit,
            margin,
        }
    }

    /// Engine configured from post settings.
    pub fn from_settings(settings: &PostSettings) -> Self {
        Self::new(settings.canvas(), settings.wrap_limit(), settings.margin())
    }

    /// Wraps and measures the header and body.
    pub fn measure<H, T>(
        &self,
        content: &PostContent,
        mode: HeaderMode,
        header_font: &H,
        text_font: &T,
    ) -> Result<PostMeasure, ContentError>
    where
        H: TextMeasure + ?Sized,
        T: TextMeasure + ?Sized,
    {
        let header = HeaderMeasure::new(
            content.display_name(),
            content.handle(),
            mode,
            header_font,
            self.margin,
        )?;
        let (body, body_metrics) =
            wrap_and_measure("text", content.text(), self.wrap_limit, text_font, self.margin)?;

        Ok(PostMeasure {
            header,
            body,
            body_metrics,
        })
    }

    /// Footprints of the header and body blocks.
    pub fn content_dimensions<H, T>(
        &self,
        content: &PostContent,
        mode: HeaderMode,
        header_font: &H,
        text_font: &T,
    ) -> Result<ContentDimensions, ContentError>
    where
        H: TextMeasure + ?Sized,
        T: TextMeasure + ?Sized,
    {
        Ok(self
            .measure(content, mode, header_font, text_font)?
            .dimensions())
    }

    /// Positions the header and body on the canvas.
    ///
    /// The composition is centered vertically as a whole. Horizontally the
    /// header block is centered on its own and every body line is centered
    /// on its own, so the narrower block sits centered against the wider one.
    pub fn layout<H, T>(
        &self,
        content: &PostContent,
        mode: HeaderMode,
        header_font: &H,
        text_font: &T,
    ) -> Result<PostLayout, ContentError>
    where
        H: TextMeasure + ?Sized,
        T: TextMeasure + ?Sized,
    {
        let measure = self.measure(content, mode, header_font, text_font)?;
        let dimensions = measure.dimensions();
        let canvas_width = self.canvas.width as f32;

        let anchor = Point::new(
            centered_offset(canvas_width, dimensions.header.width),
            dimensions.initial_anchor(self.canvas.height, self.margin),
        );
        log::debug!(
            "post `{}`: header {}x{}, text {}x{}, anchor ({}, {})",
            content.name(),
            dimensions.header.width,
            dimensions.header.height,
            dimensions.text.width,
            dimensions.text.height,
            anchor.x,
            anchor.y
        );

        let header = HeaderLayout::new(anchor, measure.header, self.margin);
        let body = LayoutBlock::stack(
            Point::new(
                centered_offset(canvas_width, dimensions.text.width),
                header.body_y,
            ),
            measure.body,
            measure.body_metrics,
            HorizontalAlign::Center {
                container_width: canvas_width,
            },
        );

        Ok(PostLayout {
            dimensions,
            header,
            body,
        })
    }
}

/// Header and body footprints of `content` drawn with `settings`.
///
/// `avatar_size` is `None` when the post has no profile picture.
pub fn calculate_content_dimensions<H, T>(
    content: &PostContent,
    settings: &PostSettings,
    header_font: &H,
    text_font: &T,
    avatar_size: Option<u32>,
) -> Result<ContentDimensions, ContentError>
where
    H: TextMeasure + ?Sized,
    T: TextMeasure + ?Sized,
{
    PostLayoutEngine::from_settings(settings).content_dimensions(
        content,
        HeaderMode::from_avatar_size(avatar_size),
        header_font,
        text_font,
    )
}
