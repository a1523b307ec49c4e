use std::num::NonZeroUsize;

use crate::error::ContentError;
use crate::geometry::BlockSize;
use crate::text::{TextMeasure, wrap};
use crate::text::layout::{LineMetrics, block_size, measure_lines, wrap_and_measure};

/// Username column width when an avatar sits beside it.
pub const USERNAME_WRAP_WITH_AVATAR: NonZeroUsize = wrap::limit(19);
/// Username column width when the header spans the full width.
pub const USERNAME_WRAP_WITHOUT_AVATAR: NonZeroUsize = wrap::limit(38);

/// Whether the header carries a profile picture, and how big it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderMode {
    WithAvatar { size: u32 },
    WithoutAvatar,
}

impl HeaderMode {
    /// `WithAvatar` when a size is given.
    pub fn from_avatar_size(size: Option<u32>) -> Self {
        match size {
            Some(size) => Self::WithAvatar { size },
            None => Self::WithoutAvatar,
        }
    }

    /// Max characters per username line in this mode.
    pub fn username_wrap_limit(self) -> NonZeroUsize {
        match self {
            Self::WithAvatar { .. } => USERNAME_WRAP_WITH_AVATAR,
            Self::WithoutAvatar => USERNAME_WRAP_WITHOUT_AVATAR,
        }
    }

    /// Horizontal space taken by the avatar and the gap after it.
    pub fn avatar_column(self, margin: f32) -> f32 {
        match self {
            Self::WithAvatar { size } => size as f32 + margin,
            Self::WithoutAvatar => 0.0,
        }
    }
}

/// Measured username and handle, plus the header footprint they produce.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderMeasure {
    pub mode: HeaderMode,
    pub username: Vec<String>,
    pub username_metrics: Vec<LineMetrics>,
    pub handle: String,
    pub handle_metrics: LineMetrics,
    pub size: BlockSize,
}

impl HeaderMeasure {
    /// Wraps the username for `mode` and measures both header lines.
    ///
    /// A one-line username next to an avatar gives a header as tall as the
    /// avatar plus `margin`. In every other case the header is as tall as its
    /// text plus `margin`.
    pub fn new<M: TextMeasure + ?Sized>(
        display_name: &str,
        handle: &str,
        mode: HeaderMode,
        font: &M,
        margin: f32,
    ) -> Result<Self, ContentError> {
        let (username, username_metrics) = wrap_and_measure(
            "display name",
            display_name,
            mode.username_wrap_limit(),
            font,
            margin,
        )?;

        let handle = handle.trim().to_string();
        let Some(handle_metrics) = measure_lines(std::slice::from_ref(&handle), font, 0.0)
            .into_iter()
            .next()
        else {
            return Err(ContentError::new("handle", "could not be measured"));
        };

        let username_size = block_size(&username_metrics);
        let height = match mode {
            HeaderMode::WithAvatar { size } if username.len() == 1 => size as f32 + margin,
            _ => username_size.height + handle_metrics.height + margin,
        };
        let width = mode.avatar_column(margin) + username_size.width.max(handle_metrics.width);

        let measure = Self {
            mode,
            username,
            username_metrics,
            handle,
            handle_metrics,
            size: BlockSize::new(width, height),
        };
        if measure.text_overflows_avatar() {
            log::warn!(
                "username and handle of `{display_name}` are taller than the profile picture; \
                 the handle will overlap the post body"
            );
        }
        Ok(measure)
    }

    /// `true` when the header height comes from the avatar but the username
    /// and handle lines are taller than it.
    pub fn text_overflows_avatar(&self) -> bool {
        match self.mode {
            HeaderMode::WithAvatar { size } if self.username.len() == 1 => {
                block_size(&self.username_metrics).height + self.handle_metrics.height
                    > size as f32
            }
            _ => false,
        }
    }
}

/// Footprint of the two blocks of a post graphic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentDimensions {
    pub header: BlockSize,
    pub text: BlockSize,
}

impl ContentDimensions {
    /// Height of the whole composition: header, one margin, body.
    pub fn total_height(&self, margin: f32) -> f32 {
        self.header.height + margin + self.text.height
    }

    /// Top edge of the composition when centered on a canvas `canvas_height`
    /// tall.
    pub fn initial_anchor(&self, canvas_height: u32, margin: f32) -> i32 {
        ((canvas_height as f32 - self.total_height(margin)) / 2.0).floor() as i32
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::testing::GridFont;

    const NAME: &str = "José Fernando Costa Almeida";

    #[test]
    fn username_wraps_narrower_beside_an_avatar() {
        let font = GridFont { scale: 10.0 };

        let without =
            HeaderMeasure::new(NAME, "@Soulsinporto", HeaderMode::WithoutAvatar, &font, 10.0)
                .unwrap();
        assert_eq!(without.username, [NAME]);
        assert_eq!(without.size, BlockSize::new(270.0, 50.0));

        let with = HeaderMeasure::new(
            NAME,
            "@Soulsinporto",
            HeaderMode::WithAvatar { size: 100 },
            &font,
            10.0,
        )
        .unwrap();
        assert_eq!(with.username, ["José Fernando Costa", "Almeida"]);
        assert_eq!(with.size, BlockSize::new(300.0, 80.0));
    }

    #[test]
    fn one_line_username_with_avatar_is_avatar_plus_margin() {
        for scale in [4.0, 10.0, 40.0] {
            let font = GridFont { scale };
            let header =
                HeaderMeasure::new("Ana", "@ana", HeaderMode::WithAvatar { size: 180 }, &font, 30.0)
                    .unwrap();
            assert_eq!(header.size.height, 210.0, "scale {scale}");
        }
    }

    #[test]
    fn tall_header_text_beside_a_small_avatar_is_flagged() {
        // lines are 20 px at scale 10: username 20 + handle 20 > 30
        let font = GridFont { scale: 10.0 };
        let header =
            HeaderMeasure::new("Ana", "@ana", HeaderMode::WithAvatar { size: 30 }, &font, 5.0)
                .unwrap();
        assert_eq!(header.size.height, 35.0);
        assert!(header.text_overflows_avatar());

        let roomy =
            HeaderMeasure::new("Ana", "@ana", HeaderMode::WithAvatar { size: 40 }, &font, 5.0)
                .unwrap();
        assert!(!roomy.text_overflows_avatar());

        let no_avatar =
            HeaderMeasure::new("Ana", "@ana", HeaderMode::WithoutAvatar, &font, 5.0).unwrap();
        assert!(!no_avatar.text_overflows_avatar());
    }

    #[test]
    fn header_width_takes_the_wider_of_username_and_handle() {
        let font = GridFont { scale: 10.0 };
        let header = HeaderMeasure::new(
            "Ana",
            "@a_much_longer_handle",
            HeaderMode::WithAvatar { size: 50 },
            &font,
            5.0,
        )
        .unwrap();
        assert_eq!(header.size.width, 50.0 + 5.0 + 210.0);
    }

    #[test]
    fn blank_username_is_rejected() {
        let font = GridFont { scale: 10.0 };
        let err = HeaderMeasure::new(" ", "@a", HeaderMode::WithoutAvatar, &font, 5.0).unwrap_err();
        assert_eq!(err.field, "display name");
    }

    #[test]
    fn anchor_centers_header_margin_and_body() {
        let dimensions = ContentDimensions {
            header: BlockSize::new(900.0, 194.0),
            text: BlockSize::new(1200.0, 111.0),
        };
        assert_eq!(dimensions.total_height(30.0), 335.0);
        assert_eq!(dimensions.initial_anchor(1800, 30.0), 732);
    }
}
