use crate::geometry::Point;
use crate::text::layout::{HorizontalAlign, LayoutBlock, LayoutLine};

use super::dimensions::{HeaderMeasure, HeaderMode};

/// Where the circular profile picture goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvatarPlacement {
    pub position: Point,
    pub size: u32,
}

/// Positioned header pieces and the y where the body starts.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderLayout {
    pub avatar: Option<AvatarPlacement>,
    pub username: Vec<LayoutLine>,
    pub handle: LayoutLine,
    pub body_y: i32,
}

impl HeaderLayout {
    /// Places the header with its top-left corner at `anchor`.
    ///
    /// With an avatar the picture sits at `anchor` and the text column starts
    /// one margin to its right; without one the text starts at `anchor`.
    /// Username lines are stacked left-aligned with the handle right below.
    pub fn new(anchor: Point, measure: HeaderMeasure, margin: f32) -> Self {
        let avatar = match measure.mode {
            HeaderMode::WithAvatar { size } => Some(AvatarPlacement {
                position: anchor,
                size,
            }),
            HeaderMode::WithoutAvatar => None,
        };
        let text_x = anchor.x + measure.mode.avatar_column(margin).floor() as i32;

        let username = LayoutBlock::stack(
            Point::new(text_x, anchor.y),
            measure.username,
            measure.username_metrics,
            HorizontalAlign::Left,
        );
        let handle = LayoutLine {
            text: measure.handle,
            metrics: measure.handle_metrics,
            position: Point::new(text_x, username.bottom().floor() as i32),
        };
        let body_y = (anchor.y as f32 + measure.size.height + margin).floor() as i32;

        log::trace!(
            "header at ({}, {}), {} username lines, body at y={body_y}",
            anchor.x,
            anchor.y,
            username.lines.len()
        );

        Self {
            avatar,
            username: username.lines,
            handle,
            body_y,
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::testing::GridFont;

    const FONT: GridFont = GridFont { scale: 10.0 };

    #[test]
    fn text_column_sits_beside_the_avatar() {
        let measure =
            HeaderMeasure::new("Ana", "@ana", HeaderMode::WithAvatar { size: 100 }, &FONT, 20.0)
                .unwrap();
        let header = HeaderLayout::new(Point::new(40, 60), measure, 20.0);

        assert_eq!(
            header.avatar,
            Some(AvatarPlacement {
                position: Point::new(40, 60),
                size: 100
            })
        );
        assert_eq!(header.username[0].position, Point::new(160, 60));
        assert_eq!(header.handle.position, Point::new(160, 80));
        // header is avatar + margin tall, then one more margin
        assert_eq!(header.body_y, 60 + 120 + 20);
    }

    #[test]
    fn without_avatar_text_starts_at_the_anchor() {
        let measure = HeaderMeasure::new(
            "José Fernando Costa",
            "@Soulsinporto",
            HeaderMode::WithoutAvatar,
            &FONT,
            20.0,
        )
        .unwrap();
        let header = HeaderLayout::new(Point::new(5, 10), measure, 20.0);

        assert!(header.avatar.is_none());
        assert_eq!(header.username.len(), 1);
        assert_eq!(header.username[0].position, Point::new(5, 10));
        assert_eq!(header.handle.position, Point::new(5, 30));
        // 20 (username) + 20 (handle) + 20 (margin), then one more margin
        assert_eq!(header.body_y, 10 + 60 + 20);
    }

    #[test]
    fn wrapped_username_pushes_the_handle_down() {
        let measure = HeaderMeasure::new(
            "José Fernando Costa Almeida",
            "@Soulsinporto",
            HeaderMode::WithAvatar { size: 30 },
            &FONT,
            10.0,
        )
        .unwrap();
        let header = HeaderLayout::new(Point::new(0, 0), measure, 10.0);

        let ys: Vec<i32> = header.username.iter().map(|l| l.position.y).collect();
        assert_eq!(ys, [0, 30]);
        assert_eq!(header.handle.position.y, 50);
        assert_eq!(header.body_y, 30 + 20 + 20 + 10 + 10);
    }
}
