use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::color::ColorScheme;
use crate::error::SettingsError;
use crate::geometry::CanvasSize;

use super::GraphicSettings;

/// Settings file shape for post graphics.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPostSettings {
    pub font_family: String,
    pub font_size_header: f64,
    pub font_size_text: f64,
    pub size: Vec<f64>,
    pub color_scheme: Vec<Option<String>>,
    pub wrap_limit: f64,
    pub margin_bottom: f64,
    #[serde(default)]
    pub profile_pic_size: Option<Vec<f64>>,
}

/// Side length of the circular profile picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfilePicSize {
    /// A tenth of the canvas width, at least one pixel.
    #[default]
    Auto,
    Square(u32),
}

impl ProfilePicSize {
    /// Parses the `[width, height]` settings field. `[0, 0]` means auto.
    pub fn from_list(values: &[f64]) -> Result<Self, SettingsError> {
        let [width, height] = values else {
            return Err(SettingsError::InvalidFieldLength {
                field: "profile_pic_size",
                expected: 2,
                actual: values.len(),
            });
        };
        if *width == 0.0 && *height == 0.0 {
            return Ok(Self::Auto);
        }
        if width != height {
            return Err(SettingsError::InvalidNumber {
                field: "profile_pic_size",
                reason: "must be square",
            });
        }
        super::whole_pixels("profile_pic_size", *width).map(Self::Square)
    }

    /// Side length in pixels on a canvas of `canvas` size.
    pub fn side(self, canvas: CanvasSize) -> u32 {
        match self {
            Self::Auto => ((canvas.width as f32 * 0.1).floor() as u32).max(1),
            Self::Square(side) => side,
        }
    }
}

/// Validated settings for the post pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSettings {
    pub(super) font_family: String,
    pub(super) font_size_header: f32,
    pub(super) font_size_text: f32,
    pub(super) canvas: CanvasSize,
    pub(super) colors: ColorScheme,
    pub(super) wrap_limit: NonZeroUsize,
    pub(super) margin: f32,
    pub(super) profile_pic: ProfilePicSize,
}

impl PostSettings {
    /// Builds settings in code, with the same checks as a settings file.
    pub fn new(
        font_family: impl Into<String>,
        font_size_header: f32,
        font_size_text: f32,
        canvas: CanvasSize,
        colors: ColorScheme,
        wrap_limit: NonZeroUsize,
        margin: f32,
        profile_pic: ProfilePicSize,
    ) -> Result<Self, SettingsError> {
        if let ProfilePicSize::Square(side) = profile_pic {
            super::whole_pixels("profile_pic_size", side as f64)?;
        }
        Ok(Self {
            font_family: super::font_family(font_family.into())?,
            font_size_header: super::font_size("font_size_header", font_size_header as f64)?,
            font_size_text: super::font_size("font_size_text", font_size_text as f64)?,
            canvas: super::canvas_from_list(&[canvas.width as f64, canvas.height as f64])?,
            colors,
            wrap_limit,
            margin: super::margin(margin as f64)?,
            profile_pic,
        })
    }

    /// Font family name or path to a font file.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size of the username and handle.
    pub fn font_size_header(&self) -> f32 {
        self.font_size_header
    }

    /// Font size of the post body.
    pub fn font_size_text(&self) -> f32 {
        self.font_size_text
    }

    /// Size of the output graphic.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Background and text colors.
    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    /// Max characters per line of the post body.
    pub fn wrap_limit(&self) -> NonZeroUsize {
        self.wrap_limit
    }

    /// Space below every body line except the last, and around the header.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Configured profile picture size, possibly `Auto`.
    pub fn profile_pic(&self) -> ProfilePicSize {
        self.profile_pic
    }

    /// Resolved avatar side length for this canvas.
    pub fn profile_pic_side(&self) -> u32 {
        self.profile_pic.side(self.canvas)
    }
}

impl TryFrom<RawPostSettings> for PostSettings {
    type Error = SettingsError;

    fn try_from(raw: RawPostSettings) -> Result<Self, Self::Error> {
        let profile_pic = match raw.profile_pic_size.as_deref() {
            None => ProfilePicSize::Auto,
            Some(values) => ProfilePicSize::from_list(values)?,
        };

        Ok(Self {
            font_family: super::font_family(raw.font_family)?,
            font_size_header: super::font_size("font_size_header", raw.font_size_header)?,
            font_size_text: super::font_size("font_size_text", raw.font_size_text)?,
            canvas: super::canvas_from_list(&raw.size)?,
            colors: ColorScheme::from_list(&raw.color_scheme)?,
            wrap_limit: super::wrap_limit(raw.wrap_limit)?,
            margin: super::margin(raw.margin_bottom)?,
            profile_pic,
        })
    }
}

impl GraphicSettings for PostSettings {
    type Raw = RawPostSettings;

    const KIND: &'static str = "post";

    fn from_raw(raw: Self::Raw) -> Result<Self, SettingsError> {
        raw.try_into()
    }

    fn preset(name: &str) -> Option<Self> {
        super::presets().post(name).cloned()
    }

    fn preset_names() -> Vec<&'static str> {
        super::presets().post_names()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> serde_json::Value {
        json!({
            "font_family": "sans-serif",
            "font_size_header": 80,
            "font_size_text": 100,
            "size": [1800, 1800],
            "color_scheme": ["#15202b", "#ffffff"],
            "wrap_limit": 32,
            "margin_bottom": 30
        })
    }

    #[test]
    fn missing_profile_pic_size_is_auto() {
        let settings = PostSettings::from_json_value(base()).unwrap();
        assert_eq!(settings.profile_pic(), ProfilePicSize::Auto);
        assert_eq!(settings.profile_pic_side(), 180);
    }

    #[test]
    fn zero_profile_pic_size_is_auto() {
        let mut value = base();
        value["profile_pic_size"] = json!([0, 0]);
        let settings = PostSettings::from_json_value(value).unwrap();
        assert_eq!(settings.profile_pic(), ProfilePicSize::Auto);
    }

    #[test]
    fn explicit_profile_pic_size_must_be_square() {
        let mut value = base();
        value["profile_pic_size"] = json!([194, 194]);
        let settings = PostSettings::from_json_value(value.clone()).unwrap();
        assert_eq!(settings.profile_pic_side(), 194);

        value["profile_pic_size"] = json!([194, 100]);
        assert!(matches!(
            PostSettings::from_json_value(value.clone()),
            Err(SettingsError::InvalidNumber { field: "profile_pic_size", .. })
        ));

        value["profile_pic_size"] = json!([194]);
        assert!(matches!(
            PostSettings::from_json_value(value),
            Err(SettingsError::InvalidFieldLength { field: "profile_pic_size", .. })
        ));
    }

    #[test]
    fn fractional_or_oversized_profile_pic_is_rejected() {
        let mut value = base();
        value["profile_pic_size"] = json!([194.5, 194.5]);
        assert!(matches!(
            PostSettings::from_json_value(value.clone()),
            Err(SettingsError::InvalidNumber { field: "profile_pic_size", .. })
        ));

        value["profile_pic_size"] = json!([4294967295u32, 4294967295u32]);
        assert!(PostSettings::from_json_value(value).is_err());
    }

    #[test]
    fn auto_side_floors_a_tenth_of_the_width() {
        assert_eq!(ProfilePicSize::Auto.side(CanvasSize::new(1805, 10)), 180);
        assert_eq!(ProfilePicSize::Square(64).side(CanvasSize::new(1805, 10)), 64);
    }

    #[test]
    fn bad_color_is_rejected() {
        let mut value = base();
        value["color_scheme"] = json!(["navy", "#fff"]);
        assert!(matches!(
            PostSettings::from_json_value(value),
            Err(SettingsError::InvalidColorFormat { .. })
        ));
    }
}
