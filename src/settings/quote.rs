use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::color::ColorScheme;
use crate::error::SettingsError;
use crate::geometry::CanvasSize;

use super::GraphicSettings;

/// Settings file shape for quote/lyric graphics.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuoteSettings {
    pub font_family: String,
    pub font_size: f64,
    pub size: Vec<f64>,
    pub color_scheme: Vec<Option<String>>,
    pub wrap_limit: f64,
    pub margin_bottom: f64,
}

/// Validated settings for the quote/lyric pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSettings {
    pub(super) font_family: String,
    pub(super) font_size: f32,
    pub(super) canvas: CanvasSize,
    pub(super) colors: ColorScheme,
    pub(super) wrap_limit: NonZeroUsize,
    pub(super) margin: f32,
}

impl QuoteSettings {
    /// Builds settings in code, with the same checks as a settings file.
    pub fn new(
        font_family: impl Into<String>,
        font_size: f32,
        canvas: CanvasSize,
        colors: ColorScheme,
        wrap_limit: NonZeroUsize,
        margin: f32,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            font_family: super::font_family(font_family.into())?,
            font_size: super::font_size("font_size", font_size as f64)?,
            canvas: super::canvas_from_list(&[canvas.width as f64, canvas.height as f64])?,
            colors,
            wrap_limit,
            margin: super::margin(margin as f64)?,
        })
    }

    /// Font family name or path to a font file.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Size of the output graphic.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Background and text colors.
    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    /// Max characters per line.
    pub fn wrap_limit(&self) -> NonZeroUsize {
        self.wrap_limit
    }

    /// Space added below every line except the last.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl TryFrom<RawQuoteSettings> for QuoteSettings {
    type Error = SettingsError;

    fn try_from(raw: RawQuoteSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            font_family: super::font_family(raw.font_family)?,
            font_size: super::font_size("font_size", raw.font_size)?,
            canvas: super::canvas_from_list(&raw.size)?,
            colors: ColorScheme::from_list(&raw.color_scheme)?,
            wrap_limit: super::wrap_limit(raw.wrap_limit)?,
            margin: super::margin(raw.margin_bottom)?,
        })
    }
}

impl GraphicSettings for QuoteSettings {
    type Raw = RawQuoteSettings;

    const KIND: &'static str = "quote";

    fn from_raw(raw: Self::Raw) -> Result<Self, SettingsError> {
        raw.try_into()
    }

    fn preset(name: &str) -> Option<Self> {
        super::presets().quote(name).cloned()
    }

    fn preset_names() -> Vec<&'static str> {
        super::presets().quote_names()
    }
}
