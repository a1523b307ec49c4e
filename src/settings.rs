//! Graphic settings for both pipelines and the resolver that picks between
//! custom settings and named presets.

mod post;
mod preset;
mod quote;

use std::num::NonZeroUsize;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SettingsError;
use crate::geometry::CanvasSize;

pub use post::{PostSettings, ProfilePicSize, RawPostSettings};
pub use preset::{PresetRegistry, presets};
pub use quote::{QuoteSettings, RawQuoteSettings};

/// Behaviour shared by the per-pipeline settings structs.
pub trait GraphicSettings: Sized + Clone {
    /// Serialized shape read from settings files.
    type Raw: DeserializeOwned;

    /// Short pipeline name used in log lines and error messages.
    const KIND: &'static str;

    /// Validates a deserialized settings object.
    fn from_raw(raw: Self::Raw) -> Result<Self, SettingsError>;

    /// Looks up a preset by (case-insensitive) name.
    fn preset(name: &str) -> Option<Self>;

    /// Names accepted by [`GraphicSettings::preset`], sorted.
    fn preset_names() -> Vec<&'static str>;

    /// Parses settings from a JSON value.
    fn from_json_value(value: serde_json::Value) -> Result<Self, SettingsError> {
        let raw: Self::Raw = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Reads settings from a JSON file.
    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: Self::Raw = serde_json::from_str(&contents)?;
        Self::from_raw(raw)
    }
}

/// Chooses the settings a render will use.
///
/// Custom settings win whenever they are present, and the preset name is then
/// ignored. Without custom settings the preset must exist. Without either,
/// [`SettingsError::MissingSettings`] is returned. An empty preset name counts
/// as no preset.
pub fn resolve<S: GraphicSettings>(
    custom: Option<S>,
    preset: Option<&str>,
) -> Result<S, SettingsError> {
    if let Some(settings) = custom {
        if let Some(name) = preset.filter(|name| !name.is_empty()) {
            log::debug!("custom {} settings given, ignoring preset `{name}`", S::KIND);
        }
        return Ok(settings);
    }

    let Some(name) = preset.filter(|name| !name.trim().is_empty()) else {
        return Err(SettingsError::MissingSettings);
    };

    S::preset(name).ok_or_else(|| SettingsError::UnknownPreset {
        name: name.to_string(),
        available: S::preset_names().join(", "),
    })
}

/// Like [`resolve`], for custom settings that arrive as JSON.
///
/// `null` and `{}` mean "no custom settings".
pub fn resolve_json<S: GraphicSettings>(
    custom: &serde_json::Value,
    preset: Option<&str>,
) -> Result<S, SettingsError> {
    let is_empty = match custom {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };

    let custom = if is_empty {
        None
    } else {
        Some(S::from_json_value(custom.clone())?)
    };

    resolve(custom, preset)
}

/// Largest accepted canvas or profile picture side, in pixels.
pub const MAX_SIDE: u32 = 16_384;

pub(crate) fn canvas_from_list(values: &[f64]) -> Result<CanvasSize, SettingsError> {
    let [width, height] = values else {
        return Err(SettingsError::InvalidFieldLength {
            field: "size",
            expected: 2,
            actual: values.len(),
        });
    };
    Ok(CanvasSize::new(
        whole_pixels("size", *width)?,
        whole_pixels("size", *height)?,
    ))
}

pub(crate) fn whole_pixels(field: &'static str, value: f64) -> Result<u32, SettingsError> {
    if !value.is_finite() || value < 1.0 {
        return Err(SettingsError::InvalidNumber {
            field,
            reason: "must be a positive number of pixels",
        });
    }
    if value.fract() != 0.0 {
        return Err(SettingsError::InvalidNumber {
            field,
            reason: "must be a whole number of pixels",
        });
    }
    if value > MAX_SIDE as f64 {
        return Err(SettingsError::InvalidNumber {
            field,
            reason: "must be at most 16384 pixels",
        });
    }
    Ok(value as u32)
}

pub(crate) fn font_size(field: &'static str, value: f64) -> Result<f32, SettingsError> {
    if !(value as f32).is_finite() || value <= 0.0 {
        return Err(SettingsError::InvalidNumber {
            field,
            reason: "must be a positive number",
        });
    }
    Ok(value as f32)
}

pub(crate) fn wrap_limit(value: f64) -> Result<NonZeroUsize, SettingsError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(SettingsError::InvalidNumber {
            field: "wrap_limit",
            reason: "must be a whole number",
        });
    }
    NonZeroUsize::new(value.max(0.0) as usize).ok_or(SettingsError::InvalidNumber {
        field: "wrap_limit",
        reason: "must be greater than zero",
    })
}

pub(crate) fn margin(value: f64) -> Result<f32, SettingsError> {
    if !(value as f32).is_finite() || value < 0.0 {
        return Err(SettingsError::InvalidNumber {
            field: "margin_bottom",
            reason: "must be zero or a positive number",
        });
    }
    Ok(value as f32)
}

pub(crate) fn font_family(value: String) -> Result<String, SettingsError> {
    if value.trim().is_empty() {
        return Err(SettingsError::EmptyField {
            field: "font_family",
        });
    }
    Ok(value)
}

/// Field reference for quote/lyric settings files.
pub const QUOTE_SETTINGS_HELP: &str = r##"Quote/lyric settings are a JSON object with these fields:
    "font_family": font family name or path to a font file;
    "font_size": size of the font;
    "size": [width, height] of the graphic;
    "color_scheme": [background, text] colors as "#rrggbb", "#rgb", "rgba(r, g, b, a)" or null for transparent;
    "wrap_limit": max number of characters per line of text;
    "margin_bottom": space to leave in between text lines.
All numerical values are pixels."##;

/// Field reference for post settings files.
pub const POST_SETTINGS_HELP: &str = r##"Post settings are a JSON object with these fields:
    "font_family": font family name or path to a font file;
    "font_size_header": size of the font for the username and handle;
    "font_size_text": size of the font for the post text;
    "size": [width, height] of the graphic;
    "color_scheme": [background, text] colors as "#rrggbb", "#rgb", "rgba(r, g, b, a)" or null for transparent;
    "wrap_limit": max number of characters per line of post text;
    "margin_bottom": space to leave in between text lines;
    "profile_pic_size": optional [width, height] of the profile picture, must be square; [0, 0] or absent means 10% of the graphic width.
All numerical values are pixels."##;
