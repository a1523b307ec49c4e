use std::path::PathBuf;

use thiserror::Error;

/// Failures while choosing or building graphic settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Neither custom settings nor a preset name were supplied.
    #[error("no custom settings and no preset given; pass one or the other")]
    MissingSettings,

    /// The preset name is not in the registry.
    #[error("unknown preset `{name}`; available presets: {available}")]
    UnknownPreset { name: String, available: String },

    /// A list-valued field has the wrong number of items.
    #[error("`{field}` must have {expected} items, got {actual}")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A color string could not be parsed.
    #[error("`{value}` is not a valid color; use #rgb, #rrggbb, #rrggbbaa or rgba(r, g, b, a)")]
    InvalidColorFormat { value: String },

    /// A text field is empty or blank.
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },

    /// A numeric field is out of range or not a number.
    #[error("`{field}` {reason}")]
    InvalidNumber {
        field: &'static str,
        reason: &'static str,
    },

    #[error("malformed settings json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A content field that cannot be laid out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ContentError {
    pub field: &'static str,
    pub reason: String,
}

impl ContentError {
    /// Error for `field` with a human readable reason.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Everything that can abort a single render call.
///
/// Every variant is raised before the canvas is created, apart from
/// [`RenderError::Image`] and [`RenderError::Io`] which come from writing the
/// finished file.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    InvalidContent(#[from] ContentError),

    /// The font identifier matched neither a file nor an installed family.
    #[error("font `{0}` was not found; pass an installed family name or a path to a font file")]
    FontNotFound(String),

    /// The avatar could not be opened or decoded.
    #[error("profile picture `{path}` is unavailable: {source}")]
    ProfilePictureUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A batch file that cannot be read as a whole.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed batch file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RenderError {
    /// Returns `true` for failures caused by the caller's input rather than the
    /// environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Settings(_) | Self::InvalidContent(_) | Self::FontNotFound(_)
        )
    }
}
