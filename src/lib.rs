//! # textcard
//!
//! Quote, lyric and social-post graphics from plain text.
//!
//! ## Overview
//!
//! `textcard` wraps text at a character limit, measures every line with the
//! real glyph metrics of the chosen font, centers the result on a fixed-size
//! canvas and writes it out as a PNG. Posts additionally get a header block
//! with an optional circular profile picture, the author's name and handle.
//!
//! The core of the library is the [`FontSystem`], which owns the fonts and
//! runs both pipelines.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use textcard::{FontSystem, QuoteContent, QuoteSettings, settings};
//!
//! // 1. Create a FontSystem
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Pick settings: a preset, or custom ones loaded from JSON
//! let settings: QuoteSettings = settings::resolve(None, Some("lyrics"))?;
//!
//! // 3. Render
//! let quote = QuoteContent::new("Who needs memories", "You don't get anything playing the part when it's insincere")?;
//! let path = font_system.render_quote(&quote, &settings, None)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! *   **Metric-driven layout**: each line advances by its own measured height.
//! *   **Presets**: `lyrics`, `quote` for quotes and `light`, `dark`, `blue` for posts.
//! *   **Font Management**: system fonts, font files and font directories via `fontdb`.
//! *   **Thread Safety**: one [`FontSystem`] can be shared between threads.

pub mod avatar;
pub mod batch;
pub mod color;
pub mod content;
pub mod error;
pub mod font_storage;
pub mod font_system;
pub mod geometry;
pub mod post;
pub mod renderer;
pub mod settings;
pub mod text;

// common re-exports
pub use color::{Color, ColorScheme};
pub use content::{PostContent, QuoteContent};
pub use error::{BatchError, ContentError, RenderError, SettingsError};
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use settings::{GraphicSettings, PostSettings, QuoteSettings};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use image;
pub use parking_lot;
