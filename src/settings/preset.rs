use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::color::{Color, ColorScheme};
use crate::geometry::CanvasSize;
use crate::text::wrap;

use super::{PostSettings, ProfilePicSize, QuoteSettings};

/// Family every bundled preset asks for; resolved through the generic
/// sans-serif fallback so it works on any system with at least one font.
const PRESET_FONT: &str = "sans-serif";

/// Immutable table of the bundled presets, keyed by lowercase name.
#[derive(Debug)]
pub struct PresetRegistry {
    quotes: BTreeMap<&'static str, QuoteSettings>,
    posts: BTreeMap<&'static str, PostSettings>,
}

impl PresetRegistry {
    fn bundled() -> Self {
        let quote = |font_size, width, height, colors, chars, margin| QuoteSettings {
            font_family: PRESET_FONT.to_string(),
            font_size,
            canvas: CanvasSize::new(width, height),
            colors,
            wrap_limit: wrap::limit(chars),
            margin,
        };
        let post = |background, foreground| PostSettings {
            font_family: PRESET_FONT.to_string(),
            font_size_header: 80.0,
            font_size_text: 100.0,
            canvas: CanvasSize::new(1800, 1800),
            colors: ColorScheme::new(background, foreground),
            wrap_limit: wrap::limit(32),
            margin: 30.0,
            profile_pic: ProfilePicSize::Auto,
        };
        let on_black = ColorScheme::new(Color::BLACK, Color::WHITE);

        Self {
            quotes: BTreeMap::from([
                ("lyrics", quote(250.0, 2800, 2800, on_black, 20, 0.0)),
                ("quote", quote(200.0, 3840, 2160, on_black, 32, 0.0)),
            ]),
            posts: BTreeMap::from([
                ("light", post(Color::WHITE, Color::BLACK)),
                ("dark", post(Color::BLACK, Color::WHITE)),
                ("blue", post(Color::rgb(0x15, 0x20, 0x2b), Color::WHITE)),
            ]),
        }
    }

    /// Quote preset by case-insensitive name.
    pub fn quote(&self, name: &str) -> Option<&QuoteSettings> {
        self.quotes.get(name.trim().to_lowercase().as_str())
    }

    /// Post preset by case-insensitive name.
    pub fn post(&self, name: &str) -> Option<&PostSettings> {
        self.posts.get(name.trim().to_lowercase().as_str())
    }

    /// Sorted quote preset names.
    pub fn quote_names(&self) -> Vec<&'static str> {
        self.quotes.keys().copied().collect()
    }

    /// Sorted post preset names.
    pub fn post_names(&self) -> Vec<&'static str> {
        self.posts.keys().copied().collect()
    }
}

static PRESETS: LazyLock<PresetRegistry> = LazyLock::new(PresetRegistry::bundled);

/// The process-wide preset table, built on first use.
pub fn presets() -> &'static PresetRegistry {
    &PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_quote_presets() {
        let lyrics = presets().quote("lyrics");
        assert!(lyrics.is_some_and(|s| s.font_size() == 250.0
            && s.canvas() == CanvasSize::new(2800, 2800)
            && s.wrap_limit().get() == 20
            && s.margin() == 0.0));

        let quote = presets().quote("QUOTE");
        assert!(quote.is_some_and(|s| s.canvas() == CanvasSize::new(3840, 2160)
            && s.wrap_limit().get() == 32));
    }

    #[test]
    fn bundled_post_presets_differ_only_in_colors() {
        let light = presets().post("light");
        let dark = presets().post("dark");
        let blue = presets().post("blue");

        assert!(light.is_some_and(|s| s.colors() == ColorScheme::new(Color::WHITE, Color::BLACK)));
        assert!(dark.is_some_and(|s| s.colors() == ColorScheme::new(Color::BLACK, Color::WHITE)));
        assert!(blue.is_some_and(|s| s.colors().background == Color::rgb(21, 32, 43)
            && s.font_size_header() == 80.0
            && s.font_size_text() == 100.0
            && s.margin() == 30.0
            && s.profile_pic() == ProfilePicSize::Auto));
    }

    #[test]
    fn names_are_sorted() {
        assert_eq!(presets().quote_names(), ["lyrics", "quote"]);
        assert_eq!(presets().post_names(), ["blue", "dark", "light"]);
    }
}
