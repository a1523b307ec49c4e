use std::fmt;
use std::str::FromStr;

use crate::error::SettingsError;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Sentinel used for a background that should stay see-through.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with straight (non-premultiplied) alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `true` when the alpha channel is zero.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Pixel value for `image` buffers.
    pub fn to_rgba8(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Parses an optional color; `None` maps to [`Color::TRANSPARENT`].
    pub fn parse_optional(value: Option<&str>) -> Result<Self, SettingsError> {
        match value {
            None => Ok(Self::TRANSPARENT),
            Some(s) => s.parse(),
        }
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        fn nibble(c: u8) -> Option<u8> {
            (c as char).to_digit(16).map(|d| d as u8)
        }
        fn byte(pair: &[u8]) -> Option<u8> {
            Some(nibble(pair[0])? * 16 + nibble(pair[1])?)
        }

        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(
                byte(&bytes[0..2])?,
                byte(&bytes[2..4])?,
                byte(&bytes[4..6])?,
            )),
            8 => Some(Self::rgba(
                byte(&bytes[0..2])?,
                byte(&bytes[2..4])?,
                byte(&bytes[4..6])?,
                byte(&bytes[6..8])?,
            )),
            _ => None,
        }
    }

    /// `rgba(r, g, b, a)` where the alpha is either a fraction in `0..=1` or a
    /// byte in `2..=255`.
    fn parse_rgba_fn(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let [r, g, b, a] = parts.as_slice() else {
            return None;
        };

        let channel = |s: &str| s.parse::<u8>().ok();
        let alpha: f64 = a.parse().ok()?;
        if !alpha.is_finite() || alpha < 0.0 {
            return None;
        }
        let alpha = if alpha <= 1.0 {
            (alpha * 255.0) as u8
        } else if alpha <= 255.0 && alpha.fract() == 0.0 {
            alpha as u8
        } else {
            return None;
        };

        Some(Self::rgba(channel(r)?, channel(g)?, channel(b)?, alpha))
    }
}

impl FromStr for Color {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(args) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_rgba_fn(args)
        } else {
            None
        };

        parsed.ok_or_else(|| SettingsError::InvalidColorFormat {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Background and foreground pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Color,
    pub foreground: Color,
}

impl ColorScheme {
    /// Background and foreground pair.
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Builds a scheme from the two-item list used in settings files.
    pub fn from_list(values: &[Option<String>]) -> Result<Self, SettingsError> {
        let [background, foreground] = values else {
            return Err(SettingsError::InvalidFieldLength {
                field: "color_scheme",
                expected: 2,
                actual: values.len(),
            });
        };

        Ok(Self {
            background: Color::parse_optional(background.as_deref())?,
            foreground: Color::parse_optional(foreground.as_deref())?,
        })
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!("#fff".parse::<Color>().ok(), Some(Color::WHITE));
        assert_eq!("#000000".parse::<Color>().ok(), Some(Color::BLACK));
        assert_eq!(
            "#15202b".parse::<Color>().ok(),
            Some(Color::rgb(21, 32, 43))
        );
        assert_eq!(
            "#15202b80".parse::<Color>().ok(),
            Some(Color::rgba(21, 32, 43, 128))
        );
    }

    #[test]
    fn parses_rgba_with_fractional_and_byte_alpha() {
        let cases = [
            ("rgba(0,0,0,0)", Color::rgba(0, 0, 0, 0)),
            ("rgba(0,0,0,1)", Color::rgba(0, 0, 0, 255)),
            ("rgba(0, 0, 255, 0)", Color::rgba(0, 0, 255, 0)),
            ("rgba(123,124,12,0.75)", Color::rgba(123, 124, 12, 191)),
            ("rgba(1, 2, 3, 128)", Color::rgba(1, 2, 3, 128)),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Color>().ok(), Some(expected), "{input}");
        }
    }

    #[test]
    fn rejects_malformed_colors() {
        for input in ["", "fff", "#ff", "#ggg", "rgba(0,0,255,-1)", "rgba(0,0,0)", "rgb(1,2,3)"] {
            assert!(
                matches!(
                    input.parse::<Color>(),
                    Err(SettingsError::InvalidColorFormat { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn null_background_is_transparent() {
        let scheme = ColorScheme::from_list(&[None, Some("#ffffff".into())]).unwrap();
        assert!(scheme.background.is_transparent());
        assert_eq!(scheme.foreground, Color::WHITE);
    }

    #[test]
    fn scheme_needs_exactly_two_colors() {
        let err = ColorScheme::from_list(&[Some("#000".into())]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidFieldLength {
                field: "color_scheme",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn display_round_trips_opaque_colors() {
        assert_eq!(Color::rgb(21, 32, 43).to_string(), "#15202b");
        assert_eq!(Color::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
    }
}
