//! Report palette.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The eight report colors, dark blue to grey.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0x00, 0x3f, 0x5c),
    Color::rgb(0x2f, 0x4b, 0x7c),
    Color::rgb(0x46, 0x5a, 0x7e),
    Color::rgb(0x64, 0x79, 0x9c),
    Color::rgb(0x7e, 0x8f, 0xb0),
    Color::rgb(0x98, 0xa4, 0xc3),
    Color::rgb(0xb2, 0xb9, 0xd6),
    Color::rgb(0xcc, 0xcc, 0xcc),
];

/// Color of the `index`-th category, cycling through [`PALETTE`].
pub const fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Error returned when a hex color cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {0}")]
pub struct InvalidColor(pub String);

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color.
    ///
    /// # Examples
    ///
    /// ```
    /// use lisbon_charts::{Color, PALETTE};
    ///
    /// assert_eq!(Color::from_hex("#003f5c"), Ok(PALETTE[0]));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn unit_rgb(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex_values() {
        let hex: Vec<_> = PALETTE.iter().map(Color::to_string).collect();
        assert_eq!(
            hex,
            [
                "#003f5c", "#2f4b7c", "#465a7e", "#64799c", "#7e8fb0", "#98a4c3", "#b2b9d6",
                "#cccccc"
            ]
        );
    }

    #[test]
    fn test_palette_cycles_after_eight() {
        assert_eq!(palette_color(8), palette_color(0));
        assert_eq!(palette_color(17), palette_color(1));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("003f5c").is_err());
        assert!(Color::from_hex("#03f").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&PALETTE[7]).unwrap();
        assert_eq!(json, "\"#cccccc\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PALETTE[7]);
    }
}
