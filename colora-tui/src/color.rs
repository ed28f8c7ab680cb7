//! Color codec: 8-bit RGB samples to and from `#RRGGBB`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed color {0:?}: expected #RRGGBB")]
pub struct MalformedColor(pub String);

/// A 24-bit RGB color. Text form is always `#` plus six uppercase hex digits.
///
/// Equality is on channel values, so `"#6366f1"` and `"#6366F1"` parse to the
/// same color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `rgb(99, 102, 241)`
    pub fn rgb_label(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Perceived luminance in [0, 1], for picking a legible foreground.
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

/// Encode three channels as a canonical color.
pub fn encode(r: u8, g: u8, b: u8) -> Color {
    Color::new(r, g, b)
}

/// Parse `#RRGGBB` (either case) into its channels.
pub fn decode(text: &str) -> Result<(u8, u8, u8), MalformedColor> {
    let malformed = || MalformedColor(text.to_string());
    let hex = text.strip_prefix('#').ok_or_else(malformed)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self)
    }
}

impl FromStr for Color {
    type Err = MalformedColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, g, b) = decode(s)?;
        Ok(Color::new(r, g, b))
    }
}

impl TryFrom<String> for Color {
    type Error = MalformedColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_uppercase_and_padded() {
        assert_eq!(encode(99, 102, 241).to_string(), "#6366F1");
        assert_eq!(encode(0, 0, 0).to_string(), "#000000");
        assert_eq!(encode(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn decode_inverts_encode_across_channel_range() {
        for v in (0..=255u16).step_by(17) {
            let (r, g, b) = (v as u8, 255 - v as u8, (v as u8).wrapping_mul(7));
            assert_eq!(decode(&encode(r, g, b).to_string()), Ok((r, g, b)));
        }
    }

    #[test]
    fn decode_accepts_lowercase() {
        assert_eq!(decode("#6366f1"), Ok((0x63, 0x66, 0xF1)));
        let lower: Color = "#abcdef".parse().unwrap();
        let upper: Color = "#ABCDEF".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_string(), "#ABCDEF");
    }

    #[test]
    fn decode_rejects_malformed_text() {
        for bad in ["", "#", "6366F1", "#6366F", "#6366F1A", "#GG66F1", "# 366F1", "#６366F"] {
            assert!(decode(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn serde_uses_hex_string() {
        let c = Color::new(0x11, 0x22, 0x33);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#112233\"");
        let back: Color = serde_json::from_str("\"#112233\"").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn rgb_label_lists_channels() {
        assert_eq!(Color::new(99, 102, 241).rgb_label(), "rgb(99, 102, 241)");
    }
}
