//! Selector styling options.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Style errors.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Line width must be positive, got {0}")]
    InvalidLineWidth(f64),
    #[error("Style parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable color representation (RGBA8).
///
/// Serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to 0..=1).
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl FromStr for SerializableColor {
    type Err = StyleError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = v * 17;
                }
                Ok(Self::new(rgb[0], rgb[1], rgb[2], 255))
            }
            6 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

fn default_color() -> SerializableColor {
    SerializableColor::new(0x00, 0xff, 0x00, 0xff)
}

fn default_line_width() -> f64 {
    2.0
}

/// Paint options for a selector's on-surface feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorStyle {
    /// Stroke color; the fill uses the same color at half alpha.
    #[serde(default = "default_color")]
    pub color: SerializableColor,
    /// Stroke width in surface pixels.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for SelectorStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            line_width: default_line_width(),
        }
    }
}

impl SelectorStyle {
    pub fn new(color: SerializableColor, line_width: f64) -> Result<Self, StyleError> {
        let style = Self { color, line_width };
        style.validate()?;
        Ok(style)
    }

    /// Parse and validate a style from JSON.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(StyleError::InvalidLineWidth(self.line_width));
        }
        Ok(())
    }

    pub fn stroke_color(&self) -> Color {
        self.color.into()
    }

    pub fn fill_color(&self) -> Color {
        self.color.with_alpha_factor(0.5).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            "#00ff00".parse::<SerializableColor>().unwrap(),
            SerializableColor::new(0, 255, 0, 255)
        );
        assert_eq!(
            "#f0a".parse::<SerializableColor>().unwrap(),
            SerializableColor::new(255, 0, 170, 255)
        );
        assert_eq!(
            "#11223344".parse::<SerializableColor>().unwrap(),
            SerializableColor::new(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!("00ff00".parse::<SerializableColor>().is_err());
        assert!("#00ff0".parse::<SerializableColor>().is_err());
        assert!("#gg0000".parse::<SerializableColor>().is_err());
        assert!("#ééé".parse::<SerializableColor>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = SerializableColor::new(0x12, 0xab, 0xff, 0x80);
        assert_eq!(color.to_string(), "#12abff80");
        assert_eq!(color.to_string().parse::<SerializableColor>().unwrap(), color);
        assert_eq!(SerializableColor::new(1, 2, 3, 255).to_string(), "#010203");
    }

    #[test]
    fn test_half_alpha_fill() {
        let style = SelectorStyle::default();
        assert_eq!(SerializableColor::from(style.fill_color()).a, 128);
        assert_eq!(SerializableColor::from(style.stroke_color()).a, 255);
    }

    #[test]
    fn test_from_json_defaults() {
        let style = SelectorStyle::from_json("{}").unwrap();
        assert_eq!(style, SelectorStyle::default());

        let style =
            SelectorStyle::from_json(r##"{"color": "#ff0000", "lineWidth": 3.5}"##).unwrap();
        assert_eq!(style.color, SerializableColor::new(255, 0, 0, 255));
        assert!((style.line_width - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            SelectorStyle::from_json(r#"{"lineWidth": 0}"#),
            Err(StyleError::InvalidLineWidth(_))
        ));
        assert!(matches!(
            SelectorStyle::from_json(r#"{"color": "green"}"#),
            Err(StyleError::Parse(_))
        ));
        assert!(SelectorStyle::new(SerializableColor::new(0, 0, 0, 255), -1.0).is_err());
    }
}
