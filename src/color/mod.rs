//! Color model and hex helpers
//!
//! A [`Color`] is an sRGB triple with channels in `[0, 1]`. Colors enter the crate as
//! strict `#rrggbb` tokens (colormap stops) or as any CSS color string (user pickers),
//! and leave it either as hex or as 8-bit samples through [`quantize`].

use std::fmt;
use std::str::FromStr;

use crate::{CmapError, Result};

/// An sRGB color with channel intensities in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    /// Create a color, rejecting channels that are non-finite or outside `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self> {
        let color = Self { red, green, blue };
        color.validate()?;
        Ok(color)
    }

    /// Create a color from 8-bit channel values.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            red: rgb[0] as f64 / 255.0,
            green: rgb[1] as f64 / 255.0,
            blue: rgb[2] as f64 / 255.0,
        }
    }

    /// Parse a strict `#rrggbb` token (case-insensitive).
    ///
    /// Shorthand, alpha and named forms are rejected; use [`Color::parse`] for those.
    pub fn from_hex(token: &str) -> Result<Self> {
        let digits = token.strip_prefix('#').ok_or_else(|| {
            CmapError::MalformedColor(format!("'{}' does not start with '#'", token))
        })?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CmapError::MalformedColor(format!(
                "'{}' is not 6 hex digits",
                token
            )));
        }
        Self::parse(token)
    }

    /// Parse any CSS color: named colors, `#rgb`, `#rrggbb`, `rgb()`, `hsl()`, etc.
    ///
    /// Alpha is discarded.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = csscolorparser::parse(value)
            .map_err(|e| CmapError::MalformedColor(format!("'{}': {}", value, e)))?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok(Self::from_rgb8([r, g, b]))
    }

    /// Check that every channel is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.channels_named() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CmapError::MalformedColor(format!(
                    "color out of range: {} channel is {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Channel values as an array, in RGB order.
    pub fn to_array(self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Build a color from an RGB array without validation.
    pub fn from_array(rgb: [f64; 3]) -> Self {
        Self {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        }
    }

    /// Quantize each channel to 8 bits.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
        ]
    }

    /// Lower-case `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Per-channel linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color {
            red: lerp(self.red, other.red, t),
            green: lerp(self.green, other.green, t),
            blue: lerp(self.blue, other.blue, t),
        }
    }

    fn channels_named(&self) -> [(&'static str, f64); 3] {
        [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CmapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Clamp to `[0, 1]` and scale to the nearest 8-bit value, ties to even.
///
/// NaN maps to 0.
pub fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8
}

/// Linear interpolation that returns `a` and `b` exactly at the endpoints.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.red, 1.0);
        assert_eq!(c.green, 128.0 / 255.0);
        assert_eq!(c.blue, 0.0);

        // Upper case digits are accepted
        assert_eq!(Color::from_hex("#FF8000").unwrap(), c);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for token in ["#12345", "#1234567", "123456", "#12345g", "#fff", "red", ""] {
            let err = Color::from_hex(token).unwrap_err();
            assert!(
                matches!(err, CmapError::MalformedColor(ref msg) if msg.contains(token)),
                "unexpected error for {:?}: {}",
                token,
                err
            );
        }
    }

    #[test]
    fn test_parse_css_forms() {
        assert_eq!(Color::parse("red").unwrap().to_hex(), "#ff0000");
        assert_eq!(Color::parse("#f00").unwrap().to_hex(), "#ff0000");
        assert_eq!(Color::parse("rgb(0, 0, 255)").unwrap().to_hex(), "#0000ff");
        assert!(Color::parse("notacolor").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#123456", "#abcdef", "#7f7f7f"] {
            assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(Color::new(0.0, 0.5, 1.0).is_ok());
        let err = Color::new(1.5, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(Color::new(0.0, f64::NAN, 0.0).is_err());
        assert!(Color::new(0.0, 0.0, -0.01).is_err());
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(-3.0), 0);
        assert_eq!(quantize(7.0), 255);
        assert_eq!(quantize(f64::NAN), 0);
        // 0.5 * 255 = 127.5 rounds to the even neighbour
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(0.25), 64);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Color::from_hex("#123456").unwrap();
        let b = Color::from_hex("#fedcba").unwrap();
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).to_rgb8(), [136, 136, 136]);
    }
}
