//! Piecewise-linear colormaps
//!
//! A [`Colormap`] places `k` color stops at equal spacing over `[0, 1]` (stop `i` sits at
//! `i / (k - 1)`) and interpolates each sRGB channel linearly between neighbouring stops.
//! Sampling a colormap yields the [`ChannelTables`] consumed by SVG transfer filters.

mod table;

pub use table::{Channel, ChannelTables, DEFAULT_TABLE_SIZE, TABLE_PRECISION};

use crate::color::Color;
use crate::{CmapError, Result};

/// A continuous `[0, 1] -> Color` function built from at least two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    stops: Vec<Color>,
}

impl Colormap {
    /// Build a colormap from an ordered color sequence.
    ///
    /// # Errors
    ///
    /// - `InsufficientStops` if fewer than two colors are given
    /// - `MalformedColor` if any channel is outside `[0, 1]`
    pub fn build(stops: &[Color]) -> Result<Self> {
        if stops.len() < 2 {
            return Err(CmapError::InsufficientStops(stops.len()));
        }
        for stop in stops {
            stop.validate()?;
        }
        tracing::debug!("Built colormap with {} stops", stops.len());
        Ok(Self {
            stops: stops.to_vec(),
        })
    }

    /// Build a colormap from strict `#rrggbb` tokens.
    ///
    /// Tokens are parsed before the stop count is checked, so a lone malformed token
    /// reports `MalformedColor`.
    pub fn from_hex<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let stops = tokens
            .iter()
            .map(|t| Color::from_hex(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::build(&stops)
    }

    /// Build a colormap from the catalogue form: hex digits without `#` or separators,
    /// six per stop (e.g. `"000000ff0000ffffff"`).
    pub fn from_hex_string(colors: &str) -> Result<Self> {
        Self::build(&split_hex_string(colors)?)
    }

    /// The color stops in order.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at position 0.
    pub fn start(&self) -> Color {
        self.stops[0]
    }

    /// Color at position 1.
    pub fn end(&self) -> Color {
        self.stops[self.stops.len() - 1]
    }

    /// The same colormap traversed from the last stop to the first.
    pub fn reversed(&self) -> Self {
        let mut stops = self.stops.clone();
        stops.reverse();
        Self { stops }
    }

    /// Evaluate the colormap at `position`, clamping to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// `ConversionFailure` if `position` is NaN.
    pub fn eval(&self, position: f64) -> Result<Color> {
        if position.is_nan() {
            return Err(CmapError::ConversionFailure(
                "cannot evaluate colormap at NaN".to_string(),
            ));
        }
        Ok(self.eval_clamped(position.clamp(0.0, 1.0)))
    }

    fn eval_clamped(&self, t: f64) -> Color {
        let num_segments = self.stops.len() - 1;
        let segment_float = t * num_segments as f64;
        let segment = (segment_float.floor() as usize).min(num_segments - 1);
        let segment_t = segment_float - segment as f64;
        self.stops[segment].lerp(self.stops[segment + 1], segment_t)
    }

    /// Sample the colormap at `count` evenly spaced positions covering `[0, 1]`.
    ///
    /// `count = 1` samples position 0 only; `count = 0` yields empty tables.
    pub fn sample(&self, count: usize) -> ChannelTables {
        let colors: Vec<Color> = sample_positions(count)
            .into_iter()
            .map(|t| self.eval_clamped(t))
            .collect();
        tracing::debug!("Sampled colormap at {} positions", count);
        ChannelTables::from_colors(&colors)
    }
}

/// `count` evenly spaced positions over `[0, 1]`, inclusive of both ends.
pub fn sample_positions(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count).map(|i| i as f64 / last).collect()
        }
    }
}

/// Split a concatenated hex string into colors, six digits per color.
pub fn split_hex_string(colors: &str) -> Result<Vec<Color>> {
    let colors = colors.trim();
    if !colors.is_ascii() || colors.len() % 6 != 0 {
        return Err(CmapError::MalformedColor(format!(
            "'{}' is not a sequence of 6-digit hex colors",
            colors
        )));
    }
    colors
        .as_bytes()
        .chunks(6)
        .map(|chunk| {
            // ASCII was checked above, so every chunk is valid UTF-8
            let digits = std::str::from_utf8(chunk).unwrap_or_default();
            Color::from_hex(&format!("#{}", digits))
        })
        .collect()
}
