//! Transfer tables for SVG `feComponentTransfer` filters
//!
//! The `tableValues` attribute is parsed by the browser, not by us, so the textual form
//! is fixed: every value printed with [`TABLE_PRECISION`] fractional digits, values
//! separated by a single ASCII space, no brackets and no line breaks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::sample_positions;
use crate::color::Color;

/// Number of control points per channel in the reference filter.
pub const DEFAULT_TABLE_SIZE: usize = 41;

/// Fractional digits written for each table value.
pub const TABLE_PRECISION: usize = 5;

/// An RGB channel of a transfer filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// SVG transfer function element for this channel.
    pub fn svg_element(self) -> &'static str {
        match self {
            Channel::Red => "feFuncR",
            Channel::Green => "feFuncG",
            Channel::Blue => "feFuncB",
        }
    }
}

/// Per-channel samples of a colormap, one value per evenly spaced position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelTables {
    red: Vec<f64>,
    green: Vec<f64>,
    blue: Vec<f64>,
}

impl ChannelTables {
    pub(crate) fn from_colors(colors: &[Color]) -> Self {
        Self {
            red: colors.iter().map(|c| c.red).collect(),
            green: colors.iter().map(|c| c.green).collect(),
            blue: colors.iter().map(|c| c.blue).collect(),
        }
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    pub fn red(&self) -> &[f64] {
        &self.red
    }

    pub fn green(&self) -> &[f64] {
        &self.green
    }

    pub fn blue(&self) -> &[f64] {
        &self.blue
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Positions in `[0, 1]` at which the samples were taken.
    pub fn positions(&self) -> Vec<f64> {
        sample_positions(self.len())
    }

    /// The sampled color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn color(&self, index: usize) -> Color {
        Color::from_array([self.red[index], self.green[index], self.blue[index]])
    }

    /// The `tableValues` attribute string for one channel.
    pub fn table_values(&self, channel: Channel) -> String {
        format_table(self.channel(channel))
    }

    pub fn red_values(&self) -> String {
        self.table_values(Channel::Red)
    }

    pub fn green_values(&self) -> String {
        self.table_values(Channel::Green)
    }

    pub fn blue_values(&self) -> String {
        self.table_values(Channel::Blue)
    }
}

/// One line per channel, in R, G, B order.
impl fmt::Display for ChannelTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.red_values())?;
        writeln!(f, "{}", self.green_values())?;
        write!(f, "{}", self.blue_values())
    }
}

/// Format values as fixed-precision tokens joined by single spaces.
pub fn format_table(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.*}", TABLE_PRECISION, v))
        .collect::<Vec<_>>()
        .join(" ")
}
