//! SVG `feComponentTransfer` filter writer
//!
//! Produces a `<filter>` element that remaps each RGB channel of its input through the
//! sampled colormap tables:
//!
//! ```text
//! <filter id="scale1" color-interpolation-filters="sRGB">
//!   <feComponentTransfer>
//!     <feFuncR type="table" tableValues="..."></feFuncR>
//!     <feFuncG type="table" tableValues="..."></feFuncG>
//!     <feFuncB type="table" tableValues="..."></feFuncB>
//!   </feComponentTransfer>
//! </filter>
//! ```
//!
//! Grayscale sources are remapped onto the colormap; other inputs are remapped
//! channel by channel.

use super::Writer;
use crate::colormap::{Channel, ChannelTables};
use crate::{CmapError, Result};

/// Default filter id, referenced from CSS as `filter: url(#scale1)`.
pub const DEFAULT_FILTER_ID: &str = "scale1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFilterWriter {
    id: String,
    standalone: bool,
}

impl SvgFilterWriter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            standalone: false,
        }
    }

    /// Wrap the filter in a zero-size `<svg>` element so it can be pasted into HTML as is.
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// CSS rule applying the filter to elements with class `filter`.
    pub fn css_rule(&self) -> String {
        format!(".filter {{filter: url(#{})}}", self.id)
    }

    fn validate_id(&self) -> Result<()> {
        let mut chars = self.id.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !(valid_start && valid_rest) {
            return Err(CmapError::WriterError(format!(
                "'{}' is not a valid filter id",
                self.id
            )));
        }
        Ok(())
    }
}

impl Default for SvgFilterWriter {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_ID)
    }
}

impl Writer for SvgFilterWriter {
    type Output = String;

    fn write(&self, tables: &ChannelTables) -> Result<String> {
        self.validate(tables)?;
        self.validate_id()?;

        let indent = if self.standalone { "  " } else { "" };
        let mut lines = Vec::new();
        if self.standalone {
            lines.push(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0">"#.to_string(),
            );
        }
        lines.push(format!(
            r#"{}<filter id="{}" color-interpolation-filters="sRGB">"#,
            indent, self.id
        ));
        lines.push(format!("{}  <feComponentTransfer>", indent));
        for channel in Channel::ALL {
            let element = channel.svg_element();
            lines.push(format!(
                r#"{}    <{} type="table" tableValues="{}"></{}>"#,
                indent,
                element,
                tables.table_values(channel),
                element
            ));
        }
        lines.push(format!("{}  </feComponentTransfer>", indent));
        lines.push(format!("{}</filter>", indent));
        if self.standalone {
            lines.push("</svg>".to_string());
        }

        tracing::debug!("Wrote SVG filter '{}' with {} entries", self.id, tables.len());
        Ok(lines.join("\n") + "\n")
    }
}
