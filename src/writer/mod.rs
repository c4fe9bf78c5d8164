//! Output writers for sampled colormap tables
//!
//! Writers turn [`ChannelTables`] into a consumable artifact: SVG filter markup for
//! browsers, or JSON for anything else.
//!
//! # Example
//!
//! ```rust
//! use cmapfilter::{Colormap, SvgFilterWriter, Writer};
//!
//! let tables = Colormap::from_hex(&["#000000", "#ffffff"]).unwrap().sample(3);
//! let svg = SvgFilterWriter::new("scale1").write(&tables).unwrap();
//! assert!(svg.contains(r#"<feFuncR type="table" tableValues="0.00000 0.50000 1.00000">"#));
//! ```

mod json;
mod svg;

pub use json::JsonWriter;
pub use svg::{SvgFilterWriter, DEFAULT_FILTER_ID};

use crate::colormap::ChannelTables;
use crate::{CmapError, Result};

/// Trait for table output formats
pub trait Writer {
    /// The output type produced by this writer
    type Output;

    /// Render the tables.
    ///
    /// # Errors
    ///
    /// Returns `WriterError` if the tables cannot be rendered.
    fn write(&self, tables: &ChannelTables) -> Result<Self::Output>;

    /// Check that the tables can be written at all.
    ///
    /// A transfer table needs at least one value per channel.
    fn validate(&self, tables: &ChannelTables) -> Result<()> {
        if tables.is_empty() {
            return Err(CmapError::WriterError(
                "Cannot write empty transfer tables".to_string(),
            ));
        }
        Ok(())
    }
}
