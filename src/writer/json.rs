//! JSON table writer
//!
//! Emits the same `tableValues` strings as the SVG writer, keyed by channel, for
//! consumers that build their filters programmatically.

use serde_json::{json, Value};

use super::Writer;
use crate::colormap::ChannelTables;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonWriter {
    name: Option<String>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the colormap name in the output.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Writer for JsonWriter {
    type Output = Value;

    fn write(&self, tables: &ChannelTables) -> Result<Value> {
        self.validate(tables)?;

        let mut doc = json!({
            "n": tables.len(),
            "red": tables.red_values(),
            "green": tables.green_values(),
            "blue": tables.blue_values(),
        });
        if let Some(name) = &self.name {
            doc["name"] = json!(name);
        }
        Ok(doc)
    }
}
