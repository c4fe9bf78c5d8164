//! Tunable defaults, loadable from a JSON file
//!
//! Every field is optional; anything omitted keeps the reference value.
//!
//! ```json
//! {
//!   "catalogues": ["collections"],
//!   "table": {"samples": 41, "filter_id": "scale1"},
//!   "preview": {"samples": 256, "strip_height": 30, "spaces": ["CAM02-UCS", "CIELab"]}
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::colormap::DEFAULT_TABLE_SIZE;
use crate::colorspace::{ColorSpace, DEFAULT_PREVIEW_SPACES};
use crate::interpolate::{DEFAULT_SAMPLES, DEFAULT_STRIP_HEIGHT};
use crate::writer::DEFAULT_FILTER_ID;
use crate::{CmapError, Result};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Collection files or directories to load instead of the built-in collection
    #[serde(default)]
    pub catalogues: Vec<PathBuf>,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Settings for transfer table generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default = "default_table_samples")]
    pub samples: usize,
    #[serde(default = "default_filter_id")]
    pub filter_id: String,
}

/// Settings for interpolation previews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_samples")]
    pub samples: usize,
    #[serde(default = "default_strip_height")]
    pub strip_height: usize,
    #[serde(default = "default_spaces")]
    pub spaces: Vec<ColorSpace>,
}

fn default_table_samples() -> usize {
    DEFAULT_TABLE_SIZE
}

fn default_filter_id() -> String {
    DEFAULT_FILTER_ID.to_string()
}

fn default_preview_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_strip_height() -> usize {
    DEFAULT_STRIP_HEIGHT
}

fn default_spaces() -> Vec<ColorSpace> {
    DEFAULT_PREVIEW_SPACES.to_vec()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            samples: default_table_samples(),
            filter_id: default_filter_id(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            samples: default_preview_samples(),
            strip_height: default_strip_height(),
            spaces: default_spaces(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CmapError::ConfigError(format!("Invalid config: {}", e)))
    }

    /// Read a config file. Relative catalogue paths resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CmapError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_json(&json).map_err(|e| match e {
            CmapError::ConfigError(msg) => {
                CmapError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        if let Some(base) = path.parent() {
            for catalogue in config.catalogues.iter_mut() {
                if catalogue.is_relative() {
                    *catalogue = base.join(&*catalogue);
                }
            }
        }
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.catalogues.is_empty());
        assert_eq!(config.table.samples, 41);
        assert_eq!(config.table.filter_id, "scale1");
        assert_eq!(config.preview.samples, 256);
        assert_eq!(config.preview.strip_height, 30);
        assert_eq!(config.preview.spaces, DEFAULT_PREVIEW_SPACES.to_vec());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_json(
            r#"{"table": {"samples": 11}, "preview": {"spaces": ["Oklab", "JMh"]}}"#,
        )
        .unwrap();
        assert_eq!(config.table.samples, 11);
        assert_eq!(config.table.filter_id, "scale1");
        assert_eq!(config.preview.samples, 256);
        assert_eq!(config.preview.spaces.len(), 2);
        assert_eq!(config.preview.spaces[0], ColorSpace::Oklab);
        assert_eq!(config.preview.spaces[1].name(), "JMh");
    }

    #[test]
    fn test_unknown_space_rejected() {
        let err = Config::from_json(r#"{"preview": {"spaces": ["NOT_A_SPACE"]}}"#).unwrap_err();
        assert!(matches!(err, CmapError::ConfigError(_)));
        assert!(err.to_string().contains("NOT_A_SPACE"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_json(r#"{"tabel": {}}"#).is_err());
    }

    #[test]
    fn test_load_resolves_catalogues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmapfilter.json");
        std::fs::write(&path, r#"{"catalogues": ["collections", "/abs/maps.json"]}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalogues[0], dir.path().join("collections"));
        assert_eq!(config.catalogues[1], PathBuf::from("/abs/maps.json"));

        let missing = Config::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, CmapError::ConfigError(_)));
    }
}
