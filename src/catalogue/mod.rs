//! Named colormap collections
//!
//! A collection file is a JSON document of the form
//!
//! ```json
//! {"contents": [{"name": "viridis", "colors": "440154482878...fde725"}]}
//! ```
//!
//! where `colors` is a concatenation of 6-digit hex colors without `#`. Several files
//! can be merged into one [`Catalogue`]; when two entries share a name the first one
//! loaded is kept.

mod builtin;

pub use builtin::BUILTIN;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::colormap::{split_hex_string, Colormap};
use crate::{CmapError, Result};

/// One record of a collection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub colors: String,
}

impl CatalogueEntry {
    pub fn new(name: impl Into<String>, colors: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: colors.into(),
        }
    }

    /// Decode the concatenated hex string into color stops.
    pub fn stops(&self) -> Result<Vec<Color>> {
        split_hex_string(&self.colors).map_err(|e| match e {
            CmapError::MalformedColor(msg) => {
                CmapError::MalformedColor(format!("colormap '{}': {}", self.name, msg))
            }
            other => other,
        })
    }

    pub fn colormap(&self) -> Result<Colormap> {
        Colormap::build(&self.stops()?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionDocument {
    Wrapped { contents: Vec<CatalogueEntry> },
    Bare(Vec<CatalogueEntry>),
}

/// Ordered collection of named colormaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in sequential and diverging colormaps.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(name, colors)| CatalogueEntry::new(*name, *colors))
            .collect()
    }

    /// Parse a collection document, either `{"contents": [...]}` or a bare array.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: CollectionDocument = serde_json::from_str(json)
            .map_err(|e| CmapError::CatalogueError(format!("Invalid collection: {}", e)))?;
        let entries = match doc {
            CollectionDocument::Wrapped { contents } => contents,
            CollectionDocument::Bare(entries) => entries,
        };
        Ok(entries.into_iter().collect())
    }

    /// Read a single collection file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalogue = Self::from_json(&json).map_err(|e| match e {
            CmapError::CatalogueError(msg) => {
                CmapError::CatalogueError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        tracing::debug!(
            "Loaded {} colormaps from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Merge every `*.json` collection below `dir`, visiting files in sorted path order.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut files = Vec::new();
        collect_json_files(dir.as_ref(), &mut files)?;
        files.sort();

        let mut catalogue = Self::new();
        for file in &files {
            catalogue.merge(Self::load(file)?);
        }
        tracing::info!(
            "Loaded {} colormaps from {} collection files",
            catalogue.len(),
            files.len()
        );
        Ok(catalogue)
    }

    /// Append the entries of `other` whose names are not already present.
    pub fn merge(&mut self, other: Catalogue) {
        for entry in other.entries {
            self.push(entry);
        }
    }

    fn push(&mut self, entry: CatalogueEntry) {
        if self.entries.iter().any(|e| e.name == entry.name) {
            tracing::warn!("Duplicate colormap name '{}' ignored", entry.name);
        } else {
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Look up an entry by exact name, falling back to a case-insensitive match.
    pub fn get(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
    }

    pub fn colormap(&self, name: &str) -> Result<Colormap> {
        self.get(name)
            .ok_or_else(|| CmapError::CatalogueError(format!("Unknown colormap '{}'", name)))?
            .colormap()
    }

    /// Names of entries whose color strings fail to decode into a colormap.
    pub fn invalid_entries(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.colormap().is_err())
            .map(|e| e.name.as_str())
            .collect()
    }
}

impl FromIterator<CatalogueEntry> for Catalogue {
    fn from_iter<I: IntoIterator<Item = CatalogueEntry>>(iter: I) -> Self {
        let mut catalogue = Catalogue::new();
        for entry in iter {
            catalogue.push(entry);
        }
        catalogue
    }
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}
