//! The per-pairing description file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name written into every result directory.
pub const DESCRIPTION_FILE: &str = "Description.json";

/// One release of the game on a target platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Region display name.
    #[serde(rename = "Region")]
    pub region: String,
    /// Human readable release date.
    #[serde(rename = "Release_date")]
    pub release_date: String,
}

/// Denormalized metadata for one game on one target platform.
///
/// Field order here is the key order of the written file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Game title.
    #[serde(rename = "Name")]
    pub name: String,
    /// Genre names in service order.
    #[serde(rename = "Genre", default)]
    pub genre: Vec<String>,
    /// Platform display name.
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Aggregated critic rating, 0 when unrated.
    #[serde(rename = "Rating", default)]
    pub rating: f64,
    /// Game page on the service website.
    #[serde(rename = "IGDB_URL", default)]
    pub igdb_url: String,
    /// Story line, possibly empty.
    #[serde(rename = "Story_Line", default)]
    pub story_line: String,
    /// Summary, possibly empty.
    #[serde(rename = "Summary", default)]
    pub summary: String,
    /// Releases on target platforms in service order.
    #[serde(rename = "Release", default)]
    pub release: Vec<Release>,
}

impl Description {
    /// Render as pretty-printed JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("failed to serialize description")
    }

    /// Parse a previously written description.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("failed to parse description")
    }

    /// Write `Description.json` into `directory`.
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        let path = directory.join(DESCRIPTION_FILE);
        let bytes = self.to_bytes()?;
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a description file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_slice(&bytes).with_context(|| format!("invalid description {}", path.display()))
    }
}
