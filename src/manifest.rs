use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Upper bound on entries reserved before a run starts.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// One generated unit, as recorded in `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: u64,
    pub item_id_full: String,
    pub file: PathBuf,
}

/// Ordered index of every unit written in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// An empty manifest sized for a batch of `quantity` units.
    ///
    /// Reservation is capped; larger batches grow the list as they go.
    pub fn for_quantity(quantity: u64) -> Self {
        let capacity = usize::try_from(quantity)
            .map_or(MAX_PREALLOCATED_ENTRIES, |q| q.min(MAX_PREALLOCATED_ENTRIES));
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ManifestEntry> {
        self.entries
    }

    /// Pretty JSON array, two-space indented, non-ASCII kept literally.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes `manifest.json` into `outdir`, replacing any previous one.
    pub fn write(&self, outdir: &Path) -> Result<PathBuf> {
        let path = outdir.join(MANIFEST_FILE);
        fs::write(&path, self.to_json_pretty()?)?;
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
