//! The record store owns the canonical game list for the lifetime of the
//! process. Loading happens once at startup; afterwards the store only hands
//! out read-only slices.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::GameRecord;

/// Catalogue written to the data file on first launch so the board has
/// something to show before the user supplies their own list.
const SAMPLE_CATALOGUE: &str = include_str!("../data/games.json");

/// Immutable, ordered collection of game records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<GameRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records. A single malformed entry rejects the
    /// whole document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<GameRecord> =
            serde_json::from_str(json).context("failed to parse game records")?;
        Ok(Self::new(records))
    }

    /// Read and parse the data file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .with_context(|| format!("invalid data file {}", path.display()))?;
        info!(path = %path.display(), records = store.len(), "loaded game records");
        Ok(store)
    }

    /// Load the data file, writing the bundled sample catalogue first when the
    /// file does not exist yet.
    pub fn load_or_seed(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
            fs::write(path, SAMPLE_CATALOGUE)
                .with_context(|| format!("failed to seed {}", path.display()))?;
            info!(path = %path.display(), "seeded sample game catalogue");
        } else {
            debug!(path = %path.display(), "data file present, skipping seed");
        }
        Self::load(path)
    }

    /// The full collection in load order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
