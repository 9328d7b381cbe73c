//! Bounded, file-backed history of current-weather lookups.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::WeatherRecord;

/// Maximum number of records kept in memory and on disk.
pub const HISTORY_CAPACITY: usize = 10;

/// The most recent [`HISTORY_CAPACITY`] records, oldest first.
///
/// The backing file is a pretty-printed JSON array rewritten as a whole after
/// every [`append`](Self::append). A missing or corrupt file loads as an empty
/// history without an error; a crash mid-write therefore costs the history,
/// never the process.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    path: PathBuf,
    records: Vec<WeatherRecord>,
}

impl HistoryCache {
    /// Empty history that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), records: Vec::new() }
    }

    /// Load history from `path`, starting empty if the file is absent or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut records = match read_records(&path) {
            Ok(records) => records,
            Err(err) => {
                tracing::debug!(path = %path.display(), "starting with empty history: {err:#}");
                Vec::new()
            }
        };
        keep_last(&mut records);

        Self { path, records }
    }

    /// Add a record in memory, dropping the oldest ones beyond capacity.
    pub fn push(&mut self, record: WeatherRecord) {
        self.records.push(record);
        keep_last(&mut self.records);
    }

    /// [`push`](Self::push) then [`persist`](Self::persist).
    ///
    /// The record stays in memory even if writing the file fails.
    pub fn append(&mut self, record: WeatherRecord) -> Result<()> {
        self.push(record);
        self.persist()
    }

    /// Overwrite the backing file with the current window.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to serialize weather history")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), len = self.records.len(), "history saved");
        Ok(())
    }

    /// Records in chronological order.
    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    /// Records newest first.
    pub fn iter_recent(&self) -> impl Iterator<Item = &WeatherRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_records(path: &Path) -> Result<Vec<WeatherRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))
}

fn keep_last(records: &mut Vec<WeatherRecord>) {
    if records.len() > HISTORY_CAPACITY {
        records.drain(..records.len() - HISTORY_CAPACITY);
    }
}
