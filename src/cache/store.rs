//! CSV-backed history store for fetched APOD entries
//!
//! Provides a `CacheStore` that keeps every fetched entry in a single
//! comma-separated file, one row per unique date. Rows are append-only: an
//! entry is never updated or deleted once written.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::data::ApodRecord;

/// File name of the history file inside the data directory
const HISTORY_FILE_NAME: &str = "apod_history.csv";

/// Errors that can occur when reading or writing the history file
///
/// These are fatal for the operation that hit them; the store makes no attempt
/// to repair a damaged file.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Existing history file could not be parsed
    #[error("history file is malformed: {0}")]
    Malformed(#[from] csv::Error),
}

/// Manages the on-disk CSV history of fetched entries
///
/// The store keeps the file sorted in insertion order with a header row of
/// `date,title,explanation,copyright,media_type,url,hdurl`. Every update
/// rewrites the whole file in place; there is no locking and no atomic
/// replace, so the store is strictly single-process.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the CSV history file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant data directory
    ///
    /// Uses `~/.local/share/apodview/apod_history.csv` on Linux, or the
    /// equivalent path on other platforms. Returns `None` if the data
    /// directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "apodview")?;
        let path = project_dirs.data_dir().join(HISTORY_FILE_NAME);
        Some(Self { path })
    }

    /// Creates a new CacheStore backed by a specific file
    ///
    /// Used for the `--cache-file` CLI override and for testing.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the backing file
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full history from disk
    ///
    /// A missing file is an empty history. An existing but unparseable file is
    /// a [`CacheError::Malformed`] error.
    pub fn load(&self) -> Result<Vec<ApodRecord>, CacheError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Inserts a record into the history unless its date is already present
    ///
    /// Loads the existing rows, appends the record if no row shares its
    /// `date`, and rewrites the file. When the date is already present the
    /// existing row wins; the incoming record is dropped, not merged.
    ///
    /// # Returns
    /// The in-memory history as it now stands, including the fresh row if one
    /// was appended.
    pub fn upsert(&self, record: &ApodRecord) -> Result<Vec<ApodRecord>, CacheError> {
        let mut rows = self.load()?;

        if !rows.iter().any(|row| row.date == record.date) {
            rows.push(record.clone());
        }

        self.write_all(&rows)?;
        debug!(
            path = %self.path.display(),
            rows = rows.len(),
            "history file rewritten"
        );
        Ok(rows)
    }

    /// Rewrites the whole history file from the given rows
    ///
    /// No atomic replace: a crash mid-write may leave a truncated file.
    fn write_all(&self, rows: &[ApodRecord]) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
