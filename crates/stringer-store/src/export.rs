//! Download-style export of the history log.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use stringer_core::entities::HistoryEntry;
use stringer_core::ids::ENTITY_ENTRY_HISTORY;

use crate::error::StoreError;

/// A rendered history document and the file name to offer it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    /// `entry-history-YYYY-MM-DD.json`
    pub file_name: String,
    /// Indented JSON array of the entries, newest first.
    pub contents: String,
}

impl HistoryExport {
    /// Write the document into `dir` and return the full path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents).map_err(|e| StoreError::io(&self.file_name, e))?;
        tracing::info!(path = %path.display(), "history exported");
        Ok(path)
    }
}

/// Render `entries` as the export document for `date`.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the entries cannot be encoded.
pub fn export_history(entries: &[HistoryEntry], date: NaiveDate) -> Result<HistoryExport, StoreError> {
    let contents = serde_json::to_string_pretty(entries)
        .map_err(|e| StoreError::serialization(ENTITY_ENTRY_HISTORY, e))?;
    Ok(HistoryExport {
        file_name: format!("{ENTITY_ENTRY_HISTORY}-{}.json", date.format("%Y-%m-%d")),
        contents,
    })
}
