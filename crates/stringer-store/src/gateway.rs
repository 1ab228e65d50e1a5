//! The persistence gateway consumed by the session controller.

use serde::Serialize;
use serde::de::DeserializeOwned;
use stringer_core::entities::{HistoryEntry, Snapshot};
use stringer_core::ids::{ENTITY_ENTRY_HISTORY, HistoryId, snapshot_key};

use crate::backend::KeyValueBackend;
use crate::error::StoreError;

/// Storage operations an entry session relies on.
///
/// All calls are synchronous from the caller's point of view. Failures are
/// returned, never retried.
pub trait EntryStore {
    /// Overwrite the draft snapshot of `hour`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or writing fails.
    fn save_current_snapshot(&mut self, hour: u8, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Read the draft snapshot of `hour`, `Ok(None)` if none was saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if reading fails or the record is malformed.
    fn load_current_snapshot(&self, hour: u8) -> Result<Option<Snapshot>, StoreError>;

    /// Drop the draft snapshot of `hour`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the removal fails.
    fn clear_current_snapshot(&mut self, hour: u8) -> Result<(), StoreError>;

    /// Put `entry` at the head of the history log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be read or written.
    fn append_history_entry(&mut self, entry: &HistoryEntry) -> Result<(), StoreError>;

    /// All history entries, newest first. Empty if the log was never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be read or is malformed.
    fn list_history_entries(&self) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Remove the entry with `id`. Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be read or written.
    fn delete_history_entry(&mut self, id: HistoryId) -> Result<bool, StoreError>;
}

/// [`EntryStore`] over a [`KeyValueBackend`], one JSON document per key.
#[derive(Debug, Clone, Default)]
pub struct JsonStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> JsonStore<B> {
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::serialization(key, e)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::serialization(key, e))?;
        self.backend.set(key, &raw)
    }

    fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.read(ENTITY_ENTRY_HISTORY)?.unwrap_or_default())
    }
}

impl<B: KeyValueBackend> EntryStore for JsonStore<B> {
    fn save_current_snapshot(&mut self, hour: u8, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.write(&snapshot_key(hour), snapshot)?;
        tracing::debug!(hour, "draft snapshot saved");
        Ok(())
    }

    fn load_current_snapshot(&self, hour: u8) -> Result<Option<Snapshot>, StoreError> {
        self.read(&snapshot_key(hour))
    }

    fn clear_current_snapshot(&mut self, hour: u8) -> Result<(), StoreError> {
        self.backend.remove(&snapshot_key(hour))
    }

    fn append_history_entry(&mut self, entry: &HistoryEntry) -> Result<(), StoreError> {
        let mut entries = self.history()?;
        entries.insert(0, entry.clone());
        self.write(ENTITY_ENTRY_HISTORY, &entries)?;
        tracing::debug!(id = entry.id, len = entries.len(), "history entry appended");
        Ok(())
    }

    fn list_history_entries(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        self.history()
    }

    fn delete_history_entry(&mut self, id: HistoryId) -> Result<bool, StoreError> {
        let mut entries = self.history()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write(ENTITY_ENTRY_HISTORY, &entries)?;
        tracing::debug!(id, len = entries.len(), "history entry deleted");
        Ok(true)
    }
}
