//! Wiring a file-backed session from configuration.

use stringer_config::{ConfigError, StorageConfig, StringerConfig};
use stringer_store::{FileBackend, JsonStore};

use crate::controller::EntrySession;
use crate::error::SessionError;
use crate::scheduler::ClockScheduler;
use crate::settings::SessionSettings;

/// A session persisting to JSON files and timed by the wall clock.
pub type FileSession = EntrySession<JsonStore<FileBackend>, ClockScheduler>;

/// Open the JSON file store under the configured data directory.
///
/// # Errors
///
/// Returns `SessionError::Config` if no data directory can be determined,
/// or `SessionError::Store` if it cannot be created.
pub fn open_store(config: &StorageConfig) -> Result<JsonStore<FileBackend>, SessionError> {
    let dir = config
        .resolved_data_dir()
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "storage.data_dir".to_string(),
            reason: "no platform data directory; set it explicitly".to_string(),
        })?;
    Ok(JsonStore::new(FileBackend::open(dir)?))
}

impl FileSession {
    /// Open the configured store, start `hour` and resume its saved draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be opened, the hour is
    /// invalid, or the draft cannot be read.
    pub fn open(config: &StringerConfig, hour: u8) -> Result<Self, SessionError> {
        let store = open_store(&config.storage)?;
        let mut session = Self::new(store, ClockScheduler::new(), SessionSettings::from(config), hour)?;
        session.resume()?;
        Ok(session)
    }
}
