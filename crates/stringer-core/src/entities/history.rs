use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::HistoryStatus;
use crate::ids::HistoryId;

use super::Snapshot;

/// A submitted snapshot plus audit metadata.
///
/// Holds its own copy of the data; later edits to the live snapshot never
/// reach it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// Hour of day (0..=23) the entry was made for.
    pub hour: u8,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub status: HistoryStatus,
    pub data: Snapshot,
    pub notes: Option<String>,
    /// Medium-severity messages that were outstanding at submission.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carried_warnings: Vec<String>,
}

impl HistoryEntry {
    #[must_use]
    pub fn total_ok(&self) -> u32 {
        self.data.total_ok()
    }

    #[must_use]
    pub fn total_modules(&self) -> u32 {
        self.data.total_modules()
    }
}
