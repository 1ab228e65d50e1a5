//! Entry session defaults.

use serde::{Deserialize, Serialize};
use stringer_core::limits::DEFAULT_UNIT_COUNT;

const fn default_unit_count() -> u8 {
    DEFAULT_UNIT_COUNT
}

fn default_operator() -> String {
    "Current User".to_string()
}

const fn default_autosave() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntryConfig {
    /// Number of stringers on the line.
    #[serde(default = "default_unit_count")]
    pub unit_count: u8,

    /// Name recorded as the submitting user of history entries.
    #[serde(default = "default_operator")]
    pub operator: String,

    /// Whether edits are saved automatically after the autosave debounce.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            unit_count: default_unit_count(),
            operator: default_operator(),
            autosave: default_autosave(),
        }
    }
}
