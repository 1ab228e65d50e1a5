//! Debounce delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_validation_debounce_ms() -> u64 {
    300
}

const fn default_autosave_debounce_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Quiet period after the last edit before validation re-runs.
    #[serde(default = "default_validation_debounce_ms")]
    pub validation_debounce_ms: u64,

    /// Quiet period after the last edit before the draft is autosaved.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            validation_debounce_ms: default_validation_debounce_ms(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub const fn validation_debounce(&self) -> Duration {
        Duration::from_millis(self.validation_debounce_ms)
    }

    #[must_use]
    pub const fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}
