//! Runtime knobs of a session, resolved from [`StringerConfig`].

use std::time::Duration;

use stringer_config::StringerConfig;
use stringer_core::limits::DEFAULT_UNIT_COUNT;
use stringer_engine::ValidationRules;

/// Everything an [`crate::EntrySession`] needs to know besides its
/// collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Units in a fresh snapshot.
    pub unit_count: u8,
    /// Recorded as the author of submitted history entries.
    pub operator: String,
    /// Initial state of the autosave toggle.
    pub autosave: bool,
    pub validation_debounce: Duration,
    pub autosave_debounce: Duration,
    pub rules: ValidationRules,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            unit_count: DEFAULT_UNIT_COUNT,
            operator: "Current User".to_string(),
            autosave: true,
            validation_debounce: Duration::from_millis(300),
            autosave_debounce: Duration::from_millis(2000),
            rules: ValidationRules::default(),
        }
    }
}

impl From<&StringerConfig> for SessionSettings {
    fn from(config: &StringerConfig) -> Self {
        Self {
            unit_count: config.entry.unit_count,
            operator: config.entry.operator.clone(),
            autosave: config.entry.autosave,
            validation_debounce: config.timing.validation_debounce(),
            autosave_debounce: config.timing.autosave_debounce(),
            rules: ValidationRules {
                quality_floor_pct: config.validation.quality_floor_pct,
                outlier_ceiling: config.validation.outlier_ceiling,
            },
        }
    }
}
