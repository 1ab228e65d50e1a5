//! # stringer-config
//!
//! Layered configuration loading for Stringer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STRINGER_*` prefix, `__` as separator)
//! 2. Project-level `.stringer/config.toml`
//! 3. User-level `~/.config/stringer/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STRINGER_ENTRY__UNIT_COUNT` -> `entry.unit_count`,
//! `STRINGER_TIMING__AUTOSAVE_DEBOUNCE_MS` -> `timing.autosave_debounce_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use stringer_config::StringerConfig;
//!
//! let config = StringerConfig::load_with_dotenv().expect("config");
//! println!("{} stringers, autosave {}", config.entry.unit_count, config.entry.autosave);
//! ```

mod entry;
mod error;
mod logging;
mod storage;
mod timing;
mod validation;

pub use entry::EntryConfig;
pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
pub use timing::TimingConfig;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StringerConfig {
    #[serde(default)]
    pub entry: EntryConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StringerConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and check the result.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails, or
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory or
    /// one of its parents.
    ///
    /// A missing `.env` is silently ignored. An unreadable or malformed one is
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), ".env loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, ".env skipped"),
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".stringer/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("STRINGER_").split("__"))
    }

    /// Reject values the session cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=99).contains(&self.entry.unit_count) {
            return Err(invalid(
                "entry.unit_count",
                format!("{} is outside 1..=99", self.entry.unit_count),
            ));
        }
        let floor = self.validation.quality_floor_pct;
        if !(0.0..=100.0).contains(&floor) {
            return Err(invalid(
                "validation.quality_floor_pct",
                format!("{floor} is outside 0..=100"),
            ));
        }
        if self.validation.outlier_ceiling == 0 {
            return Err(invalid(
                "validation.outlier_ceiling",
                "must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stringer").join("config.toml"))
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}
