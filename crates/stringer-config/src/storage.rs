//! Storage location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the draft and history records. Empty means the
    /// platform data directory (`~/.local/share/stringer` on Linux).
    #[serde(default)]
    pub data_dir: String,
}

impl StorageConfig {
    /// The directory to open a file backend in, if one can be determined.
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_empty() {
            dirs::data_dir().map(|p| p.join("stringer"))
        } else {
            Some(PathBuf::from(&self.data_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            data_dir: "/var/lib/stringer".into(),
        };
        assert_eq!(
            config.resolved_data_dir(),
            Some(PathBuf::from("/var/lib/stringer"))
        );
    }
}
