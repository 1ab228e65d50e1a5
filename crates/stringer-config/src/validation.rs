//! Validation thresholds.

use serde::{Deserialize, Serialize};

const fn default_quality_floor_pct() -> f64 {
    80.0
}

const fn default_outlier_ceiling() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// OK rate (percent) below which a unit is a blocking error.
    #[serde(default = "default_quality_floor_pct")]
    pub quality_floor_pct: f64,

    /// Strings per unit above which the count is flagged for review.
    #[serde(default = "default_outlier_ceiling")]
    pub outlier_ceiling: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            quality_floor_pct: default_quality_floor_pct(),
            outlier_ceiling: default_outlier_ceiling(),
        }
    }
}
