use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{IssueKind, Severity};

/// A single finding of a validation pass. Never persisted; recomputed from
/// the current snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationIssue {
    pub unit_id: u8,
    pub track_id: Option<u8>,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Counts derived from one validation pass.
///
/// `passed` is `unit_count - issues.len()` and goes negative when a pass
/// yields more issues than there are units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationSummary {
    pub passed: i64,
    pub warnings: usize,
    pub errors: usize,
    pub pending: usize,
}

/// How many units have data out of how many exist.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryProgress {
    pub completed: usize,
    pub total: usize,
}
