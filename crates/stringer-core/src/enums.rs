//! Status enums, entry modes, issue kinds, and session actions for Stringer.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `SessionStatus` provides `allowed_next_states()` to enforce valid transitions
//! in the session controller.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CountField
// ---------------------------------------------------------------------------

/// Which per-track counter an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CountField {
    Ok,
    Ng,
}

impl CountField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Ng => "ng",
        }
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TotalField
// ---------------------------------------------------------------------------

/// Which unit total a bulk edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TotalField {
    TotalOk,
    TotalNg,
}

impl TotalField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TotalOk => "total_ok",
            Self::TotalNg => "total_ng",
        }
    }
}

impl fmt::Display for TotalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntryMode
// ---------------------------------------------------------------------------

/// How counts are entered for the current hour.
///
/// Track-wise keeps unit totals equal to the sum of their tracks. Unit-wise
/// accepts totals directly and leaves tracks alone until distribution runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    #[default]
    TrackWise,
    UnitWise,
}

impl EntryMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrackWise => "track_wise",
            Self::UnitWise => "unit_wise",
        }
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueKind
// ---------------------------------------------------------------------------

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Required,
    Range,
    Format,
}

impl IssueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Range => "range",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a validation issue. Only `High` blocks submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub const fn blocks_submission(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HistoryStatus
// ---------------------------------------------------------------------------

/// Status recorded on a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStatus {
    Draft,
    Submitted,
    Error,
}

impl HistoryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Status of an hourly entry session.
///
/// ```text
/// editing → validating → editing
///                      → blocked → validating (after an edit)
///                      → submitting → submitted → editing (next hour / reset)
///                                   → editing (cancelled or write failed)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Editing,
    Validating,
    Blocked,
    Submitting,
    Submitted,
}

impl SessionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Editing => &[Self::Validating],
            Self::Validating => &[Self::Editing, Self::Blocked, Self::Submitting],
            Self::Blocked => &[Self::Editing, Self::Validating],
            Self::Submitting => &[Self::Submitted, Self::Editing],
            Self::Submitted => &[Self::Editing],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Validating => "validating",
            Self::Blocked => "blocked",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RowStatus
// ---------------------------------------------------------------------------

/// Per-unit status shown in the entry summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Complete,
    Error,
    Pending,
}

impl RowStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SessionAction
// ---------------------------------------------------------------------------

/// Entry points of the session controller that a host may need to gate.
///
/// The controller never prompts. Hosts check `requires_confirmation()` and
/// ask the operator before invoking the matching operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    EditTrack,
    EditUnit,
    Distribute,
    ToggleMode,
    Save,
    Submit,
    ClearUnit,
    ClearAll,
    Restore,
    DeleteHistory,
    Export,
}

impl SessionAction {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn requires_confirmation(self) -> bool {
        match self {
            Self::Submit | Self::ClearUnit | Self::ClearAll | Self::Restore | Self::DeleteHistory => {
                true
            }
            Self::EditTrack
            | Self::EditUnit
            | Self::Distribute
            | Self::ToggleMode
            | Self::Save
            | Self::Export => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EditTrack => "edit_track",
            Self::EditUnit => "edit_unit",
            Self::Distribute => "distribute",
            Self::ToggleMode => "toggle_mode",
            Self::Save => "save",
            Self::Submit => "submit",
            Self::ClearUnit => "clear_unit",
            Self::ClearAll => "clear_all",
            Self::Restore => "restore",
            Self::DeleteHistory => "delete_history",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
