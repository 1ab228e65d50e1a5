//! Structured results of session operations that are not plain success.

use chrono::{DateTime, Utc};
use stringer_core::entities::{HistoryEntry, Snapshot};
use stringer_store::StoreError;

/// Permission to write one history entry, handed out by
/// [`crate::EntrySession::begin_submit`].
///
/// While a ticket exists the session refuses edits. Pass it back to
/// `finish_submit` or `cancel_submit`.
#[derive(Debug)]
#[must_use = "an outstanding ticket freezes the session until finished or cancelled"]
pub struct SubmitTicket {
    pub(crate) hour: u8,
    pub(crate) data: Snapshot,
    pub(crate) warnings: Vec<String>,
}

impl SubmitTicket {
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// The snapshot that will be recorded.
    #[must_use]
    pub const fn data(&self) -> &Snapshot {
        &self.data
    }

    /// Medium-severity messages that will travel with the entry.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// First phase of a submission.
#[derive(Debug)]
pub enum BeginSubmit {
    /// Validation passed; confirm with the user, then finish or cancel.
    Ready(SubmitTicket),
    /// High-severity issues remain.
    Blocked { blocking_issue_count: usize },
    /// Another submission is already outstanding.
    InFlight,
}

/// Result of a one-shot [`crate::EntrySession::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(SubmitReceipt),
    Blocked { blocking_issue_count: usize },
    InFlight,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// A history entry that was written.
#[derive(Debug)]
pub struct SubmitReceipt {
    pub entry: HistoryEntry,
    /// Clearing the hour's draft record failed after the entry was written.
    /// The entry stands; the stale draft will be overwritten on next save.
    pub cleanup_error: Option<StoreError>,
}

/// What a call to [`crate::EntrySession::tick`] did.
#[derive(Debug, Default)]
pub struct TickReport {
    /// A debounced validation pass ran.
    pub validated: bool,
    /// A debounced autosave ran, with its outcome.
    pub autosave: Option<Result<DateTime<Utc>, StoreError>>,
}

impl TickReport {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.validated && self.autosave.is_none()
    }
}
