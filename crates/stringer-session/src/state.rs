//! The mutable state owned by one [`crate::EntrySession`].

use chrono::{DateTime, Utc};
use stringer_core::entities::Snapshot;
use stringer_core::enums::{EntryMode, SessionStatus};
use stringer_core::errors::CoreError;
use stringer_core::ids::HistoryId;
use stringer_engine::ValidationReport;

use crate::scheduler::TaskHandle;

const ENTITY_SESSION: &str = "entry-session";

/// Live state of an hourly entry. Read through [`crate::EntrySession::state`].
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) hour: u8,
    pub(crate) mode: EntryMode,
    pub(crate) status: SessionStatus,
    pub(crate) snapshot: Snapshot,
    pub(crate) report: ValidationReport,
    pub(crate) autosave: bool,
    pub(crate) last_saved: Option<DateTime<Utc>>,
    pub(crate) submitting: bool,
    pub(crate) validation_timer: Option<TaskHandle>,
    pub(crate) autosave_timer: Option<TaskHandle>,
    pub(crate) last_history_id: Option<HistoryId>,
}

impl SessionState {
    pub(crate) fn new(hour: u8, unit_count: u8, autosave: bool) -> Self {
        Self {
            hour,
            mode: EntryMode::default(),
            status: SessionStatus::default(),
            snapshot: Snapshot::new(unit_count),
            report: ValidationReport::default(),
            autosave,
            last_saved: None,
            submitting: false,
            validation_timer: None,
            autosave_timer: None,
            last_history_id: None,
        }
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn mode(&self) -> EntryMode {
        self.mode
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Result of the most recent validation pass.
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }

    #[must_use]
    pub const fn autosave(&self) -> bool {
        self.autosave
    }

    /// When the snapshot was last written to storage by this session.
    #[must_use]
    pub const fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Whether a submission ticket is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub const fn validation_pending(&self) -> bool {
        self.validation_timer.is_some()
    }

    #[must_use]
    pub const fn autosave_pending(&self) -> bool {
        self.autosave_timer.is_some()
    }

    /// Move to `next`, enforcing [`SessionStatus::can_transition_to`].
    /// Staying in the current status is always allowed.
    pub(crate) fn transition(&mut self, next: SessionStatus) -> Result<(), CoreError> {
        if self.status == next {
            return Ok(());
        }
        self.check_transition(next)?;
        tracing::debug!(hour = self.hour, from = %self.status, to = %next, "session status");
        self.status = next;
        Ok(())
    }

    /// Fail unless `next` is reachable from the current status.
    pub(crate) fn check_transition(&self, next: SessionStatus) -> Result<(), CoreError> {
        if self.status != next && !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: ENTITY_SESSION.to_string(),
                id: self.hour.to_string(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        Ok(())
    }

    /// Route into `Validating` from wherever an edit or a check can start.
    pub(crate) fn enter_validating(&mut self) -> Result<(), CoreError> {
        if self.status == SessionStatus::Submitted {
            self.transition(SessionStatus::Editing)?;
        }
        self.transition(SessionStatus::Validating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_state_is_editing_with_zeroed_units() {
        let state = SessionState::new(9, 6, true);
        assert_eq!(state.status(), SessionStatus::Editing);
        assert_eq!(state.mode(), EntryMode::TrackWise);
        assert_eq!(state.snapshot().len(), 6);
        assert!(!state.is_submitting());
        assert_eq!(state.last_saved(), None);
    }

    #[test]
    fn illegal_transition_is_rejected() {
        let mut state = SessionState::new(9, 6, true);
        let err = state.transition(SessionStatus::Submitted).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { ref from, ref to, .. }
            if from == "editing" && to == "submitted"));
        assert_eq!(state.status(), SessionStatus::Editing);
    }

    #[test]
    fn submitted_reenters_validation_through_editing() {
        let mut state = SessionState::new(9, 6, true);
        state.status = SessionStatus::Submitted;
        state.enter_validating().unwrap();
        assert_eq!(state.status(), SessionStatus::Validating);
    }
}
