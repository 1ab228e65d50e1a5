//! `EntrySession`: the single mutator of an hour's snapshot.
//!
//! Every edit goes through the aggregation engine, then restarts the
//! validation debounce timer and (when enabled) the autosave timer. Timers
//! only fire inside [`EntrySession::tick`], so all mutation happens on the
//! caller's thread in the order the caller drives it.
//!
//! Persistence failures are returned to the caller and never roll back the
//! in-memory snapshot, which stays authoritative until a write succeeds.

use chrono::{DateTime, NaiveDate, Utc};
use stringer_core::entities::{HistoryEntry, Snapshot};
use stringer_core::enums::{CountField, EntryMode, HistoryStatus, SessionStatus, TotalField};
use stringer_core::errors::CoreError;
use stringer_core::ids::{HistoryId, check_hour, next_history_id};
use stringer_engine::aggregation;
use stringer_engine::{EntrySummary, ValidationReport, evaluate, summarize};
use stringer_store::{EntryStore, HistoryExport, StoreError, export_history};

use crate::error::SessionError;
use crate::outcome::{BeginSubmit, SubmitOutcome, SubmitReceipt, SubmitTicket, TickReport};
use crate::scheduler::{DeferredTask, Scheduler};
use crate::settings::SessionSettings;
use crate::state::SessionState;

/// Controller of one hourly entry, generic over its storage and timers.
pub struct EntrySession<S, C> {
    store: S,
    scheduler: C,
    settings: SessionSettings,
    state: SessionState,
}

impl<S: EntryStore, C: Scheduler> EntrySession<S, C> {
    /// Start a session for `hour` with an all-zero snapshot and run a first
    /// validation pass. Call [`Self::resume`] to pick up a saved draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` if `hour` is not 0..=23.
    pub fn new(
        store: S,
        scheduler: C,
        settings: SessionSettings,
        hour: u8,
    ) -> Result<Self, SessionError> {
        let hour = check_hour(hour)?;
        let state = SessionState::new(hour, settings.unit_count, settings.autosave);
        let mut session = Self {
            store,
            scheduler,
            settings,
            state,
        };
        session.run_validation()?;
        tracing::info!(hour, units = session.settings.unit_count, "entry session started");
        Ok(session)
    }

    /// Replace the snapshot with the draft saved for the current hour, if any.
    /// Returns whether a draft was found.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the draft cannot be read, or
    /// `SessionError::SubmitInFlight` while a ticket is outstanding.
    pub fn resume(&mut self) -> Result<bool, SessionError> {
        self.ensure_editable()?;
        let Some(snapshot) = self.store.load_current_snapshot(self.state.hour)? else {
            return Ok(false);
        };
        tracing::info!(hour = self.state.hour, units = snapshot.len(), "draft resumed");
        self.adopt(snapshot);
        self.run_validation()?;
        Ok(true)
    }

    /// Move on to another hour: drop pending timers and the live snapshot,
    /// then resume that hour's draft if one exists.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` for an invalid hour, `SubmitInFlight`
    /// while a ticket is outstanding, or `Store` if the draft cannot be read.
    /// On a read failure the session is already on the new hour with an
    /// empty snapshot.
    pub fn start_hour(&mut self, hour: u8) -> Result<bool, SessionError> {
        let hour = check_hour(hour)?;
        self.ensure_editable()?;
        self.cancel_timers();
        self.state.transition(SessionStatus::Editing)?;
        self.state.hour = hour;
        self.state.snapshot = Snapshot::new(self.settings.unit_count);
        self.state.last_saved = None;
        self.run_validation()?;
        tracing::info!(hour, "hour started");
        self.resume()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub const fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.state.report
    }

    /// Per-unit rows and totals for the current snapshot and issue list.
    #[must_use]
    pub fn entry_summary(&self) -> EntrySummary {
        summarize(&self.state.snapshot, &self.state.report.issues)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Set one track counter from raw input. Malformed or out-of-range input
    /// is clamped, never rejected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` for an unknown unit or track, or
    /// `SubmitInFlight` while a ticket is outstanding.
    pub fn on_track_edit(
        &mut self,
        unit_id: u8,
        track_id: u8,
        field: CountField,
        raw: &str,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        aggregation::set_track_value(&mut self.state.snapshot, unit_id, track_id, field, raw)?;
        self.mark_dirty(true)
    }

    /// Set one unit total from raw input (unit-wise entry).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` for an unknown unit, or `SubmitInFlight`.
    pub fn on_unit_edit(
        &mut self,
        unit_id: u8,
        field: TotalField,
        raw: &str,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        aggregation::set_unit_total(&mut self.state.snapshot, unit_id, field, raw)?;
        self.mark_dirty(true)
    }

    /// Split one unit's totals across its tracks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` for an unknown unit, or `SubmitInFlight`.
    pub fn distribute_to_tracks(&mut self, unit_id: u8) -> Result<(), SessionError> {
        self.ensure_editable()?;
        aggregation::distribute_to_tracks(&mut self.state.snapshot, unit_id)?;
        self.mark_dirty(true)
    }

    /// Split every unit's totals across its tracks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while a ticket is outstanding.
    pub fn distribute_all(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        aggregation::distribute_all(&mut self.state.snapshot);
        self.mark_dirty(true)
    }

    /// Switch entry mode. Entering unit-wise mode copies the track sums into
    /// the unit totals once; tracks are kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while a ticket is outstanding.
    pub fn toggle_mode(&mut self, mode: EntryMode) -> Result<(), SessionError> {
        if self.state.mode == mode {
            return Ok(());
        }
        self.ensure_editable()?;
        self.state.mode = mode;
        tracing::debug!(%mode, "entry mode switched");
        match mode {
            EntryMode::UnitWise => {
                aggregation::sync_totals(&mut self.state.snapshot);
                self.mark_dirty(true)
            }
            EntryMode::TrackWise => self.mark_dirty(false),
        }
    }

    /// Reset one unit, or every unit when `unit_id` is `None`.
    ///
    /// Clearing everything also drops the hour's saved draft and any pending
    /// autosave. The in-memory reset stands even if that removal fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` for an unknown unit, `SubmitInFlight`, or
    /// `Store` if the saved draft cannot be removed.
    pub fn clear(&mut self, unit_id: Option<u8>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        match unit_id {
            Some(id) => {
                self.state
                    .snapshot
                    .unit_mut(id)
                    .ok_or_else(|| CoreError::unit_not_found(id))?
                    .reset();
                tracing::info!(unit_id = id, "unit cleared");
                self.mark_dirty(true)
            }
            None => {
                for unit in self.state.snapshot.units_mut() {
                    unit.reset();
                }
                self.mark_dirty(false)?;
                self.cancel_autosave();
                tracing::info!(hour = self.state.hour, "all units cleared");
                self.store
                    .clear_current_snapshot(self.state.hour)
                    .inspect_err(|e| tracing::warn!(error = %e, "failed to clear saved draft"))?;
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Timers and saving
    // -----------------------------------------------------------------------

    /// Run every deferred task that has come due.
    ///
    /// An autosave failure is reported in the returned [`TickReport`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` only if the status machine is violated.
    pub fn tick(&mut self) -> Result<TickReport, SessionError> {
        let mut report = TickReport::default();
        for task in self.scheduler.take_due() {
            match task {
                DeferredTask::Validate => {
                    self.state.validation_timer = None;
                    self.run_validation()?;
                    report.validated = true;
                }
                DeferredTask::Autosave => {
                    self.state.autosave_timer = None;
                    report.autosave = Some(self.persist_snapshot());
                }
            }
        }
        Ok(report)
    }

    /// Validate immediately, superseding a pending debounced pass.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` only if the status machine is violated.
    pub fn validate_now(&mut self) -> Result<&ValidationReport, SessionError> {
        self.cancel_validation();
        self.run_validation()?;
        Ok(&self.state.report)
    }

    /// Write the snapshot now, superseding a pending autosave.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the write fails.
    pub fn save_now(&mut self) -> Result<DateTime<Utc>, SessionError> {
        self.cancel_autosave();
        Ok(self.persist_snapshot()?)
    }

    /// Turn autosave on or off. Turning it off drops a pending autosave.
    pub fn set_autosave(&mut self, enabled: bool) {
        self.state.autosave = enabled;
        if !enabled {
            self.cancel_autosave();
        }
        tracing::debug!(enabled, "autosave toggled");
    }

    /// Hide the current issues until the next validation pass.
    pub fn clear_issues(&mut self) {
        self.state.report.issues.clear();
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Stored history, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the log cannot be read.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, SessionError> {
        Ok(self.store.list_history_entries()?)
    }

    /// Load a copy of a history entry's data as the live snapshot. The entry
    /// itself stays in history.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` if no entry has `id`, `SubmitInFlight`,
    /// or `Store` if the log cannot be read.
    pub fn restore(&mut self, id: HistoryId) -> Result<(), SessionError> {
        self.ensure_editable()?;
        let entry = self
            .store
            .list_history_entries()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::history_not_found(id))?;
        tracing::info!(id, hour = entry.hour, "history entry restored");
        self.adopt(entry.data);
        self.mark_dirty(true)
    }

    /// Permanently remove a history entry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` if no entry has `id`, or `Store` if the
    /// log cannot be rewritten.
    pub fn delete_history(&mut self, id: HistoryId) -> Result<(), SessionError> {
        if !self.store.delete_history_entry(id)? {
            return Err(CoreError::history_not_found(id).into());
        }
        tracing::info!(id, "history entry deleted");
        Ok(())
    }

    /// Render the whole history as an export document dated `date`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the log cannot be read or encoded.
    pub fn export_history(&self, date: NaiveDate) -> Result<HistoryExport, SessionError> {
        let entries = self.store.list_history_entries()?;
        Ok(export_history(&entries, date)?)
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Validate synchronously and, if nothing blocks, hand out a ticket.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` only if the status machine is violated.
    pub fn begin_submit(&mut self) -> Result<BeginSubmit, SessionError> {
        if self.state.submitting {
            tracing::warn!(hour = self.state.hour, "submit ignored, one is already in flight");
            return Ok(BeginSubmit::InFlight);
        }
        self.cancel_validation();
        self.run_validation()?;

        let blocking_issue_count = self.state.report.blocking_issue_count();
        if blocking_issue_count > 0 {
            tracing::warn!(hour = self.state.hour, blocking_issue_count, "submit blocked");
            return Ok(BeginSubmit::Blocked {
                blocking_issue_count,
            });
        }

        self.state.enter_validating()?;
        self.state.transition(SessionStatus::Submitting)?;
        self.state.submitting = true;
        Ok(BeginSubmit::Ready(SubmitTicket {
            hour: self.state.hour,
            data: self.state.snapshot.clone(),
            warnings: self.state.report.warning_messages(),
        }))
    }

    /// Write the ticket's history entry, then reset the hour.
    ///
    /// `notes` defaults to a timestamped line listing any carried warnings.
    /// If the history write fails the session returns to editing with the
    /// snapshot untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the history log cannot be written, or
    /// `Core` if no submission is in flight.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        notes: Option<String>,
    ) -> Result<SubmitReceipt, SessionError> {
        self.state.check_transition(SessionStatus::Submitted)?;

        let entry = match self.record(ticket, notes) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(hour = self.state.hour, error = %err, "history write failed");
                self.state.transition(SessionStatus::Editing)?;
                self.state.submitting = false;
                return Err(err.into());
            }
        };
        self.state.transition(SessionStatus::Submitted)?;
        self.state.submitting = false;
        self.state.last_history_id = Some(entry.id);
        tracing::info!(id = entry.id, hour = entry.hour, total_ok = entry.total_ok(), "entry submitted");

        self.cancel_timers();
        self.state.snapshot = Snapshot::new(self.settings.unit_count);
        let cleanup_error = self.store.clear_current_snapshot(entry.hour).err();
        if let Some(e) = &cleanup_error {
            tracing::warn!(hour = entry.hour, error = %e, "failed to clear saved draft after submit");
        }
        self.run_validation()?;

        Ok(SubmitReceipt {
            entry,
            cleanup_error,
        })
    }

    /// Give up on a ticket and go back to editing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` if no submission is in flight.
    #[allow(clippy::needless_pass_by_value)]
    pub fn cancel_submit(&mut self, ticket: SubmitTicket) -> Result<(), SessionError> {
        self.state.transition(SessionStatus::Editing)?;
        self.state.submitting = false;
        tracing::info!(hour = ticket.hour, "submit cancelled");
        Ok(())
    }

    /// [`Self::begin_submit`] and [`Self::finish_submit`] in one call.
    ///
    /// # Errors
    ///
    /// Same as the two phases.
    pub fn submit(&mut self, notes: Option<String>) -> Result<SubmitOutcome, SessionError> {
        match self.begin_submit()? {
            BeginSubmit::Ready(ticket) => {
                Ok(SubmitOutcome::Submitted(self.finish_submit(ticket, notes)?))
            }
            BeginSubmit::Blocked {
                blocking_issue_count,
            } => Ok(SubmitOutcome::Blocked {
                blocking_issue_count,
            }),
            BeginSubmit::InFlight => Ok(SubmitOutcome::InFlight),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.state.submitting {
            return Err(SessionError::SubmitInFlight);
        }
        Ok(())
    }

    /// Make a snapshot read from storage the live one, clamping any counter
    /// that no edit could have produced.
    fn adopt(&mut self, mut snapshot: Snapshot) {
        let clamped = snapshot.clamp_counters();
        if clamped > 0 {
            tracing::warn!(
                hour = self.state.hour,
                clamped,
                "stored snapshot had out-of-range counters"
            );
        }
        self.state.snapshot = snapshot;
    }

    fn mark_dirty(&mut self, autosave: bool) -> Result<(), SessionError> {
        self.state.enter_validating()?;

        self.cancel_validation();
        self.state.validation_timer = Some(
            self.scheduler
                .schedule_after(self.settings.validation_debounce, DeferredTask::Validate),
        );

        if autosave && self.state.autosave {
            self.cancel_autosave();
            self.state.autosave_timer = Some(
                self.scheduler
                    .schedule_after(self.settings.autosave_debounce, DeferredTask::Autosave),
            );
        }
        Ok(())
    }

    fn run_validation(&mut self) -> Result<(), CoreError> {
        self.state.report = evaluate(&self.state.snapshot, self.state.mode, &self.settings.rules);
        let blocked = self.state.report.is_blocked();
        tracing::debug!(
            hour = self.state.hour,
            issues = self.state.report.issues.len(),
            blocked,
            "session revalidated"
        );

        match self.state.status {
            SessionStatus::Submitted | SessionStatus::Submitting => Ok(()),
            _ => {
                self.state.enter_validating()?;
                self.state.transition(if blocked {
                    SessionStatus::Blocked
                } else {
                    SessionStatus::Editing
                })
            }
        }
    }

    fn persist_snapshot(&mut self) -> Result<DateTime<Utc>, StoreError> {
        match self
            .store
            .save_current_snapshot(self.state.hour, &self.state.snapshot)
        {
            Ok(()) => {
                let now = Utc::now();
                self.state.last_saved = Some(now);
                tracing::info!(hour = self.state.hour, "snapshot saved");
                Ok(now)
            }
            Err(e) => {
                tracing::warn!(hour = self.state.hour, error = %e, "snapshot save failed");
                Err(e)
            }
        }
    }

    fn record(&mut self, ticket: SubmitTicket, notes: Option<String>) -> Result<HistoryEntry, StoreError> {
        let stored_max = self
            .store
            .list_history_entries()?
            .iter()
            .map(|e| e.id)
            .max();
        let last = stored_max.max(self.state.last_history_id);

        let timestamp = Utc::now();
        let now_millis = u64::try_from(timestamp.timestamp_millis()).unwrap_or_default();
        let notes = notes.unwrap_or_else(|| default_notes(timestamp, &ticket.warnings));
        let entry = HistoryEntry {
            id: next_history_id(now_millis, last),
            hour: ticket.hour,
            timestamp,
            user: self.settings.operator.clone(),
            status: HistoryStatus::Submitted,
            data: ticket.data,
            notes: Some(notes),
            carried_warnings: ticket.warnings,
        };
        self.store.append_history_entry(&entry)?;
        Ok(entry)
    }

    fn cancel_validation(&mut self) {
        if let Some(handle) = self.state.validation_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_autosave(&mut self) {
        if let Some(handle) = self.state.autosave_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_timers(&mut self) {
        self.cancel_validation();
        self.cancel_autosave();
    }
}

fn default_notes(at: DateTime<Utc>, warnings: &[String]) -> String {
    let at = at.format("%Y-%m-%d %H:%M:%S UTC");
    if warnings.is_empty() {
        format!("Submitted at {at}")
    } else {
        format!(
            "Submitted at {at} with {} warning(s): {}",
            warnings.len(),
            warnings.join("; ")
        )
    }
}
