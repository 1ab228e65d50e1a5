//! Storage failures are reported and never corrupt the live snapshot.

use std::time::Duration;

use pretty_assertions::assert_eq;
use stringer_core::entities::{HistoryEntry, Snapshot};
use stringer_core::enums::{CountField, HistoryStatus, SessionStatus};
use stringer_core::ids::HistoryId;
use stringer_core::limits::{DISTRIBUTED_TRACK_MAX, UNIT_TOTAL_MAX};
use stringer_session::{EntrySession, ManualScheduler, SessionError, SessionSettings, SubmitOutcome};
use stringer_store::{EntryStore, JsonStore, MemoryBackend, StoreError};

/// In-memory store whose individual operations can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: JsonStore<MemoryBackend>,
    fail_save: bool,
    fail_append: bool,
    fail_clear: bool,
}

fn refused(op: &str) -> StoreError {
    StoreError::Backend(format!("{op} refused"))
}

impl EntryStore for FlakyStore {
    fn save_current_snapshot(&mut self, hour: u8, snapshot: &Snapshot) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(refused("save"));
        }
        self.inner.save_current_snapshot(hour, snapshot)
    }

    fn load_current_snapshot(&self, hour: u8) -> Result<Option<Snapshot>, StoreError> {
        self.inner.load_current_snapshot(hour)
    }

    fn clear_current_snapshot(&mut self, hour: u8) -> Result<(), StoreError> {
        if self.fail_clear {
            return Err(refused("clear"));
        }
        self.inner.clear_current_snapshot(hour)
    }

    fn append_history_entry(&mut self, entry: &HistoryEntry) -> Result<(), StoreError> {
        if self.fail_append {
            return Err(refused("append"));
        }
        self.inner.append_history_entry(entry)
    }

    fn list_history_entries(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        self.inner.list_history_entries()
    }

    fn delete_history_entry(&mut self, id: HistoryId) -> Result<bool, StoreError> {
        self.inner.delete_history_entry(id)
    }
}

fn session() -> EntrySession<FlakyStore, ManualScheduler> {
    let mut s = EntrySession::new(
        FlakyStore::default(),
        ManualScheduler::new(),
        SessionSettings::default(),
        6,
    )
    .unwrap();
    s.on_track_edit(1, 1, CountField::Ok, "100").unwrap();
    s
}

#[test]
fn failed_autosave_is_reported_in_tick() {
    let mut s = session();
    s.store_mut().fail_save = true;
    s.scheduler_mut().advance(Duration::from_secs(2));

    let tick = s.tick().unwrap();
    assert!(matches!(tick.autosave, Some(Err(StoreError::Backend(_)))));
    assert_eq!(s.state().last_saved(), None);
    assert_eq!(s.state().snapshot().unit(1).unwrap().total_ok, 100);
}

#[test]
fn failed_manual_save_keeps_snapshot() {
    let mut s = session();
    s.store_mut().fail_save = true;
    assert!(matches!(s.save_now(), Err(SessionError::Store(_))));
    assert_eq!(s.state().snapshot().unit(1).unwrap().total_ok, 100);

    s.store_mut().fail_save = false;
    s.save_now().unwrap();
    assert!(s.state().last_saved().is_some());
}

#[test]
fn failed_history_write_returns_to_editing() {
    let mut s = session();
    s.store_mut().fail_append = true;

    let err = s.submit(None).unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
    assert_eq!(s.state().status(), SessionStatus::Editing);
    assert!(!s.state().is_submitting());
    assert_eq!(s.state().snapshot().unit(1).unwrap().total_ok, 100);
    assert!(s.history().unwrap().is_empty());

    s.store_mut().fail_append = false;
    assert!(s.submit(None).unwrap().is_submitted());
    assert_eq!(s.history().unwrap().len(), 1);
}

#[test]
fn failed_draft_cleanup_still_submits() {
    let mut s = session();
    s.save_now().unwrap();
    s.store_mut().fail_clear = true;

    let SubmitOutcome::Submitted(receipt) = s.submit(None).unwrap() else {
        panic!("expected submission");
    };
    assert!(receipt.cleanup_error.is_some());
    assert_eq!(s.history().unwrap().len(), 1);
    assert_eq!(s.state().snapshot(), &Snapshot::new(6));
    assert_eq!(s.state().status(), SessionStatus::Submitted);
}

#[test]
fn failed_clear_all_keeps_memory_reset() {
    let mut s = session();
    s.store_mut().fail_clear = true;

    assert!(matches!(s.clear(None), Err(SessionError::Store(_))));
    assert_eq!(s.state().snapshot(), &Snapshot::new(6));
}

fn oversized_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new(6);
    for id in [1, 2] {
        let unit = snapshot.unit_mut(id).unwrap();
        unit.total_ok = 3_000_000_000;
        unit.tracks.get_mut(&1).unwrap().ok_count = 3_000_000_000;
    }
    snapshot
}

#[test]
fn oversized_draft_is_clamped_on_resume() {
    let mut s = session();
    s.store_mut()
        .inner
        .save_current_snapshot(6, &oversized_snapshot())
        .unwrap();

    assert!(s.resume().unwrap());
    let unit = s.state().snapshot().unit(1).unwrap();
    assert_eq!(unit.total_ok, UNIT_TOTAL_MAX);
    assert_eq!(unit.tracks[&1].ok_count, DISTRIBUTED_TRACK_MAX);

    let summary = s.entry_summary();
    assert_eq!(summary.total_ok, 2 * UNIT_TOTAL_MAX);
    assert_eq!(summary.completed, 2);
}

#[test]
fn oversized_history_entry_is_clamped_on_restore() {
    let mut s = session();
    let entry = HistoryEntry {
        id: 7,
        hour: 6,
        timestamp: chrono::Utc::now(),
        user: "imported".into(),
        status: HistoryStatus::Submitted,
        data: oversized_snapshot(),
        notes: None,
        carried_warnings: Vec::new(),
    };
    s.store_mut().inner.append_history_entry(&entry).unwrap();

    s.restore(7).unwrap();
    assert_eq!(s.state().snapshot().total_ok(), 2 * UNIT_TOTAL_MAX);
    assert_eq!(s.entry_summary().rows[1].total_ok, UNIT_TOTAL_MAX);
    assert_eq!(s.history().unwrap()[0].data, oversized_snapshot());
}
