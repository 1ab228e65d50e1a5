//! Invariants that must hold after arbitrary sequences of edits.

use pretty_assertions::assert_eq;
use stringer_core::entities::Snapshot;
use stringer_core::enums::{CountField, EntryMode, TotalField};
use stringer_engine::aggregation::{
    distribute_all, set_track_value, set_unit_total, sync_totals,
};
use stringer_engine::{ValidationRules, evaluate, summarize};

/// Deterministic pseudo-random inputs, mixing valid, out-of-range and junk text.
fn inputs() -> impl Iterator<Item = String> {
    let mut state: u32 = 0x2545_f491;
    std::iter::from_fn(move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let s = match state % 7 {
            0 => "junk".to_string(),
            1 => format!("-{}", state % 50),
            2 => format!("{}", state % 5000),
            3 => String::new(),
            _ => format!("{}", state % 1200),
        };
        Some(s)
    })
}

#[test]
fn track_edits_keep_totals_equal_to_track_sums() {
    let mut snapshot = Snapshot::new(6);
    for (step, raw) in inputs().take(2_000).enumerate() {
        let unit_id = u8::try_from(step % 6).unwrap() + 1;
        let track_id = u8::try_from(step % 2).unwrap() + 1;
        let field = if step % 3 == 0 { CountField::Ng } else { CountField::Ok };

        let unit = set_track_value(&mut snapshot, unit_id, track_id, field, &raw).unwrap();
        let ok_sum: u32 = unit.tracks.values().map(|t| t.ok_count).sum();
        let ng_sum: u32 = unit.tracks.values().map(|t| t.ng_count).sum();
        assert_eq!(unit.total_ok, ok_sum);
        assert_eq!(unit.total_ng, ng_sum);
        assert!(unit.tracks.values().all(|t| t.ok_count <= 999 && t.ng_count <= 999));
    }
    assert!(snapshot.is_reconciled());
}

#[test]
fn bulk_entry_then_distribute_reconciles() {
    let mut snapshot = Snapshot::new(6);
    for (step, raw) in inputs().take(120).enumerate() {
        let unit_id = u8::try_from(step % 6).unwrap() + 1;
        let field = if step % 2 == 0 { TotalField::TotalOk } else { TotalField::TotalNg };
        let unit = set_unit_total(&mut snapshot, unit_id, field, &raw).unwrap();
        assert!(unit.total_ok <= 9999 && unit.total_ng <= 9999);
    }

    let before: Vec<(u32, u32)> = snapshot.units().map(|u| (u.total_ok, u.total_ng)).collect();
    distribute_all(&mut snapshot);
    let after: Vec<(u32, u32)> = snapshot.units().map(|u| (u.total_ok, u.total_ng)).collect();

    assert_eq!(before, after, "distribution must not change totals");
    assert!(snapshot.is_reconciled());
    for unit in snapshot.units() {
        assert!(unit.tracks[&1].ok_count >= unit.tracks[&2].ok_count);
        assert!(unit.tracks[&1].ng_count >= unit.tracks[&2].ng_count);
    }
}

#[test]
fn switching_to_unit_wise_syncs_once_without_clearing_tracks() {
    let mut snapshot = Snapshot::new(2);
    set_track_value(&mut snapshot, 1, 1, CountField::Ok, "40").unwrap();
    set_track_value(&mut snapshot, 1, 2, CountField::Ok, "41").unwrap();
    set_unit_total(&mut snapshot, 1, TotalField::TotalOk, "7").unwrap();

    sync_totals(&mut snapshot);
    let unit = snapshot.unit(1).unwrap();
    assert_eq!(unit.total_ok, 81);
    assert_eq!(unit.tracks[&1].ok_count, 40);
    assert_eq!(unit.tracks[&2].ok_count, 41);
}

#[test]
fn large_distribution_trips_the_track_bound_rule() {
    let mut snapshot = Snapshot::new(1);
    set_unit_total(&mut snapshot, 1, TotalField::TotalOk, "4000").unwrap();
    distribute_all(&mut snapshot);

    let report = evaluate(&snapshot, EntryMode::TrackWise, &ValidationRules::default());
    let track_issues = report.issues.iter().filter(|i| i.track_id.is_some()).count();
    assert_eq!(track_issues, 2);
    assert!(report.is_blocked());

    let summary = summarize(&snapshot, &report.issues);
    assert_eq!(summary.total_modules, 333);
}
