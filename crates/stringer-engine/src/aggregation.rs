//! Clamped edits and roll-ups over a [`Snapshot`].
//!
//! Raw input arrives as text from numeric fields. It is parsed leniently
//! (leading integer, anything unparseable is 0) and clamped before it is
//! stored, so a snapshot never holds an out-of-range counter that came in
//! through these functions.

use stringer_core::entities::{Snapshot, Track, Unit};
use stringer_core::enums::{CountField, TotalField};
use stringer_core::errors::CoreError;
use stringer_core::limits::{TRACK_COUNT_MAX, TRACKS_PER_UNIT, UNIT_TOTAL_MAX};

/// Parse the leading integer of `raw` and clamp it to `0..=max`.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit. Input without a leading digit yields 0.
#[must_use]
pub fn parse_count(raw: &str, max: u32) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if !seen_digit || negative {
        return 0;
    }
    u32::try_from(value.min(u64::from(max))).unwrap_or(max)
}

/// Store a track counter and recompute the unit totals from its tracks.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the unit or track does not exist.
pub fn set_track_value<'a>(
    snapshot: &'a mut Snapshot,
    unit_id: u8,
    track_id: u8,
    field: CountField,
    raw: &str,
) -> Result<&'a Unit, CoreError> {
    let value = parse_count(raw, TRACK_COUNT_MAX);
    let unit = snapshot
        .unit_mut(unit_id)
        .ok_or_else(|| CoreError::unit_not_found(unit_id))?;
    let track = unit
        .tracks
        .get_mut(&track_id)
        .ok_or_else(|| CoreError::track_not_found(unit_id, track_id))?;

    track.set(field, value);
    unit.sync_totals_from_tracks();

    tracing::debug!(
        unit_id,
        track_id,
        %field,
        value,
        total_ok = unit.total_ok,
        total_ng = unit.total_ng,
        "track value set"
    );
    Ok(&*unit)
}

/// Store a unit total directly (unit-wise entry). Tracks are left untouched.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the unit does not exist.
pub fn set_unit_total<'a>(
    snapshot: &'a mut Snapshot,
    unit_id: u8,
    field: TotalField,
    raw: &str,
) -> Result<&'a Unit, CoreError> {
    let value = parse_count(raw, UNIT_TOTAL_MAX);
    let unit = snapshot
        .unit_mut(unit_id)
        .ok_or_else(|| CoreError::unit_not_found(unit_id))?;

    unit.set_total(field, value);

    tracing::debug!(unit_id, %field, value, "unit total set");
    Ok(&*unit)
}

/// Split a unit's totals across its tracks.
///
/// Each track gets `total / 2`; the remainder goes entirely to track 1.
/// OK and NG are split independently.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the unit does not exist.
pub fn distribute_to_tracks(snapshot: &mut Snapshot, unit_id: u8) -> Result<&Unit, CoreError> {
    let unit = snapshot
        .unit_mut(unit_id)
        .ok_or_else(|| CoreError::unit_not_found(unit_id))?;
    distribute_unit(unit);
    Ok(&*unit)
}

/// Apply [`distribute_to_tracks`] to every unit.
pub fn distribute_all(snapshot: &mut Snapshot) {
    for unit in snapshot.units_mut() {
        distribute_unit(unit);
    }
}

fn distribute_unit(unit: &mut Unit) {
    let divisor = u32::from(TRACKS_PER_UNIT);
    let (ok_base, ok_rem) = (unit.total_ok / divisor, unit.total_ok % divisor);
    let (ng_base, ng_rem) = (unit.total_ng / divisor, unit.total_ng % divisor);

    unit.tracks = (1..=TRACKS_PER_UNIT)
        .map(|id| {
            let first = id == 1;
            let track = Track {
                id,
                ok_count: ok_base + if first { ok_rem } else { 0 },
                ng_count: ng_base + if first { ng_rem } else { 0 },
            };
            (id, track)
        })
        .collect();

    tracing::debug!(
        unit_id = unit.id,
        total_ok = unit.total_ok,
        total_ng = unit.total_ng,
        "totals distributed to tracks"
    );
}

/// Overwrite every unit's totals with its track sums.
///
/// Run once when switching to unit-wise entry; tracks are kept.
pub fn sync_totals(snapshot: &mut Snapshot) {
    for unit in snapshot.units_mut() {
        unit.sync_totals_from_tracks();
    }
}

/// Whole modules produced by `unit`: `floor(total_ok / 12)`.
#[must_use]
pub const fn modules_for(unit: &Unit) -> u32 {
    unit.modules()
}

/// OK share of all strings as a rounded percentage. Zero output is 0%.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quality_rate(ok: u32, ng: u32) -> u32 {
    let total = u64::from(ok) + u64::from(ng);
    if total == 0 {
        return 0;
    }
    // Result is within 0..=100.
    ((f64::from(ok) / total as f64) * 100.0).round() as u32
}
