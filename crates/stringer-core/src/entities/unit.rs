use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CountField, TotalField};
use crate::limits::{DISTRIBUTED_TRACK_MAX, STRINGS_PER_MODULE, TRACKS_PER_UNIT, UNIT_TOTAL_MAX};

use super::Track;

/// A stringer: the aggregation root for its tracks.
///
/// In track-wise mode `total_ok`/`total_ng` always equal the track sums.
/// In unit-wise mode they are entered directly and may diverge until the
/// tracks are redistributed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Unit {
    pub id: u8,
    pub total_ok: u32,
    pub total_ng: u32,
    pub tracks: BTreeMap<u8, Track>,
}

impl Unit {
    /// A unit with zeroed totals and `TRACKS_PER_UNIT` zeroed tracks.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self {
            id,
            total_ok: 0,
            total_ng: 0,
            tracks: (1..=TRACKS_PER_UNIT).map(|t| (t, Track::new(t))).collect(),
        }
    }

    #[must_use]
    pub const fn total(&self, field: TotalField) -> u32 {
        match field {
            TotalField::TotalOk => self.total_ok,
            TotalField::TotalNg => self.total_ng,
        }
    }

    pub const fn set_total(&mut self, field: TotalField, value: u32) {
        match field {
            TotalField::TotalOk => self.total_ok = value,
            TotalField::TotalNg => self.total_ng = value,
        }
    }

    /// Sum of one counter across all tracks.
    #[must_use]
    pub fn track_sum(&self, field: CountField) -> u32 {
        self.tracks
            .values()
            .fold(0, |acc: u32, t| acc.saturating_add(t.get(field)))
    }

    /// Set both totals from the current track sums.
    pub fn sync_totals_from_tracks(&mut self) {
        self.total_ok = self.track_sum(CountField::Ok);
        self.total_ng = self.track_sum(CountField::Ng);
    }

    /// Pull every counter back into the range edits can produce. Returns how
    /// many counters were changed.
    ///
    /// Totals are capped at `UNIT_TOTAL_MAX`. Tracks are capped at
    /// `DISTRIBUTED_TRACK_MAX` rather than the per-edit limit so that a
    /// distributed draft survives a reload unchanged.
    pub fn clamp_counters(&mut self) -> usize {
        let mut changed = 0;
        for total in [&mut self.total_ok, &mut self.total_ng] {
            changed += clamp(total, UNIT_TOTAL_MAX);
        }
        for track in self.tracks.values_mut() {
            changed += clamp(&mut track.ok_count, DISTRIBUTED_TRACK_MAX);
            changed += clamp(&mut track.ng_count, DISTRIBUTED_TRACK_MAX);
        }
        changed
    }

    /// A unit counts as completed once either total is non-zero.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.total_ok > 0 || self.total_ng > 0
    }

    /// Whole modules built from this unit's OK strings.
    #[must_use]
    pub const fn modules(&self) -> u32 {
        self.total_ok / STRINGS_PER_MODULE
    }

    /// Return to the zero state, keeping the id.
    pub fn reset(&mut self) {
        *self = Self::new(self.id);
    }
}

fn clamp(value: &mut u32, max: u32) -> usize {
    if *value > max {
        *value = max;
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_unit_has_two_zeroed_tracks() {
        let unit = Unit::new(3);
        assert_eq!(unit.tracks.len(), 2);
        assert!(unit.tracks.values().all(|t| t.ok_count == 0 && t.ng_count == 0));
        assert_eq!(unit.tracks[&1].id, 1);
        assert_eq!(unit.tracks[&2].id, 2);
        assert!(!unit.has_data());
    }

    #[test]
    fn modules_floor_divide_by_twelve() {
        let mut unit = Unit::new(1);
        unit.total_ok = 144;
        assert_eq!(unit.modules(), 12);
        unit.total_ok = 11;
        assert_eq!(unit.modules(), 0);
    }

    #[test]
    fn sync_totals_sums_tracks() {
        let mut unit = Unit::new(1);
        unit.tracks.get_mut(&1).unwrap().ok_count = 40;
        unit.tracks.get_mut(&2).unwrap().ok_count = 35;
        unit.tracks.get_mut(&2).unwrap().ng_count = 4;
        unit.sync_totals_from_tracks();
        assert_eq!(unit.total_ok, 75);
        assert_eq!(unit.total_ng, 4);
    }

    #[test]
    fn clamp_counters_caps_oversized_values() {
        let mut unit = Unit::new(2);
        unit.total_ok = 3_000_000_000;
        unit.total_ng = 12;
        unit.tracks.get_mut(&1).unwrap().ok_count = 5000;
        unit.tracks.get_mut(&2).unwrap().ng_count = u32::MAX;

        assert_eq!(unit.clamp_counters(), 2);
        assert_eq!(unit.total_ok, UNIT_TOTAL_MAX);
        assert_eq!(unit.total_ng, 12);
        assert_eq!(unit.tracks[&1].ok_count, 5000);
        assert_eq!(unit.tracks[&2].ng_count, DISTRIBUTED_TRACK_MAX);
        assert_eq!(unit.clamp_counters(), 0);
    }

    #[test]
    fn track_sum_saturates() {
        let mut unit = Unit::new(1);
        unit.tracks.get_mut(&1).unwrap().ok_count = u32::MAX;
        unit.tracks.get_mut(&2).unwrap().ok_count = 7;
        assert_eq!(unit.track_sum(CountField::Ok), u32::MAX);
    }

    #[test]
    fn reset_keeps_id() {
        let mut unit = Unit::new(5);
        unit.total_ok = 10;
        unit.tracks.get_mut(&1).unwrap().ng_count = 3;
        unit.reset();
        assert_eq!(unit, Unit::new(5));
    }
}
