use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CountField;

use super::Unit;

/// The complete entry state of one hour, keyed by unit id.
///
/// Serializes transparently as the unit map, e.g.
/// `{"1": {"id": 1, "total_ok": 0, ...}, "2": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct Snapshot {
    units: BTreeMap<u8, Unit>,
}

impl Snapshot {
    /// A snapshot with units `1..=unit_count`, all zeroed.
    #[must_use]
    pub fn new(unit_count: u8) -> Self {
        Self {
            units: (1..=unit_count).map(|id| (id, Unit::new(id))).collect(),
        }
    }

    #[must_use]
    pub fn unit(&self, id: u8) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: u8) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Units in ascending id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units with any OK or NG count.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.units().filter(|u| u.has_data()).count()
    }

    #[must_use]
    pub fn total_ok(&self) -> u32 {
        self.units().fold(0, |acc: u32, u| acc.saturating_add(u.total_ok))
    }

    #[must_use]
    pub fn total_ng(&self) -> u32 {
        self.units().fold(0, |acc: u32, u| acc.saturating_add(u.total_ng))
    }

    /// Sum of per-unit module counts (each floored separately).
    #[must_use]
    pub fn total_modules(&self) -> u32 {
        self.units().fold(0, |acc: u32, u| acc.saturating_add(u.modules()))
    }

    /// Clamp the counters of every unit, see [`Unit::clamp_counters`].
    /// Returns how many counters were changed.
    pub fn clamp_counters(&mut self) -> usize {
        self.units_mut().map(Unit::clamp_counters).sum()
    }

    /// Whether every unit's totals equal its track sums.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.units().all(|u| {
            u.total_ok == u.track_sum(CountField::Ok) && u.total_ng == u.track_sum(CountField::Ng)
        })
    }
}
