//! Per-unit entry summary and overall roll-up for display.

use serde::Serialize;
use stringer_core::entities::{Snapshot, ValidationIssue};
use stringer_core::enums::{RowStatus, Severity};

use crate::aggregation::{modules_for, quality_rate};

/// One row of the entry summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub unit_id: u8,
    pub total_ok: u32,
    pub total_ng: u32,
    pub modules: u32,
    pub quality_rate: u32,
    pub status: RowStatus,
}

/// Rows plus line-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub rows: Vec<SummaryRow>,
    pub total_ok: u32,
    pub total_ng: u32,
    pub total_modules: u32,
    pub completed: usize,
    pub overall_quality: u32,
    /// Advisory: no blocking issue and at least one unit has data.
    /// Submission itself only checks for blocking issues.
    pub can_submit: bool,
}

/// Build the summary of `snapshot` given the issues of the latest pass.
#[must_use]
pub fn summarize(snapshot: &Snapshot, issues: &[ValidationIssue]) -> EntrySummary {
    let rows: Vec<SummaryRow> = snapshot
        .units()
        .map(|unit| {
            let status = if issues.iter().any(|i| i.unit_id == unit.id) {
                RowStatus::Error
            } else if unit.has_data() {
                RowStatus::Complete
            } else {
                RowStatus::Pending
            };
            SummaryRow {
                unit_id: unit.id,
                total_ok: unit.total_ok,
                total_ng: unit.total_ng,
                modules: modules_for(unit),
                quality_rate: quality_rate(unit.total_ok, unit.total_ng),
                status,
            }
        })
        .collect();

    let total_ok = snapshot.total_ok();
    let total_ng = snapshot.total_ng();
    let completed = snapshot.completed_count();
    let has_blocking = issues.iter().any(|i| i.severity == Severity::High);

    EntrySummary {
        rows,
        total_ok,
        total_ng,
        total_modules: snapshot.total_modules(),
        completed,
        overall_quality: quality_rate(total_ok, total_ng),
        can_submit: !has_blocking && completed > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationRules, evaluate};
    use pretty_assertions::assert_eq;
    use stringer_core::enums::EntryMode;

    #[test]
    fn rows_reflect_issues_and_data() {
        let mut snapshot = Snapshot::new(3);
        {
            let unit = snapshot.unit_mut(1).unwrap();
            unit.total_ok = 144;
            unit.total_ng = 6;
        }
        {
            let unit = snapshot.unit_mut(2).unwrap();
            unit.total_ok = 60;
            unit.total_ng = 40;
        }
        let report = evaluate(&snapshot, EntryMode::UnitWise, &ValidationRules::default());
        let summary = summarize(&snapshot, &report.issues);

        let statuses: Vec<_> = summary.rows.iter().map(|r| r.status).collect();
        // unit 3 is empty, so it carries a required issue and shows as error
        assert_eq!(
            statuses,
            vec![RowStatus::Complete, RowStatus::Error, RowStatus::Error]
        );
        assert_eq!(summary.rows[0].modules, 12);
        assert_eq!(summary.rows[0].quality_rate, 96);
        assert_eq!(summary.total_ok, 204);
        assert_eq!(summary.total_ng, 46);
        assert_eq!(summary.total_modules, 17);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.overall_quality, 82);
        assert!(!summary.can_submit);
    }

    #[test]
    fn pending_without_issues() {
        let snapshot = Snapshot::new(2);
        let summary = summarize(&snapshot, &[]);
        assert!(summary.rows.iter().all(|r| r.status == RowStatus::Pending));
        assert_eq!(summary.overall_quality, 0);
        assert!(!summary.can_submit);
    }
}
