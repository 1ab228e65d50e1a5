//! Threshold rules over an aggregated [`Snapshot`].
//!
//! Rules run per unit, in this order:
//! 1. no data at all: `required`, medium
//! 2. OK rate below the quality floor: `range`, high
//! 3. more strings than the outlier ceiling: `range`, medium
//! 4. track-wise only, a track counter above 999: `range`, high
//!
//! Rule 4 cannot fire for counters that came in through
//! [`crate::aggregation::set_track_value`]. It still catches tracks produced by
//! distributing a large unit-wise total, and snapshots loaded from storage.

use serde::Serialize;
use stringer_core::entities::{EntryProgress, Snapshot, Unit, ValidationIssue, ValidationSummary};
use stringer_core::enums::{EntryMode, IssueKind, Severity};
use stringer_core::limits::TRACK_COUNT_MAX;

/// Tunable thresholds of the rule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    /// Minimum OK rate in percent; strictly lower rates are an error.
    pub quality_floor_pct: f64,
    /// Strings per unit above which the count is flagged as suspicious.
    pub outlier_ceiling: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            quality_floor_pct: 80.0,
            outlier_ceiling: 500,
        }
    }
}

/// Result of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
    pub progress: EntryProgress,
}

impl ValidationReport {
    /// Issues that prevent submission.
    #[must_use]
    pub fn blocking_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity.blocks_submission())
            .count()
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocking_issue_count() > 0
    }

    /// Messages of medium-severity issues, carried into history on submit.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Medium)
            .map(|i| i.message.clone())
            .collect()
    }
}

/// Run every rule against `snapshot` and derive the summary counts.
#[must_use]
pub fn evaluate(snapshot: &Snapshot, mode: EntryMode, rules: &ValidationRules) -> ValidationReport {
    let mut issues = Vec::new();
    for unit in snapshot.units() {
        check_unit(unit, mode, rules, &mut issues);
    }

    let unit_count = snapshot.len();
    let completed = snapshot.completed_count();
    let summary = summarize_issues(&issues, unit_count, completed);

    tracing::debug!(
        %mode,
        issues = issues.len(),
        errors = summary.errors,
        warnings = summary.warnings,
        pending = summary.pending,
        "validation pass"
    );

    ValidationReport {
        issues,
        summary,
        progress: EntryProgress {
            completed,
            total: unit_count,
        },
    }
}

fn check_unit(unit: &Unit, mode: EntryMode, rules: &ValidationRules, out: &mut Vec<ValidationIssue>) {
    let total = u64::from(unit.total_ok) + u64::from(unit.total_ng);

    if total == 0 {
        out.push(issue(
            unit.id,
            None,
            IssueKind::Required,
            Severity::Medium,
            "No production data entered for this stringer".to_string(),
            "Enter OK and NG string counts",
        ));
    }

    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let rate = f64::from(unit.total_ok) / total as f64 * 100.0;
        if rate < rules.quality_floor_pct {
            out.push(issue(
                unit.id,
                None,
                IssueKind::Range,
                Severity::High,
                format!(
                    "Quality rate {rate:.1}% is below {}% threshold",
                    rules.quality_floor_pct
                ),
                "Review production process or verify data accuracy",
            ));
        }
    }

    if total > u64::from(rules.outlier_ceiling) {
        out.push(issue(
            unit.id,
            None,
            IssueKind::Range,
            Severity::Medium,
            "Production count seems unusually high".to_string(),
            "Verify data entry accuracy",
        ));
    }

    if mode == EntryMode::TrackWise {
        for track in unit.tracks.values() {
            if track.ok_count > TRACK_COUNT_MAX || track.ng_count > TRACK_COUNT_MAX {
                out.push(issue(
                    unit.id,
                    Some(track.id),
                    IssueKind::Range,
                    Severity::High,
                    format!("Track values exceed maximum limit of {TRACK_COUNT_MAX}"),
                    "Enter values between 0-999",
                ));
            }
        }
    }
}

fn issue(
    unit_id: u8,
    track_id: Option<u8>,
    kind: IssueKind,
    severity: Severity,
    message: String,
    suggestion: &str,
) -> ValidationIssue {
    ValidationIssue {
        unit_id,
        track_id,
        kind,
        severity,
        message,
        suggestion: Some(suggestion.to_string()),
    }
}

#[allow(clippy::cast_possible_wrap)]
fn summarize_issues(issues: &[ValidationIssue], unit_count: usize, completed: usize) -> ValidationSummary {
    ValidationSummary {
        passed: unit_count as i64 - issues.len() as i64,
        warnings: issues.iter().filter(|i| i.severity == Severity::Medium).count(),
        errors: issues.iter().filter(|i| i.severity == Severity::High).count(),
        pending: unit_count.saturating_sub(completed),
    }
}
