//! # stringer-engine
//!
//! The arithmetic of an hourly entry: clamped edits and roll-ups
//! ([`aggregation`]), threshold rules over the rolled-up snapshot
//! ([`validation`]), and the per-unit summary a host renders
//! ([`summary`]).
//!
//! Everything here is synchronous and side-effect free apart from mutating
//! the snapshot it is handed.

pub mod aggregation;
pub mod summary;
pub mod validation;

pub use aggregation::{modules_for, quality_rate};
pub use summary::{EntrySummary, SummaryRow, summarize};
pub use validation::{ValidationReport, ValidationRules, evaluate};
