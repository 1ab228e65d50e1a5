//! Entity structs for the hourly entry session.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! persisted snapshot and history records can be checked against a schema.

mod history;
mod snapshot;
mod track;
mod unit;
mod validation;

pub use history::HistoryEntry;
pub use snapshot::Snapshot;
pub use track::Track;
pub use unit::Unit;
pub use validation::{EntryProgress, ValidationIssue, ValidationSummary};
