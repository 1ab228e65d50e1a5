//! Session error types. All crate errors converge here.

use stringer_config::ConfigError;
use stringer_core::errors::CoreError;
use stringer_store::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::EntrySession`] operations.
///
/// A blocked submission is not an error; see [`crate::SubmitOutcome`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unknown unit/track/history id, bad hour, or an invalid status change.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failed. In-memory state is left as it was before the write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be turned into a working session.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A submission ticket is outstanding; the snapshot is frozen until it
    /// is finished or cancelled.
    #[error("A submission is in flight; finish or cancel it first")]
    SubmitInFlight,
}
