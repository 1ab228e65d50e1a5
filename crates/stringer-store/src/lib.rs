//! # stringer-store
//!
//! Persistence gateway for the entry session.
//!
//! Two records are kept, each as a whole JSON document under a string key:
//! - `data-entry-<hour>`: the draft [`Snapshot`] of an hour, overwritten on save
//! - `entry-history`: every submitted [`HistoryEntry`], newest first
//!
//! [`EntryStore`] is the interface the session controller consumes.
//! [`JsonStore`] implements it over any [`KeyValueBackend`]; [`MemoryBackend`]
//! and [`FileBackend`] are the two backends shipped here.
//!
//! Reads distinguish found (`Ok(Some(_))`), absent (`Ok(None)`) and failed
//! (`Err(_)`). Nothing is retried.
//!
//! [`Snapshot`]: stringer_core::entities::Snapshot
//! [`HistoryEntry`]: stringer_core::entities::HistoryEntry

pub mod backend;
pub mod error;
pub mod export;
pub mod gateway;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::StoreError;
pub use export::{HistoryExport, export_history};
pub use gateway::{EntryStore, JsonStore};
