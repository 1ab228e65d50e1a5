//! # stringer-session
//!
//! The hourly entry session: a single-threaded controller that owns the live
//! snapshot, routes edits through `stringer-engine`, debounces validation
//! and autosave through an injected [`Scheduler`], and writes drafts and
//! history through an injected `stringer_store::EntryStore`.
//!
//! Destructive entry points are flagged by
//! `stringer_core::enums::SessionAction::requires_confirmation`; asking the
//! user is the host's job.

mod bootstrap;
mod controller;
mod error;
mod outcome;
pub mod scheduler;
mod settings;
mod state;
pub mod telemetry;

pub use bootstrap::{FileSession, open_store};
pub use controller::EntrySession;
pub use error::SessionError;
pub use outcome::{BeginSubmit, SubmitOutcome, SubmitReceipt, SubmitTicket, TickReport};
pub use scheduler::{ClockScheduler, DeferredTask, ManualScheduler, Scheduler, TaskHandle};
pub use settings::SessionSettings;
pub use state::SessionState;
