//! # stringer-core
//!
//! Core types, storage keys, and error types for Stringer.
//!
//! This crate provides the foundational types shared across all Stringer crates:
//! - Entity structs for the entry session (units, tracks, snapshots, history entries)
//! - Status enums, including the session state machine
//! - Fixed numeric limits (clamp ranges, strings per module)
//! - Storage key helpers for the persisted snapshot and history records
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod limits;
