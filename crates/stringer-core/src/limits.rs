//! Fixed numeric limits of the entry model.
//!
//! The clamp ranges double as the advisory `min`/`max` bounds of the input
//! surfaces, so they are constants rather than configuration.

/// Number of stringers on the line when nothing else is configured.
pub const DEFAULT_UNIT_COUNT: u8 = 6;

/// Tracks per stringer. Distribution assumes exactly two.
pub const TRACKS_PER_UNIT: u8 = 2;

/// Upper clamp for a single track counter.
pub const TRACK_COUNT_MAX: u32 = 999;

/// Upper clamp for a unit total entered in unit-wise mode.
pub const UNIT_TOTAL_MAX: u32 = 9999;

/// Largest track counter that distribution can produce from a clamped unit
/// total: track 1 takes half plus the remainder.
#[allow(clippy::cast_lossless)]
pub const DISTRIBUTED_TRACK_MAX: u32 = UNIT_TOTAL_MAX - UNIT_TOTAL_MAX / TRACKS_PER_UNIT as u32;

/// OK strings that make up one module.
pub const STRINGS_PER_MODULE: u32 = 12;

/// Highest valid hour key.
pub const MAX_HOUR: u8 = 23;
