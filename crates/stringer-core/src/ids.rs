//! Storage key constants and history id helpers.
//!
//! Persisted records are addressed by `(entity, hour)` pairs flattened into a
//! single string key, e.g. `data-entry-14` for the 14:00 draft snapshot.

use crate::errors::CoreError;
use crate::limits::MAX_HOUR;

/// Entity prefix of the per-hour draft snapshot record.
pub const ENTITY_DATA_ENTRY: &str = "data-entry";

/// Key of the single history log record.
pub const ENTITY_ENTRY_HISTORY: &str = "entry-history";

/// Identifier of a history entry: milliseconds since the Unix epoch,
/// bumped when needed to stay strictly increasing.
pub type HistoryId = u64;

/// Build the storage key of the draft snapshot for `hour`.
#[must_use]
pub fn snapshot_key(hour: u8) -> String {
    format!("{ENTITY_DATA_ENTRY}-{hour}")
}

/// Check that `hour` is a valid hour of day.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `hour` is greater than 23.
pub fn check_hour(hour: u8) -> Result<u8, CoreError> {
    if hour > MAX_HOUR {
        return Err(CoreError::Validation(format!(
            "hour {hour} is outside 0..={MAX_HOUR}"
        )));
    }
    Ok(hour)
}

/// Next history id given the wall clock and the last id handed out.
///
/// Two submissions inside the same millisecond still get distinct ids.
#[must_use]
pub fn next_history_id(now_millis: u64, last: Option<HistoryId>) -> HistoryId {
    match last {
        Some(last) if now_millis <= last => last + 1,
        _ => now_millis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_key_format() {
        assert_eq!(snapshot_key(0), "data-entry-0");
        assert_eq!(snapshot_key(23), "data-entry-23");
    }

    #[test]
    fn hour_bounds() {
        assert_eq!(check_hour(23), Ok(23));
        assert!(matches!(check_hour(24), Err(CoreError::Validation(_))));
    }

    #[test]
    fn history_ids_are_strictly_increasing() {
        assert_eq!(next_history_id(1_000, None), 1_000);
        assert_eq!(next_history_id(1_000, Some(999)), 1_000);
        assert_eq!(next_history_id(1_000, Some(1_000)), 1_001);
        assert_eq!(next_history_id(900, Some(1_000)), 1_001);
    }
}
