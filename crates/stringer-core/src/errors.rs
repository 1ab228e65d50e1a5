//! Cross-cutting error types for Stringer.
//!
//! Domain-specific errors (`StoreError`, `ConfigError`) live in their own
//! crates. `SessionError` in `stringer-session` is where they converge.

use thiserror::Error;

/// Errors that can be raised by any Stringer crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (out-of-range hour, malformed identifiers).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing unit.
    #[must_use]
    pub fn unit_not_found(unit_id: u8) -> Self {
        Self::NotFound {
            entity_type: "unit".to_string(),
            id: unit_id.to_string(),
        }
    }

    /// Shorthand for a missing track within a unit.
    #[must_use]
    pub fn track_not_found(unit_id: u8, track_id: u8) -> Self {
        Self::NotFound {
            entity_type: "track".to_string(),
            id: format!("{unit_id}/{track_id}"),
        }
    }

    /// Shorthand for a missing history entry.
    #[must_use]
    pub fn history_not_found(id: u64) -> Self {
        Self::NotFound {
            entity_type: "history_entry".to_string(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_the_entity() {
        assert_eq!(
            CoreError::unit_not_found(7).to_string(),
            "Entity not found: unit 7"
        );
        assert_eq!(
            CoreError::track_not_found(2, 3).to_string(),
            "Entity not found: track 2/3"
        );
        assert_eq!(
            CoreError::history_not_found(1_700_000_000_000).to_string(),
            "Entity not found: history_entry 1700000000000"
        );
    }
}
