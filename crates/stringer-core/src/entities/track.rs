use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CountField;

/// One of the parallel sub-lines of a stringer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Track {
    pub id: u8,
    pub ok_count: u32,
    pub ng_count: u32,
}

impl Track {
    /// A track with both counters at zero.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self {
            id,
            ok_count: 0,
            ng_count: 0,
        }
    }

    #[must_use]
    pub const fn get(&self, field: CountField) -> u32 {
        match field {
            CountField::Ok => self.ok_count,
            CountField::Ng => self.ng_count,
        }
    }

    pub const fn set(&mut self, field: CountField, value: u32) {
        match field {
            CountField::Ok => self.ok_count = value,
            CountField::Ng => self.ng_count = value,
        }
    }
}
