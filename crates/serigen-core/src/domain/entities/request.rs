use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::SeriesKey;

/// A caller's ask for the next number of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub type_of: String,
    pub type_value: String,
    /// Point in time used to render date tokens.
    pub as_of: NaiveDateTime,
}

impl GenerationRequest {
    pub fn new(
        type_of: impl Into<String>,
        type_value: impl Into<String>,
        as_of: NaiveDateTime,
    ) -> Self {
        Self {
            type_of: type_of.into(),
            type_value: type_value.into(),
            as_of,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.type_of.clone(), self.type_value.clone())
    }

    /// Lookup form: type trimmed, type value trimmed and upper-cased, the
    /// same canonical form [`super::SeriesConfig::normalized`] stores.
    pub fn normalized(mut self) -> Self {
        self.type_of = self.type_of.trim().to_string();
        self.type_value = self.type_value.trim().to_uppercase();
        self
    }
}

/// One field-level complaint produced by a request validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub field: String,
    pub message: String,
}

impl ValidationMessage {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
