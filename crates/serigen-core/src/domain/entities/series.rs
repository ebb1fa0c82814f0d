use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound for every numeric field of a stored series.
pub const COUNTER_LIMIT: u64 = 999_999_999;

/// Composite key of a number series: `(TypeOf, TypeValue)`.
///
/// An empty `type_value` marks the default series for its `type_of`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    type_of: String,
    type_value: String,
}

impl SeriesKey {
    pub fn new(type_of: impl Into<String>, type_value: impl Into<String>) -> Self {
        Self {
            type_of: type_of.into(),
            type_value: type_value.into(),
        }
    }

    pub fn type_of(&self) -> &str {
        &self.type_of
    }

    pub fn type_value(&self) -> &str {
        &self.type_value
    }

    /// `true` for the fallback series of a type.
    pub fn is_default(&self) -> bool {
        self.type_value.is_empty()
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.type_of, self.type_value)
    }
}

/// A persisted number series definition together with its generation state.
///
/// Created by an administrative layer with an empty state. Each successful
/// generation produces a copy with `last_counter`, `last_value` and
/// `last_prefix` advanced; persisting that copy is the store's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub id: Uuid,
    pub type_of: String,
    pub type_value: String,
    pub format: String,
    pub start_counter: u64,
    pub increment: u64,
    pub maximum: u64,
    pub automatic_reset: bool,
    pub is_disabled: bool,
    pub last_counter: u64,
    pub last_value: String,
    pub last_prefix: String,
    pub description: Option<String>,
}

impl SeriesConfig {
    /// Create a fresh series with default bounds (start 1, step 1).
    pub fn new(
        type_of: impl Into<String>,
        type_value: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_of: type_of.into(),
            type_value: type_value.into(),
            format: format.into(),
            start_counter: 1,
            increment: 1,
            maximum: COUNTER_LIMIT,
            automatic_reset: false,
            is_disabled: false,
            last_counter: 0,
            last_value: String::new(),
            last_prefix: String::new(),
            description: None,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.type_of.clone(), self.type_value.clone())
    }

    pub fn matches(&self, type_of: &str, type_value: &str) -> bool {
        self.type_of == type_of && self.type_value == type_value
    }

    pub fn with_bounds(mut self, start_counter: u64, increment: u64, maximum: u64) -> Self {
        self.start_counter = start_counter;
        self.increment = increment;
        self.maximum = maximum;
        self
    }

    pub fn with_automatic_reset(mut self, automatic_reset: bool) -> Self {
        self.automatic_reset = automatic_reset;
        self
    }

    pub fn with_disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    pub fn with_state(
        mut self,
        last_counter: u64,
        last_value: impl Into<String>,
        last_prefix: impl Into<String>,
    ) -> Self {
        self.last_counter = last_counter;
        self.last_value = last_value.into();
        self.last_prefix = last_prefix.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Canonical stored form: text trimmed, type value upper-cased.
    pub fn normalized(mut self) -> Self {
        self.type_of = self.type_of.trim().to_string();
        self.type_value = self.type_value.trim().to_uppercase();
        self.format = self.format.trim().to_string();
        self.last_prefix = self.last_prefix.trim().to_string();
        self.last_value = self.last_value.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    /// Snapshot of the mutable counter fields, used for optimistic commits.
    pub fn generation_state(&self) -> GenerationState {
        GenerationState {
            last_counter: self.last_counter,
            last_value: self.last_value.clone(),
            last_prefix: self.last_prefix.clone(),
        }
    }
}

/// The part of a [`SeriesConfig`] that generation mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationState {
    pub last_counter: u64,
    pub last_value: String,
    pub last_prefix: String,
}
