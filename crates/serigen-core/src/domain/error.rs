// ============================================================================
// domain/error.rs - DOMAIN AND GENERATION ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::entities::{SeriesKey, ValidationMessage};

/// Root domain error type.
///
/// Raised when a series configuration or a rule value is malformed. These
/// are authoring mistakes, caught before anything is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid series configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Format '{format}' contains {count} counter placeholders, at most one is allowed")]
    MultiplePlaceholders { format: String, count: usize },

    #[error("Unknown week rule '{0}'")]
    UnknownWeekRule(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig { field, reason } => vec![
                format!("Field '{}' {}", field, reason),
                "Correct the series configuration and save it again".into(),
            ],
            Self::MultiplePlaceholders { .. } => vec![
                "Use a single run of '#' characters, e.g. INV-{YYYY}-{#####}".into(),
            ],
            Self::UnknownWeekRule(_) => vec![
                "Supported rules: first-day, first-full-week, first-four-day-week".into(),
            ],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

/// The four expected outcomes of a failed generation.
///
/// None of these are faults. The caller decides whether to show the message
/// to a user or retry with different input. The rendered message carries the
/// requested `TypeOf - TypeValue` key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request was rejected by the configured validator.
    #[error("Invalid number series request: {}", join_messages(.messages))]
    ValidationFailed { messages: Vec<ValidationMessage> },

    /// No exact or default number series exists for the key.
    #[error("No number series configured for {key}")]
    ConfigurationNotFound { key: SeriesKey },

    /// The matching number series is disabled.
    #[error("Number series {key} is disabled")]
    ConfigurationDisabled { key: SeriesKey },

    /// The next counter would pass the configured ceiling.
    ///
    /// `attempted` is the counter value the policy produced; it was not
    /// committed anywhere.
    #[error("Number series {key} reached its maximum ({attempted} > {maximum})")]
    MaximumExceeded {
        key: SeriesKey,
        attempted: u64,
        maximum: u64,
    },
}

impl GenerationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed { messages } => messages
                .iter()
                .map(|m| m.to_string())
                .chain(std::iter::once("Correct the request and try again".into()))
                .collect(),
            Self::ConfigurationNotFound { key } => vec![
                format!("Create a number series for {}", key),
                format!(
                    "Or add a default series for '{}' with an empty type value",
                    key.type_of()
                ),
            ],
            Self::ConfigurationDisabled { key } => {
                vec![format!("Enable the number series {} to issue numbers", key)]
            }
            Self::MaximumExceeded { key, .. } => vec![
                format!("Raise the maximum of number series {}", key),
                "Or enable automatic reset with a date token in the format".into(),
            ],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationFailed { .. } => ErrorCategory::Validation,
            Self::ConfigurationNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigurationDisabled { .. } | Self::MaximumExceeded { .. } => {
                ErrorCategory::Exhausted
            }
        }
    }
}

fn join_messages(messages: &[ValidationMessage]) -> String {
    messages
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Exhausted,
}
