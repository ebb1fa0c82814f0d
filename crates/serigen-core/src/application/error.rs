//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business outcomes.
//! Business outcomes are `GenerationError` from `crate::domain`.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::SeriesKey;
use crate::error::ErrorCategory;

/// Errors that occur while talking to the series store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Store access failed (lock poisoned, etc.).
    #[error("Series store error")]
    StoreLockError,

    /// The record to update or commit is no longer in the store.
    #[error("Number series {id} not found")]
    SeriesNotFound { id: Uuid },

    /// Another series already uses this `(TypeOf, TypeValue)` key.
    #[error("Number series {key} already exists")]
    DuplicateSeries { key: SeriesKey },

    /// Concurrent generations kept changing the counter under us.
    #[error("Number series {key} changed concurrently {attempts} times, giving up")]
    CommitConflict { key: SeriesKey, attempts: u32 },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StoreLockError => vec![
                "The series store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::SeriesNotFound { id } => vec![
                format!("Series {} was removed while generating", id),
                "Reload the series list and try again".into(),
            ],
            Self::DuplicateSeries { key } => vec![
                format!("Edit the existing series {} instead", key),
                "Or choose a different type value".into(),
            ],
            Self::CommitConflict { .. } => vec![
                "Many numbers were requested for this series at once".into(),
                "Retry the request".into(),
                "Or raise generator.max_commit_attempts".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreLockError | Self::CommitConflict { .. } => ErrorCategory::Conflict,
            Self::SeriesNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateSeries { .. } => ErrorCategory::Validation,
        }
    }
}
