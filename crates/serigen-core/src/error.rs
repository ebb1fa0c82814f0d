//! Unified error handling for Serigen Core.
//!
//! This module provides a unified error type that wraps domain, generation
//! and application errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, GenerationError};

/// Root error type for Serigen Core operations.
///
/// This enum wraps all possible errors that can occur when using serigen-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerigenError {
    /// Malformed series configuration or rule value.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Expected business outcome of a generation (not found, disabled, ...).
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Errors from the application layer (store access, commit races).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SerigenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Generation(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Serigen".into(),
                "Please report this issue at: https://github.com/cosecruz/serigen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Generation(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Exhausted => ErrorCategory::Exhausted,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Generation outcomes are never retried here; only store contention is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError)
                | Self::Application(ApplicationError::CommitConflict { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// The series cannot issue numbers (disabled or at its maximum).
    Exhausted,
    Conflict,
    Internal,
}

/// Convenient result type alias.
pub type SerigenResult<T> = Result<T, SerigenError>;
