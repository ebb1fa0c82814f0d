//! Application layer for Serigen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SeriesGenerator, NumberingService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Token rendering and
//! week numbering live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{DEFAULT_COMMIT_ATTEMPTS, NumberingService, SeriesGenerator};

// Re-export port traits (for adapter implementation)
pub use ports::{RequestValidator, SeriesStore};

pub use error::ApplicationError;
