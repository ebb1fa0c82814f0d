// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Serigen.
//!
//! This module contains pure number-series logic. Storage and request
//! validation are reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No ambient state**: dates and week rules are always passed in
//! - **Value entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod format;
pub mod week;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    COUNTER_LIMIT, GenerationRequest, GenerationState, SeriesConfig, SeriesKey,
    ValidationMessage,
};

pub use error::{DomainError, ErrorCategory, GenerationError};

pub use format::{FormatRenderer, Placeholder, find_placeholder};
pub use week::{CalendarWeekRule, WeekNumbering};

pub use validation::DomainValidator;
