//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `serigen-adapters` crate provides implementations.

use uuid::Uuid;

use crate::domain::{GenerationRequest, SeriesConfig, ValidationMessage};
use crate::error::SerigenResult;

/// Port for series persistence.
///
/// Implemented by:
/// - `serigen_adapters::series_store::InMemorySeriesStore`
///
/// ## Design Notes
///
/// - `commit` is the only write used while generating. It must be atomic
///   with respect to other commits on the same record.
/// - Lookups return owned copies; nothing handed out aliases stored state.
#[cfg_attr(test, mockall::automock)]
pub trait SeriesStore: Send + Sync {
    /// All series whose `type_of` equals the given type.
    fn candidates(&self, type_of: &str) -> SerigenResult<Vec<SeriesConfig>>;

    /// Get a specific series by ID.
    fn get(&self, id: Uuid) -> SerigenResult<SeriesConfig>;

    /// List all series.
    fn list(&self) -> SerigenResult<Vec<SeriesConfig>>;

    /// Add a new series. Fails if its key is already taken.
    fn insert(&self, config: SeriesConfig) -> SerigenResult<()>;

    /// Replace an existing series definition.
    ///
    /// The stored counter state is kept; only `commit` advances it.
    fn update(&self, config: SeriesConfig) -> SerigenResult<()>;

    /// Remove a series.
    fn remove(&self, id: Uuid) -> SerigenResult<()>;

    /// Compare-and-swap the generation state of `updated.id`.
    ///
    /// Stores `updated` only if the stored record's generation state still
    /// equals `expected`'s. Returns `Ok(false)` when another writer got there
    /// first.
    fn commit(&self, expected: &SeriesConfig, updated: &SeriesConfig) -> SerigenResult<bool>;
}

/// Port for request validation.
///
/// Implemented by:
/// - `serigen_adapters::validator::StandardRequestValidator`
///
/// The generator runs without one when none is configured.
#[cfg_attr(test, mockall::automock)]
pub trait RequestValidator: Send + Sync {
    /// Check a request. `Err` carries one message per offending field.
    fn validate(&self, request: &GenerationRequest) -> Result<(), Vec<ValidationMessage>>;
}
