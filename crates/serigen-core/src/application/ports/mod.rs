//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `serigen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SeriesStore`: Series storage with optimistic commits
//!   - `RequestValidator`: Optional request checks before generation

pub mod output;

pub use output::{RequestValidator, SeriesStore};

#[cfg(test)]
pub use output::{MockRequestValidator, MockSeriesStore};
