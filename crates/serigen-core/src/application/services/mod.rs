//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "issue the next invoice number".

pub mod generator;
pub mod numbering_service;

pub use generator::SeriesGenerator;
pub use numbering_service::{DEFAULT_COMMIT_ATTEMPTS, NumberingService};
