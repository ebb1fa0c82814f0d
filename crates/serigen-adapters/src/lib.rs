//! Infrastructure adapters for Serigen.
//!
//! This crate implements the ports defined in `serigen-core::application::ports`
//! and owns the process-level concerns: settings and logging.

pub mod logging;
pub mod series_store;
pub mod settings;
pub mod validator;

// Re-export commonly used adapters
pub use logging::init_logging;
pub use series_store::InMemorySeriesStore;
pub use settings::{GeneratorSettings, LoggingSettings, Settings};
pub use validator::StandardRequestValidator;
