//! Request validator adapters.

mod standard;

pub use standard::{PROJECT_CODE, StandardRequestValidator};
