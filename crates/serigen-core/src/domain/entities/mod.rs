pub mod request;
pub mod series;

pub use request::{GenerationRequest, ValidationMessage};
pub use series::{COUNTER_LIMIT, GenerationState, SeriesConfig, SeriesKey};
