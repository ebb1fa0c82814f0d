//! Series store adapters.

mod memory;

pub use memory::InMemorySeriesStore;
