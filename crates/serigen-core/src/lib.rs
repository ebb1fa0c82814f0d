//! Serigen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Serigen, a
//! generator of formatted number series such as invoice numbers and project
//! codes (`INV-2024-000042`).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Host application (web, jobs)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (NumberingService, SeriesGenerator)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (SeriesStore, RequestValidator)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    serigen-adapters (Infrastructure)    │
//! │ (InMemorySeriesStore, Standard...)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (FormatRenderer, WeekNumbering, Series) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use serigen_core::prelude::*;
//!
//! let series = SeriesConfig::new("ProjectCode", "001", "PRJ-{YYYY}-{####}");
//! let as_of = NaiveDate::from_ymd_opt(2024, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let request = GenerationRequest::new("ProjectCode", "001", as_of);
//!
//! let next = SeriesGenerator::default().generate(&request, &[series]).unwrap();
//! assert_eq!(next.last_value, "PRJ-2024-000001");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        NumberingService, SeriesGenerator,
        ports::{RequestValidator, SeriesStore},
    };
    pub use crate::domain::{
        CalendarWeekRule, FormatRenderer, GenerationError, GenerationRequest, SeriesConfig,
        SeriesKey, ValidationMessage, WeekNumbering,
    };
    pub use crate::error::{SerigenError, SerigenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
