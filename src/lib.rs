//! # Bike-Sharing Insights
//!
//! Descriptive analytics over a bike-sharing rental dataset: daily and
//! hourly records are grouped into small summary tables, and each table is
//! paired with plain-sentence findings for a dashboard.
//!
//! ## Features
//!
//! - **Validated records**: Rows are checked lazily, errors carry row and field
//! - **Deterministic aggregates**: Same input, same rows in the same order
//! - **Narrative insights**: Rankings, shares and growth stated in words
//! - **Two surfaces**: CLI (`bikeshare`) and read-only REST API (`bikeshare-api`)
//!
//! ## Modules
//!
//! - [`dataset`]: Record sets, CSV loading and typed record access
//! - [`analytics`]: Aggregation queries and insight generation
//! - [`report`]: Dashboard views and output formatting
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bikeshare::dataset::Dataset;
//! use bikeshare::report::{build_view, render_view, OutputFormat, View};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load both record sets
//!     let dataset = Dataset::load(Path::new("day_df.csv"), Path::new("hour_df.csv"))?;
//!
//!     // Build a page and print it as a text table
//!     let report = build_view(View::SeasonalRentals, &dataset)?;
//!     print!("{}", render_view(&report, OutputFormat::Table)?);
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod report;

// Re-export top-level types for convenience
pub use dataset::{
    AnalysisError, AnalysisResult, DataError, Dataset, DatasetSummary, DayType, Field,
    RecordKind, RecordSet, Season, Weather,
};

pub use analytics::{AggregateKind, AggregateTable};

pub use report::{build_view, OutputFormat, View, ViewReport};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DataConfig, LoggingConfig};
