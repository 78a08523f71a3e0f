//! Aggregation Engine
//!
//! Pure functions from the loaded record sets to small summary tables:
//!
//! - **aggregate**: The seven grouping queries
//! - **summary**: Output row types
//! - **catalog**: Stable names for the queries and a uniform table wrapper
//! - **insights**: Narrative bullet points derived from the tables
//!
//! # Pipeline
//!
//! ```text
//! RecordSet → validate row → group (BTreeMap) → sum → ordered summary rows
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use bikeshare::analytics::{totals_by_season, season_insights};
//!
//! let seasons = totals_by_season(dataset.daily())?;
//! for line in season_insights(&seasons)? {
//!     println!("- {line}");
//! }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod insights;
pub mod summary;

pub use aggregate::{
    counts_by_day_status, growth_series, hourly_trend_by_day_type, totals_by_day_type,
    totals_by_season, totals_by_weather, totals_by_year_month,
};
pub use catalog::{AggregateKind, AggregateTable, UnknownName};
pub use insights::{
    day_status_insights, day_type_insights, format_count, growth_insights, hourly_insights,
    season_insights, weather_insights, yearly_insights,
};
pub use summary::{
    DayStatusCounts, DayTypeTotal, DayTypeTotals, FlagCounts, GrowthPoint, HourlyTrendRow,
    MonthlyTotal, SeasonTotal, UserTotals, WeatherTotal, WeatherTotals,
};
