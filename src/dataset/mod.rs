//! Bike-Sharing Dataset
//!
//! This module provides the read-only data context the engine works on:
//!
//! - **types**: Field names and categorical enumerations
//! - **table**: Row-oriented record sets with validating typed access
//! - **loader**: CSV loading with header alias resolution
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use bikeshare::dataset::Dataset;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load(Path::new("day_df.csv"), Path::new("hour_df.csv"))?;
//!     println!("{} daily records", dataset.daily().len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod table;
pub mod types;

pub use error::{AnalysisError, AnalysisResult, DataError};
pub use loader::{load_daily, load_hourly, RecordLoader};
pub use table::{Counts, RecordSet, RecordView, Row};
pub use types::{DayType, Field, RecordKind, Season, Weather, YearMonth};

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Both record sets, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct Dataset {
    daily: RecordSet,
    hourly: RecordSet,
}

/// Size and date coverage of a dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub daily_records: usize,
    pub hourly_records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl Dataset {
    /// Build a dataset from already-loaded record sets
    pub fn new(daily: RecordSet, hourly: RecordSet) -> Self {
        if daily.kind() != RecordKind::Daily || hourly.kind() != RecordKind::Hourly {
            tracing::warn!(
                daily_kind = %daily.kind(),
                hourly_kind = %hourly.kind(),
                "Record sets passed with unexpected granularity"
            );
        }
        Self { daily, hourly }
    }

    /// Load both record sets from CSV files
    pub fn load(daily_path: &Path, hourly_path: &Path) -> AnalysisResult<Self> {
        let daily = load_daily(daily_path)?;
        let hourly = load_hourly(hourly_path)?;
        Ok(Self::new(daily, hourly))
    }

    pub fn daily(&self) -> &RecordSet {
        &self.daily
    }

    pub fn hourly(&self) -> &RecordSet {
        &self.hourly
    }

    /// Record counts and the date range covered by the daily records
    pub fn summary(&self) -> AnalysisResult<DatasetSummary> {
        let mut range: Option<(NaiveDate, NaiveDate)> = None;
        for record in self.daily.records() {
            let date = record.date()?;
            range = Some(match range {
                Some((first, last)) => (first.min(date), last.max(date)),
                None => (date, date),
            });
        }

        Ok(DatasetSummary {
            daily_records: self.daily.len(),
            hourly_records: self.hourly.len(),
            first_date: range.map(|(first, _)| first),
            last_date: range.map(|(_, last)| last),
        })
    }
}
