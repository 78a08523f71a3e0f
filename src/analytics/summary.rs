//! Summary table types
//!
//! Plain, flat rows returned by the aggregation queries. Every type is
//! serializable so the presentation layer can hand it to a chart, a JSON
//! response or a CSV writer without reshaping.

use serde::Serialize;

use crate::dataset::{DataError, DayType, Field, Season, Weather, YearMonth};

/// Casual and registered rider sums for one group
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct UserTotals {
    pub casual: u64,
    pub registered: u64,
}

impl UserTotals {
    /// Fold in the counts of record `row`
    ///
    /// Fails without modifying the sums when either sum, or their
    /// combined total, would leave the `u64` range.
    pub fn add(&mut self, row: usize, casual: u64, registered: u64) -> Result<(), DataError> {
        let overflow = |field| DataError::CountOverflow { row, field };
        let casual = self
            .casual
            .checked_add(casual)
            .ok_or(overflow(Field::Casual))?;
        let registered = self
            .registered
            .checked_add(registered)
            .ok_or(overflow(Field::Registered))?;
        casual
            .checked_add(registered)
            .ok_or(overflow(Field::Total))?;

        self.casual = casual;
        self.registered = registered;
        Ok(())
    }

    /// Combined riders of both kinds, `None` on overflow
    pub fn total(&self) -> Option<u64> {
        self.casual.checked_add(self.registered)
    }
}

/// Total rentals for one season
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeasonTotal {
    pub season: Season,
    pub total: u64,
}

/// Record counts split by a boolean flag
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct FlagCounts {
    /// Records where the flag is not set
    pub no: u64,
    /// Records where the flag is set
    pub yes: u64,
}

impl FlagCounts {
    pub fn record(&mut self, flag: bool) {
        if flag {
            self.yes += 1;
        } else {
            self.no += 1;
        }
    }

    pub fn get(&self, flag: bool) -> u64 {
        if flag {
            self.yes
        } else {
            self.no
        }
    }

    pub fn total(&self) -> u64 {
        self.no + self.yes
    }
}

/// Daily record counts by holiday and by working-day status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct DayStatusCounts {
    pub holiday: FlagCounts,
    pub workingday: FlagCounts,
}

/// Casual and registered totals for one day type
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayTypeTotal {
    pub day_type: DayType,
    pub casual: u64,
    pub registered: u64,
}

/// Casual and registered totals keyed by day type
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct DayTypeTotals(pub Vec<DayTypeTotal>);

impl DayTypeTotals {
    pub fn get(&self, day_type: DayType) -> Option<&DayTypeTotal> {
        self.0.iter().find(|t| t.day_type == day_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayTypeTotal> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rider sums for one (day type, hour) pair
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HourlyTrendRow {
    pub day_type: DayType,
    pub hour: u8,
    pub casual: u64,
    pub registered: u64,
}

/// Casual and registered totals for one weather category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeatherTotal {
    pub weather: Weather,
    pub casual: u64,
    pub registered: u64,
}

/// Totals per weather category plus grand totals
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct WeatherTotals {
    pub categories: Vec<WeatherTotal>,
    pub total_casual: u64,
    pub total_registered: u64,
}

impl WeatherTotals {
    pub fn get(&self, weather: Weather) -> Option<&WeatherTotal> {
        self.categories.iter().find(|t| t.weather == weather)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Casual and registered totals for one calendar month
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub casual: u64,
    pub registered: u64,
}

impl MonthlyTotal {
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// One point of the continuous month-by-month growth series
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GrowthPoint {
    /// Zero-based position on the continuous axis
    pub position: usize,
    pub year: i32,
    pub month: u32,
    /// Display label, e.g. `2011-01`
    pub label: String,
    pub casual: u64,
    pub registered: u64,
}
