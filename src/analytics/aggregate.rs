//! Aggregation queries
//!
//! Each query makes a single pass over a record set, validates every
//! contributing record (closed enumerations, totals invariant, hour range)
//! and folds it into a `BTreeMap` keyed by the grouping columns, so output
//! order never depends on input order.
//!
//! An empty record set is not an error here: the query returns an empty
//! table and the caller decides how to present "no data".

use std::collections::BTreeMap;

use crate::dataset::{
    AnalysisResult, DataError, DayType, Field, RecordSet, Season, Weather, YearMonth,
};

use super::summary::{
    DayStatusCounts, DayTypeTotal, DayTypeTotals, GrowthPoint, HourlyTrendRow, MonthlyTotal,
    SeasonTotal, UserTotals, WeatherTotal, WeatherTotals,
};

fn skip_empty(records: &RecordSet, query: &'static str) -> bool {
    if records.is_empty() {
        tracing::debug!(kind = %records.kind(), query, "Record set is empty, returning empty table");
        true
    } else {
        false
    }
}

/// Total rentals per season, highest first
///
/// Ties keep the declared season order (Spring, Summer, Fall, Winter).
pub fn totals_by_season(daily: &RecordSet) -> AnalysisResult<Vec<SeasonTotal>> {
    if skip_empty(daily, "totals_by_season") {
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<Season, u64> = BTreeMap::new();
    for record in daily.records() {
        let season = record.season()?;
        let counts = record.counts()?;
        let sum = groups.entry(season).or_default();
        *sum = sum.checked_add(counts.total).ok_or(DataError::CountOverflow {
            row: record.index(),
            field: Field::Total,
        })?;
    }

    let mut totals: Vec<SeasonTotal> = groups
        .into_iter()
        .map(|(season, total)| SeasonTotal { season, total })
        .collect();
    // Stable sort over the enum-ordered groups keeps ties deterministic
    totals.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(totals)
}

/// Number of daily records per holiday flag and per working-day flag
pub fn counts_by_day_status(daily: &RecordSet) -> AnalysisResult<DayStatusCounts> {
    let mut counts = DayStatusCounts::default();
    if skip_empty(daily, "counts_by_day_status") {
        return Ok(counts);
    }

    for record in daily.records() {
        record.counts()?;
        counts.holiday.record(record.holiday()?);
        counts.workingday.record(record.workingday()?);
    }

    Ok(counts)
}

/// Casual and registered totals per day type
pub fn totals_by_day_type(daily: &RecordSet) -> AnalysisResult<DayTypeTotals> {
    if skip_empty(daily, "totals_by_day_type") {
        return Ok(DayTypeTotals::default());
    }

    let mut groups: BTreeMap<DayType, UserTotals> = BTreeMap::new();
    for record in daily.records() {
        let day_type = record.day_type()?;
        let counts = record.counts()?;
        groups
            .entry(day_type)
            .or_default()
            .add(record.index(), counts.casual, counts.registered)?;
    }

    Ok(DayTypeTotals(
        groups
            .into_iter()
            .map(|(day_type, totals)| DayTypeTotal {
                day_type,
                casual: totals.casual,
                registered: totals.registered,
            })
            .collect(),
    ))
}

/// Casual and registered sums per (day type, hour)
///
/// Hours with no hourly records are omitted rather than reported as zero,
/// so a missing hour is never confused with an hour without rentals.
pub fn hourly_trend_by_day_type(hourly: &RecordSet) -> AnalysisResult<Vec<HourlyTrendRow>> {
    if skip_empty(hourly, "hourly_trend_by_day_type") {
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<(DayType, u8), UserTotals> = BTreeMap::new();
    for record in hourly.records() {
        let day_type = record.day_type()?;
        let hour = record.hour()?;
        let counts = record.counts()?;
        groups
            .entry((day_type, hour))
            .or_default()
            .add(record.index(), counts.casual, counts.registered)?;
    }

    Ok(groups
        .into_iter()
        .map(|((day_type, hour), totals)| HourlyTrendRow {
            day_type,
            hour,
            casual: totals.casual,
            registered: totals.registered,
        })
        .collect())
}

/// Casual and registered totals per weather category, with grand totals
///
/// Categories are listed from best to worst weather; categories absent
/// from the data are omitted.
pub fn totals_by_weather(daily: &RecordSet) -> AnalysisResult<WeatherTotals> {
    if skip_empty(daily, "totals_by_weather") {
        return Ok(WeatherTotals::default());
    }

    let mut groups: BTreeMap<Weather, UserTotals> = BTreeMap::new();
    let mut grand = UserTotals::default();
    for record in daily.records() {
        let weather = record.weather()?;
        let counts = record.counts()?;
        grand.add(record.index(), counts.casual, counts.registered)?;
        groups
            .entry(weather)
            .or_default()
            .add(record.index(), counts.casual, counts.registered)?;
    }

    let categories: Vec<WeatherTotal> = groups
        .into_iter()
        .map(|(weather, totals)| WeatherTotal {
            weather,
            casual: totals.casual,
            registered: totals.registered,
        })
        .collect();

    Ok(WeatherTotals {
        total_casual: grand.casual,
        total_registered: grand.registered,
        categories,
    })
}

/// Casual and registered totals per calendar month, in chronological order
///
/// Year and month are derived from each record's date. Months absent from
/// the data are not filled in.
pub fn totals_by_year_month(daily: &RecordSet) -> AnalysisResult<Vec<MonthlyTotal>> {
    if skip_empty(daily, "totals_by_year_month") {
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<YearMonth, UserTotals> = BTreeMap::new();
    for record in daily.records() {
        let bucket = record.year_month()?;
        let counts = record.counts()?;
        groups
            .entry(bucket)
            .or_default()
            .add(record.index(), counts.casual, counts.registered)?;
    }

    Ok(groups
        .into_iter()
        .map(|(bucket, totals)| MonthlyTotal {
            year: bucket.year,
            month: bucket.month,
            casual: totals.casual,
            registered: totals.registered,
        })
        .collect())
}

/// Month-by-month totals as one continuous, zero-indexed series
pub fn growth_series(daily: &RecordSet) -> AnalysisResult<Vec<GrowthPoint>> {
    Ok(totals_by_year_month(daily)?
        .into_iter()
        .enumerate()
        .map(|(position, month)| GrowthPoint {
            position,
            label: month.year_month().to_string(),
            year: month.year,
            month: month.month,
            casual: month.casual,
            registered: month.registered,
        })
        .collect())
}
