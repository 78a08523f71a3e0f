//! Named aggregates
//!
//! Maps the stable names used by the CLI and the HTTP API (`seasons`,
//! `hourly`, ...) to the aggregation queries, and wraps their results in a
//! single `AggregateTable` that can be flattened into header + string rows.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::dataset::{AnalysisResult, Dataset};

use super::aggregate;
use super::summary::{
    DayStatusCounts, DayTypeTotals, GrowthPoint, HourlyTrendRow, MonthlyTotal, SeasonTotal,
    WeatherTotals,
};

/// One of the named aggregation queries
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AggregateKind {
    Seasons,
    DayStatus,
    DayType,
    Hourly,
    Weather,
    Monthly,
    Growth,
}

/// Unknown aggregate or view name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{name}', expected one of: {expected}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
    pub expected: String,
}

impl AggregateKind {
    pub fn all() -> &'static [AggregateKind] {
        &[
            AggregateKind::Seasons,
            AggregateKind::DayStatus,
            AggregateKind::DayType,
            AggregateKind::Hourly,
            AggregateKind::Weather,
            AggregateKind::Monthly,
            AggregateKind::Growth,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregateKind::Seasons => "seasons",
            AggregateKind::DayStatus => "day-status",
            AggregateKind::DayType => "day-type",
            AggregateKind::Hourly => "hourly",
            AggregateKind::Weather => "weather",
            AggregateKind::Monthly => "monthly",
            AggregateKind::Growth => "growth",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AggregateKind::Seasons => "Total rentals by season, highest first",
            AggregateKind::DayStatus => "Day counts by holiday and working-day status",
            AggregateKind::DayType => "Casual and registered totals by day type",
            AggregateKind::Hourly => "Hourly casual and registered sums by day type",
            AggregateKind::Weather => "Casual and registered totals by weather",
            AggregateKind::Monthly => "Casual and registered totals by year and month",
            AggregateKind::Growth => "Month-by-month growth series",
        }
    }

    /// Run the query against a dataset
    pub fn compute(&self, dataset: &Dataset) -> AnalysisResult<AggregateTable> {
        let daily = dataset.daily();
        Ok(match self {
            AggregateKind::Seasons => AggregateTable::Seasons(aggregate::totals_by_season(daily)?),
            AggregateKind::DayStatus => {
                AggregateTable::DayStatus(aggregate::counts_by_day_status(daily)?)
            }
            AggregateKind::DayType => {
                AggregateTable::DayType(aggregate::totals_by_day_type(daily)?)
            }
            AggregateKind::Hourly => {
                AggregateTable::Hourly(aggregate::hourly_trend_by_day_type(dataset.hourly())?)
            }
            AggregateKind::Weather => {
                AggregateTable::Weather(aggregate::totals_by_weather(daily)?)
            }
            AggregateKind::Monthly => {
                AggregateTable::Monthly(aggregate::totals_by_year_month(daily)?)
            }
            AggregateKind::Growth => AggregateTable::Growth(aggregate::growth_series(daily)?),
        })
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        AggregateKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownName {
                kind: "aggregate",
                name: s.to_string(),
                expected: AggregateKind::all()
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Result of one named aggregate
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "aggregate", content = "data", rename_all = "kebab-case")]
pub enum AggregateTable {
    Seasons(Vec<SeasonTotal>),
    DayStatus(DayStatusCounts),
    DayType(DayTypeTotals),
    Hourly(Vec<HourlyTrendRow>),
    Weather(WeatherTotals),
    Monthly(Vec<MonthlyTotal>),
    Growth(Vec<GrowthPoint>),
}

impl AggregateTable {
    pub fn kind(&self) -> AggregateKind {
        match self {
            AggregateTable::Seasons(_) => AggregateKind::Seasons,
            AggregateTable::DayStatus(_) => AggregateKind::DayStatus,
            AggregateTable::DayType(_) => AggregateKind::DayType,
            AggregateTable::Hourly(_) => AggregateKind::Hourly,
            AggregateTable::Weather(_) => AggregateKind::Weather,
            AggregateTable::Monthly(_) => AggregateKind::Monthly,
            AggregateTable::Growth(_) => AggregateKind::Growth,
        }
    }

    /// Whether the underlying query produced no groups
    pub fn is_empty(&self) -> bool {
        match self {
            AggregateTable::Seasons(rows) => rows.is_empty(),
            AggregateTable::DayStatus(counts) => counts.holiday.total() == 0,
            AggregateTable::DayType(totals) => totals.is_empty(),
            AggregateTable::Hourly(rows) => rows.is_empty(),
            AggregateTable::Weather(totals) => totals.is_empty(),
            AggregateTable::Monthly(rows) => rows.is_empty(),
            AggregateTable::Growth(rows) => rows.is_empty(),
        }
    }

    /// Column headers of the flattened table
    pub fn headers(&self) -> Vec<&'static str> {
        match self {
            AggregateTable::Seasons(_) => vec!["season", "total"],
            AggregateTable::DayStatus(_) => vec!["status", "value", "days"],
            AggregateTable::DayType(_) => vec!["day_type", "casual", "registered"],
            AggregateTable::Hourly(_) => vec!["day_type", "hour", "casual", "registered"],
            AggregateTable::Weather(_) => vec!["weather", "casual", "registered"],
            AggregateTable::Monthly(_) => vec!["year", "month", "casual", "registered"],
            AggregateTable::Growth(_) => {
                vec!["position", "label", "year", "month", "casual", "registered"]
            }
        }
    }

    /// Flattened rows, one string per header column
    ///
    /// Weather grand totals are appended as a final `Total` row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            AggregateTable::Seasons(rows) => rows
                .iter()
                .map(|r| vec![r.season.to_string(), r.total.to_string()])
                .collect(),
            AggregateTable::DayStatus(counts) => {
                if counts.holiday.total() == 0 {
                    return Vec::new();
                }
                [("holiday", &counts.holiday), ("workingday", &counts.workingday)]
                    .into_iter()
                    .flat_map(|(status, flags)| {
                        [false, true].into_iter().map(move |value| {
                            vec![
                                status.to_string(),
                                u8::from(value).to_string(),
                                flags.get(value).to_string(),
                            ]
                        })
                    })
                    .collect()
            }
            AggregateTable::DayType(totals) => totals
                .iter()
                .map(|r| {
                    vec![
                        r.day_type.to_string(),
                        r.casual.to_string(),
                        r.registered.to_string(),
                    ]
                })
                .collect(),
            AggregateTable::Hourly(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.day_type.to_string(),
                        r.hour.to_string(),
                        r.casual.to_string(),
                        r.registered.to_string(),
                    ]
                })
                .collect(),
            AggregateTable::Weather(totals) => {
                let mut rows: Vec<Vec<String>> = totals
                    .categories
                    .iter()
                    .map(|r| {
                        vec![
                            r.weather.to_string(),
                            r.casual.to_string(),
                            r.registered.to_string(),
                        ]
                    })
                    .collect();
                if !rows.is_empty() {
                    rows.push(vec![
                        "Total".to_string(),
                        totals.total_casual.to_string(),
                        totals.total_registered.to_string(),
                    ]);
                }
                rows
            }
            AggregateTable::Monthly(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.year.to_string(),
                        r.month.to_string(),
                        r.casual.to_string(),
                        r.registered.to_string(),
                    ]
                })
                .collect(),
            AggregateTable::Growth(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.position.to_string(),
                        r.label.clone(),
                        r.year.to_string(),
                        r.month.to_string(),
                        r.casual.to_string(),
                        r.registered.to_string(),
                    ]
                })
                .collect(),
        }
    }
}
