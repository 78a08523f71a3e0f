//! Core data types for the bike-sharing dataset
//!
//! This module defines the closed vocabularies the records are made of:
//! - `Field`: canonical column names and their accepted header aliases
//! - `Season`, `Weather` and `DayType`: categorical enumerations
//! - `YearMonth`: calendar bucket derived from a record's date

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a record set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// One row per calendar day
    Daily,
    /// One row per (day, hour) pair
    Hourly,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Daily => write!(f, "daily"),
            RecordKind::Hourly => write!(f, "hourly"),
        }
    }
}

/// Canonical column of a record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Datetime,
    Season,
    Holiday,
    Workingday,
    Weather,
    Casual,
    Registered,
    Total,
    Hour,
}

impl Field {
    /// Get all fields in column order
    pub fn all() -> &'static [Field] {
        &[
            Field::Datetime,
            Field::Season,
            Field::Holiday,
            Field::Workingday,
            Field::Weather,
            Field::Casual,
            Field::Registered,
            Field::Total,
            Field::Hour,
        ]
    }

    /// Canonical column name
    pub fn name(&self) -> &'static str {
        match self {
            Field::Datetime => "datetime",
            Field::Season => "season",
            Field::Holiday => "holiday",
            Field::Workingday => "workingday",
            Field::Weather => "weather",
            Field::Casual => "casual",
            Field::Registered => "registered",
            Field::Total => "count",
            Field::Hour => "hour",
        }
    }

    /// Header spellings accepted for this field (lowercase)
    ///
    /// Covers both the cleaned dashboard files (`Datetime`, `Count`, ...)
    /// and the raw UCI release (`dteday`, `weathersit`, `cnt`, `hr`).
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Datetime => &["datetime", "dteday", "date"],
            Field::Season => &["season"],
            Field::Holiday => &["holiday"],
            Field::Workingday => &["workingday", "working_day"],
            Field::Weather => &["weather", "weathersit"],
            Field::Casual => &["casual", "casual_count"],
            Field::Registered => &["registered", "registered_count"],
            Field::Total => &["count", "cnt", "total", "total_count"],
            Field::Hour => &["hour", "hr"],
        }
    }

    /// Resolve a CSV header to a canonical field
    pub fn from_header(header: &str) -> Option<Field> {
        let normalized = header.trim().to_lowercase().replace(' ', "_");
        Field::all()
            .iter()
            .copied()
            .find(|field| field.aliases().contains(&normalized.as_str()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Meteorological season of a record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Parse a cell: label (case-insensitive) or UCI code 1-4
    pub fn parse_cell(value: &str) -> Option<Season> {
        match value.trim().to_lowercase().as_str() {
            "spring" | "1" => Some(Season::Spring),
            "summer" | "2" => Some(Season::Summer),
            "fall" | "autumn" | "3" => Some(Season::Fall),
            "winter" | "4" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Weather situation, ordered from best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weather {
    /// Clear, few clouds
    Good,
    /// Mist, cloudy
    Moderate,
    /// Light snow or light rain
    Poor,
    /// Heavy rain, ice pellets, thunderstorm
    Severe,
}

impl Weather {
    /// Get all weather categories from best to worst
    pub fn all() -> &'static [Weather] {
        &[
            Weather::Good,
            Weather::Moderate,
            Weather::Poor,
            Weather::Severe,
        ]
    }

    /// Parse a cell: label, common synonym or UCI code 1-4
    pub fn parse_cell(value: &str) -> Option<Weather> {
        match value.trim().to_lowercase().as_str() {
            "good" | "clear" | "1" => Some(Weather::Good),
            "moderate" | "mist" | "misty" | "cloudy" | "2" => Some(Weather::Moderate),
            "poor" | "bad" | "light rain" | "light snow" | "3" => Some(Weather::Poor),
            "severe" | "heavy rain" | "4" => Some(Weather::Severe),
            _ => None,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Good => write!(f, "Good"),
            Weather::Moderate => write!(f, "Moderate"),
            Weather::Poor => write!(f, "Poor"),
            Weather::Severe => write!(f, "Severe"),
        }
    }
}

/// Day type derived from the working-day flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    WeekendOrHoliday,
    Working,
}

impl DayType {
    pub fn all() -> &'static [DayType] {
        &[DayType::WeekendOrHoliday, DayType::Working]
    }

    pub fn from_workingday(workingday: bool) -> Self {
        if workingday {
            DayType::Working
        } else {
            DayType::WeekendOrHoliday
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self, DayType::Working)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::WeekendOrHoliday => write!(f, "Weekend/Holiday"),
            DayType::Working => write!(f, "Working Day"),
        }
    }
}

/// Calendar month bucket, ordered chronologically
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Derive the bucket from a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Full English month name
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Full English name for a month number (1-12)
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Parse a boolean flag cell (`0/1`, `true/false`, `yes/no`)
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a date cell
///
/// Accepts plain dates, date-times (time part dropped) and RFC 3339.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_header_aliases() {
        assert_eq!(Field::from_header("Datetime"), Some(Field::Datetime));
        assert_eq!(Field::from_header("dteday"), Some(Field::Datetime));
        assert_eq!(Field::from_header("weathersit"), Some(Field::Weather));
        assert_eq!(Field::from_header(" Count "), Some(Field::Total));
        assert_eq!(Field::from_header("cnt"), Some(Field::Total));
        assert_eq!(Field::from_header("hr"), Some(Field::Hour));
        assert_eq!(Field::from_header("Working Day"), Some(Field::Workingday));
        assert_eq!(Field::from_header("temp"), None);
    }

    #[test]
    fn test_season_parse() {
        assert_eq!(Season::parse_cell("Fall"), Some(Season::Fall));
        assert_eq!(Season::parse_cell("autumn"), Some(Season::Fall));
        assert_eq!(Season::parse_cell("4"), Some(Season::Winter));
        assert_eq!(Season::parse_cell("Monsoon"), None);
        assert_eq!(Season::parse_cell("5"), None);
    }

    #[test]
    fn test_weather_parse_and_order() {
        assert_eq!(Weather::parse_cell("Clear"), Some(Weather::Good));
        assert_eq!(Weather::parse_cell("light snow"), Some(Weather::Poor));
        assert_eq!(Weather::parse_cell("4"), Some(Weather::Severe));
        assert_eq!(Weather::parse_cell("Hail"), None);
        assert!(Weather::Good < Weather::Severe);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 3, 14).unwrap();
        assert_eq!(parse_date("2011-03-14"), Some(expected));
        assert_eq!(parse_date("03/14/2011"), Some(expected));
        assert_eq!(parse_date("2011-03-14 00:00:00"), Some(expected));
        assert_eq!(parse_date("2011-03-14T08:00:00+00:00"), Some(expected));
        assert_eq!(parse_date("14 March"), None);
    }

    #[test]
    fn test_year_month_ordering_and_display() {
        let dec = YearMonth::of(NaiveDate::from_ymd_opt(2011, 12, 31).unwrap());
        let jan = YearMonth::of(NaiveDate::from_ymd_opt(2012, 1, 1).unwrap());
        assert!(dec < jan);
        assert_eq!(dec.to_string(), "2011-12");
        assert_eq!(jan.month_name(), "January");
        assert_eq!(month_name(13), "Unknown");
    }

    #[test]
    fn test_day_type_labels() {
        assert_eq!(DayType::from_workingday(true), DayType::Working);
        assert_eq!(DayType::WeekendOrHoliday.to_string(), "Weekend/Holiday");
        assert!(DayType::WeekendOrHoliday < DayType::Working);
    }
}
