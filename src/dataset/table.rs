//! Row-oriented record sets
//!
//! A `RecordSet` holds rows of named cells exactly as they were handed
//! over by the loader. Typed access goes through `RecordView`, which
//! parses a cell on demand and reports the offending row and field when
//! a value violates the data model.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::error::DataError;
use super::types::{
    parse_date, parse_flag, DayType, Field, RecordKind, Season, Weather, YearMonth,
};

/// A single record: canonical field -> raw cell text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<Field, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a cell
    pub fn with(mut self, field: Field, value: impl ToString) -> Self {
        self.cells.insert(field, value.to_string());
        self
    }

    /// Raw cell text, if present
    pub fn get(&self, field: Field) -> Option<&str> {
        self.cells.get(&field).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, field: Field, value: String) {
        self.cells.insert(field, value);
    }
}

/// Rider counts of one record, validated against the totals invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// An immutable set of records of one granularity
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    kind: RecordKind,
    rows: Vec<Row>,
}

impl RecordSet {
    /// Create a record set from rows
    pub fn new(kind: RecordKind, rows: Vec<Row>) -> Self {
        Self { kind, rows }
    }

    /// Create an empty record set
    pub fn empty(kind: RecordKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over typed views of every record
    pub fn records(&self) -> impl Iterator<Item = RecordView<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| RecordView { index, row })
    }
}

/// Typed, validating access to one row
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    index: usize,
    row: &'a Row,
}

impl<'a> RecordView<'a> {
    /// Zero-based position of the record in its set
    pub fn index(&self) -> usize {
        self.index
    }

    fn raw(&self, field: Field) -> Result<&'a str, DataError> {
        match self.row.get(field).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DataError::MissingField {
                row: self.index,
                field,
            }),
        }
    }

    fn invalid(&self, field: Field, value: &str, expected: &'static str) -> DataError {
        DataError::InvalidValue {
            row: self.index,
            field,
            value: value.to_string(),
            expected,
        }
    }

    pub fn date(&self) -> Result<NaiveDate, DataError> {
        let value = self.raw(Field::Datetime)?;
        parse_date(value).ok_or_else(|| self.invalid(Field::Datetime, value, "a calendar date"))
    }

    /// Calendar bucket, always recomputed from the record's date
    pub fn year_month(&self) -> Result<YearMonth, DataError> {
        self.date().map(YearMonth::of)
    }

    pub fn season(&self) -> Result<Season, DataError> {
        let value = self.raw(Field::Season)?;
        Season::parse_cell(value)
            .ok_or_else(|| self.invalid(Field::Season, value, "one of Spring, Summer, Fall, Winter"))
    }

    pub fn weather(&self) -> Result<Weather, DataError> {
        let value = self.raw(Field::Weather)?;
        Weather::parse_cell(value).ok_or_else(|| {
            self.invalid(Field::Weather, value, "one of Good, Moderate, Poor, Severe")
        })
    }

    pub fn holiday(&self) -> Result<bool, DataError> {
        self.flag(Field::Holiday)
    }

    pub fn workingday(&self) -> Result<bool, DataError> {
        self.flag(Field::Workingday)
    }

    pub fn day_type(&self) -> Result<DayType, DataError> {
        self.workingday().map(DayType::from_workingday)
    }

    pub fn hour(&self) -> Result<u8, DataError> {
        let value = self.raw(Field::Hour)?;
        value
            .parse::<u8>()
            .ok()
            .filter(|hour| *hour <= 23)
            .ok_or_else(|| self.invalid(Field::Hour, value, "an hour between 0 and 23"))
    }

    /// Rider counts, checked against `casual + registered == count`
    pub fn counts(&self) -> Result<Counts, DataError> {
        let casual = self.count(Field::Casual)?;
        let registered = self.count(Field::Registered)?;
        let total = self.count(Field::Total)?;

        if casual.checked_add(registered) != Some(total) {
            return Err(DataError::InconsistentTotal {
                row: self.index,
                casual,
                registered,
                total,
            });
        }

        Ok(Counts {
            casual,
            registered,
            total,
        })
    }

    fn flag(&self, field: Field) -> Result<bool, DataError> {
        let value = self.raw(field)?;
        parse_flag(value).ok_or_else(|| self.invalid(field, value, "a boolean flag (0 or 1)"))
    }

    fn count(&self, field: Field) -> Result<u64, DataError> {
        let value = self.raw(field)?;
        value
            .parse::<u64>()
            .map_err(|_| self.invalid(field, value, "a non-negative integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_row() -> Row {
        Row::new()
            .with(Field::Datetime, "2011-01-01")
            .with(Field::Season, "Winter")
            .with(Field::Holiday, 0)
            .with(Field::Workingday, 0)
            .with(Field::Weather, "Moderate")
            .with(Field::Casual, 331)
            .with(Field::Registered, 654)
            .with(Field::Total, 985)
    }

    #[test]
    fn test_typed_access() {
        let set = RecordSet::new(RecordKind::Daily, vec![daily_row()]);
        let record = set.records().next().unwrap();

        assert_eq!(record.season().unwrap(), Season::Winter);
        assert_eq!(record.weather().unwrap(), Weather::Moderate);
        assert!(!record.holiday().unwrap());
        assert_eq!(record.day_type().unwrap(), DayType::WeekendOrHoliday);
        assert_eq!(
            record.year_month().unwrap(),
            YearMonth {
                year: 2011,
                month: 1
            }
        );
        assert_eq!(
            record.counts().unwrap(),
            Counts {
                casual: 331,
                registered: 654,
                total: 985
            }
        );
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let row = daily_row().with(Field::Weather, "  ");
        let set = RecordSet::new(RecordKind::Daily, vec![daily_row(), row]);
        let record = set.records().nth(1).unwrap();

        assert_eq!(
            record.weather().unwrap_err(),
            DataError::MissingField {
                row: 1,
                field: Field::Weather
            }
        );
        assert!(matches!(
            record.hour(),
            Err(DataError::MissingField {
                field: Field::Hour,
                ..
            })
        ));
    }

    #[test]
    fn test_inconsistent_total() {
        let set = RecordSet::new(
            RecordKind::Daily,
            vec![daily_row().with(Field::Total, 1000)],
        );
        let record = set.records().next().unwrap();

        assert_eq!(
            record.counts().unwrap_err(),
            DataError::InconsistentTotal {
                row: 0,
                casual: 331,
                registered: 654,
                total: 1000
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        let row = daily_row()
            .with(Field::Casual, -4)
            .with(Field::Hour, 24)
            .with(Field::Season, "Monsoon");
        let set = RecordSet::new(RecordKind::Hourly, vec![row]);
        let record = set.records().next().unwrap();

        assert!(matches!(
            record.counts(),
            Err(DataError::InvalidValue {
                field: Field::Casual,
                ..
            })
        ));
        assert!(matches!(
            record.hour(),
            Err(DataError::InvalidValue {
                field: Field::Hour,
                ..
            })
        ));
        assert!(matches!(
            record.season(),
            Err(DataError::InvalidValue {
                field: Field::Season,
                ..
            })
        ));
    }
}
