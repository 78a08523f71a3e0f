//! CSV Loader
//!
//! Reads the daily and hourly CSV files into record sets.
//! Headers are matched case-insensitively against the known aliases of each
//! field; unknown columns (temperature, humidity, stored year/month, ...)
//! are ignored so that calendar fields are always derived from the date.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{AnalysisError, AnalysisResult};
use super::table::{RecordSet, Row};
use super::types::{Field, RecordKind};

/// CSV record loader for one record granularity
#[derive(Debug, Clone)]
pub struct RecordLoader {
    kind: RecordKind,
    delimiter: u8,
}

impl RecordLoader {
    /// Create a loader for the given granularity (comma-delimited)
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            delimiter: b',',
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load records from a CSV file
    pub fn load(&self, path: &Path) -> AnalysisResult<RecordSet> {
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = self.read(file, path)?;
        tracing::info!(
            path = %path.display(),
            kind = %self.kind,
            rows = records.len(),
            "Loaded record set"
        );
        Ok(records)
    }

    /// Load records from a CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> AnalysisResult<RecordSet> {
        self.read(csv_data.as_bytes(), Path::new("<memory>"))
    }

    fn read<R: Read>(&self, source: R, path: &Path) -> AnalysisResult<RecordSet> {
        let csv_error = |source: csv::Error| AnalysisError::Csv {
            path: PathBuf::from(path),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns = self.map_columns(&headers);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_error)?;

            let mut row = Row::new();
            for (idx, field) in &columns {
                if let Some(value) = record.get(*idx) {
                    row.insert(*field, value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(RecordSet::new(self.kind, rows))
    }

    /// Map column indices to canonical fields
    fn map_columns(&self, headers: &csv::StringRecord) -> Vec<(usize, Field)> {
        let mut columns = Vec::new();
        let mut ignored = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            match Field::from_header(header) {
                // Daily rows never carry an hour
                Some(Field::Hour) if self.kind == RecordKind::Daily => ignored.push(header),
                Some(field) if columns.iter().any(|(_, f)| *f == field) => {
                    tracing::warn!(column = %header, field = %field, "Duplicate column, keeping the first");
                }
                Some(field) => columns.push((idx, field)),
                None => ignored.push(header),
            }
        }

        if !ignored.is_empty() {
            tracing::debug!(kind = %self.kind, ?ignored, "Ignoring unrecognized columns");
        }

        columns
    }
}

/// Load a daily record set from a CSV file
pub fn load_daily(path: &Path) -> AnalysisResult<RecordSet> {
    RecordLoader::new(RecordKind::Daily).load(path)
}

/// Load an hourly record set from a CSV file
pub fn load_hourly(path: &Path) -> AnalysisResult<RecordSet> {
    RecordLoader::new(RecordKind::Hourly).load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::{Season, Weather};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_cleaned_headers() {
        let csv_data = "Datetime,Season,Holiday,Workingday,Weather,Temp,Casual,Registered,Count,Month,Year
2011-01-01,Winter,0,0,Moderate,0.34,331,654,985,7,1999
2011-01-02,Winter,0,0,Good,0.36,131,670,801,7,1999";

        let records = RecordLoader::new(RecordKind::Daily)
            .load_str(csv_data)
            .unwrap();

        assert_eq!(records.len(), 2);
        let second = records.records().nth(1).unwrap();
        assert_eq!(second.weather().unwrap(), Weather::Good);
        assert_eq!(second.counts().unwrap().total, 801);
        // Stored year/month columns are ignored in favour of the date
        assert_eq!(second.year_month().unwrap().year, 2011);
        assert_eq!(second.year_month().unwrap().month, 1);
    }

    #[test]
    fn test_load_raw_uci_headers() {
        let csv_data = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,3,13,16";

        let records = RecordLoader::new(RecordKind::Hourly)
            .load_str(csv_data)
            .unwrap();

        let record = records.records().next().unwrap();
        assert_eq!(record.season().unwrap(), Season::Spring);
        assert_eq!(record.hour().unwrap(), 0);
        assert_eq!(record.counts().unwrap().registered, 13);
    }

    #[test]
    fn test_daily_loader_drops_hour_column() {
        let csv_data = "Datetime,Hour,Count\n2011-01-01,5,10";
        let records = RecordLoader::new(RecordKind::Daily)
            .load_str(csv_data)
            .unwrap();

        let record = records.records().next().unwrap();
        assert!(record.hour().is_err());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let records = RecordLoader::new(RecordKind::Hourly)
            .load_str("Datetime,Hour,Casual,Registered,Count\n")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let records = RecordLoader::new(RecordKind::Daily)
            .with_delimiter(b';')
            .load_str("Datetime;Casual;Registered;Count\n2012-05-01;1;2;3")
            .unwrap();
        assert_eq!(records.records().next().unwrap().counts().unwrap().total, 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Datetime,Season,Casual,Registered,Count").unwrap();
        writeln!(file, "2012-06-01,Summer,10,20,30").unwrap();

        let records = load_daily(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.kind(), RecordKind::Daily);
    }

    #[test]
    fn test_missing_file() {
        let err = load_hourly(Path::new("/nonexistent/hour_df.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
