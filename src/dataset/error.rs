//! Dataset error types
//!
//! Defines the errors raised while loading record sets and while
//! aggregating them.

use std::path::PathBuf;
use thiserror::Error;

use super::types::{Field, RecordKind};

/// A record violates one of the data model invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A required column is absent or blank
    #[error("Missing field '{field}' in row {row}")]
    MissingField { row: usize, field: Field },

    /// A cell could not be parsed or falls outside its closed set
    #[error("Invalid value '{value}' for field '{field}' in row {row}: expected {expected}")]
    InvalidValue {
        row: usize,
        field: Field,
        value: String,
        expected: &'static str,
    },

    /// `casual + registered` does not add up to the stored count
    #[error(
        "Inconsistent totals in row {row}: casual {casual} + registered {registered} != count {total}"
    )]
    InconsistentTotal {
        row: usize,
        casual: u64,
        registered: u64,
        total: u64,
    },

    /// Adding this record's counts to a running sum exceeds `u64::MAX`
    #[error("Sum of '{field}' overflows at row {row}")]
    CountOverflow { row: usize, field: Field },
}

impl DataError {
    /// Row index (zero-based) of the offending record
    pub fn row(&self) -> usize {
        match self {
            DataError::MissingField { row, .. }
            | DataError::InvalidValue { row, .. }
            | DataError::InconsistentTotal { row, .. }
            | DataError::CountOverflow { row, .. } => *row,
        }
    }
}

/// Errors that can occur while loading or analysing the dataset
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input data violates an invariant
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Summing a summary table exceeds `u64::MAX`
    #[error("Rental counts overflow while computing {what}")]
    CountOverflow { what: &'static str },

    /// Record set has no rows for the requested grouping
    #[error("No {kind} records available for {what}")]
    EmptyInput { kind: RecordKind, what: &'static str },

    /// Source file could not be opened or read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not well-formed CSV
    #[error("Failed to parse CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AnalysisError {
    /// Whether this is the non-fatal "nothing to show" condition
    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput { .. })
    }
}

/// Result type alias for dataset and aggregation operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
