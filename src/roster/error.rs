//! Roster loading error types
//!
//! Every way the spreadsheet can fail to become a `ClassRoster`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the roster
#[derive(Error, Debug)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet parsing failed
    #[error("spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Extension is neither CSV nor a spreadsheet format
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Workbook contains no worksheet
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// Required columns absent from the header row
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A score cell is not a number
    #[error("row {row}: {column} is not a number: {value:?}")]
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },

    /// Header present but no student rows
    #[error("roster contains no students")]
    EmptyRoster,
}

/// Result type alias for roster loading
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::MissingColumns(vec!["Math".to_string(), "Roll No".to_string()]);
        assert_eq!(err.to_string(), "missing required columns: Math, Roll No");

        let err = LoadError::InvalidScore {
            row: 3,
            column: "Science".to_string(),
            value: "absent".to_string(),
        };
        assert_eq!(err.to_string(), "row 3: Science is not a number: \"absent\"");
    }
}
