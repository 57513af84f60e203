//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading the report sheets.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The evaluation date column is absent, so no reference date exists
    #[error("Evaluation date column '{column}' not found in the {sheet} sheet")]
    MissingDateColumn {
        /// Sheet that was read
        sheet: String,
        /// Expected column header
        column: String,
    },

    /// A column the sheet cannot be read without is absent
    #[error("Required column '{column}' not found in the {sheet} sheet")]
    MissingColumn {
        /// Sheet that was read
        sheet: String,
        /// Expected column header
        column: String,
    },

    /// A numeric cell holds something that is not a number
    #[error("Invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        /// One-based data row number (header excluded)
        row: usize,
        /// Column header
        column: String,
        /// Raw cell content
        value: String,
    },

    /// The sheet has a header but no data rows
    #[error("The {0} sheet has no data rows")]
    EmptySheet(String),
}
