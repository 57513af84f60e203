//! Raw CSV sheets with header lookup.

use crate::error::{DataError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A CSV export of one workbook sheet.
///
/// Holds the header row and the raw records; typed loaders in
/// [`crate::base`] and [`crate::returns`] turn it into records.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl Sheet {
    /// Read a sheet from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_path(name: impl Into<String>, path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(name, file)
    }

    /// Read a sheet from any CSV source.
    ///
    /// Rows may have fewer cells than the header; missing cells read as blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid CSV.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.into(),
            headers,
            records,
        })
    }

    /// Sheet name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column, if present.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header.trim())
    }

    /// Position of a column the sheet cannot be read without.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingColumn`] when the header is absent.
    pub fn require(&self, header: &str) -> Result<usize> {
        self.column(header).ok_or_else(|| DataError::MissingColumn {
            sheet: self.name.clone(),
            column: header.to_string(),
        })
    }

    /// Iterate data rows with their one-based row number.
    pub fn rows(&self) -> impl Iterator<Item = (usize, Row<'_>)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (i + 1, Row { record }))
    }
}

/// A data row of a [`Sheet`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Cell at a column position; absent cells read as blank.
    pub fn cell(&self, column: usize) -> &'a str {
        self.record.get(column).unwrap_or("")
    }

    /// Cell at an optional column position.
    pub fn cell_opt(&self, column: Option<usize>) -> Option<&'a str> {
        column.map(|c| self.cell(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\u{feff}Policy, Date ,Value\nP-1,2024-01-31,1.0\nP-2,2024-02-29\n";

    #[test]
    fn test_headers_are_trimmed() {
        let sheet = Sheet::from_reader("returns", CSV.as_bytes()).unwrap();

        assert_eq!(sheet.headers(), ["Policy", "Date", "Value"]);
        assert_eq!(sheet.column("Date"), Some(1));
        assert_eq!(sheet.column("Missing"), None);
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_short_rows_read_blank() {
        let sheet = Sheet::from_reader("returns", CSV.as_bytes()).unwrap();
        let rows: Vec<_> = sheet.rows().collect();

        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[0].1.cell(2), "1.0");
        assert_eq!(rows[1].1.cell(2), "");
        assert_eq!(rows[1].1.cell_opt(None), None);
    }

    #[test]
    fn test_require_reports_sheet_and_column() {
        let sheet = Sheet::from_reader("base", CSV.as_bytes()).unwrap();
        let err = sheet.require("Account").unwrap_err();

        assert!(matches!(
            err,
            DataError::MissingColumn { ref sheet, ref column }
                if sheet == "base" && column == "Account"
        ));
    }
}
