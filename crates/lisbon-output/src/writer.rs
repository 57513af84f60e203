//! Document writers.

use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while writing a document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A page references an image the document does not hold.
    #[error("Page references missing image #{0}")]
    MissingImage(usize),
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PDF document.
    #[default]
    Pdf,

    /// JSON page structure.
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    /// Writer producing this format.
    pub fn writer(&self) -> Box<dyn DocumentWriter> {
        match self {
            Self::Pdf => Box::new(PdfWriter),
            Self::Json => Box::new(JsonWriter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when an export format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown export format '{0}' (expected pdf or json)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Turns an assembled document into bytes.
pub trait DocumentWriter {
    /// Write the document to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write_to(&self, document: &Document, out: &mut dyn Write) -> Result<(), WriteError>;

    /// Write the document to a file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or file writing fails.
    fn write_to_file(&self, document: &Document, path: &Path) -> Result<(), WriteError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(document, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Writes documents as PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl DocumentWriter for PdfWriter {
    fn write_to(&self, document: &Document, out: &mut dyn Write) -> Result<(), WriteError> {
        crate::pdf::write_pdf(document, out)
    }
}

/// Writes the page structure as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    fn write_to(&self, document: &Document, out: &mut dyn Write) -> Result<(), WriteError> {
        out.write_all(document.to_json()?.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Write `document` to `path` in `format`.
///
/// # Errors
///
/// Returns an error if encoding or file writing fails.
pub fn render_document(
    document: &Document,
    format: ExportFormat,
    path: &Path,
) -> Result<(), WriteError> {
    format.writer().write_to_file(document, path)
}
