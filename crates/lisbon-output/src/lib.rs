#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lisbon/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod assembler;
pub mod document;
mod pdf;
pub mod summary;
pub mod writer;

pub use assembler::{IMAGE_SLOTS, assemble};
pub use document::{A4, Align, Document, Element, Page, PageSize, ReportImage, TextStyle};
pub use summary::SummaryRecord;
pub use writer::{
    DocumentWriter, ExportFormat, JsonWriter, PdfWriter, UnknownFormat, WriteError,
    render_document,
};
