#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lisbon/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod base;
pub mod cells;
pub mod columns;
pub mod error;
pub mod records;
pub mod returns;
pub mod sheet;

pub use base::{BaseSheet, load_base};
pub use columns::ColumnNames;
pub use error::{DataError, Result};
pub use records::{AllocationRow, Holding, PolicyMetric, PolicyRecord, TimeSeriesRow};
pub use returns::{ReturnsSheet, load_returns};
pub use sheet::Sheet;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
