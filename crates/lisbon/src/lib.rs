#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lisbon/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod locale;
pub mod selection;

// Re-export main types from sub-crates
pub use lisbon_charts as charts;
pub use lisbon_data as data;
pub use lisbon_metrics as metrics;
pub use lisbon_output as output;

pub use locale::{Locale, ReportLabels, UnknownLocale, format_currency};
pub use selection::{PolicySelection, SelectionError, select_policy};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
