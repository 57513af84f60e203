#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lisbon/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod allocation;
pub mod performance;
pub mod rank;
pub mod window;

pub use aggregate::{AggregatedResult, EntityReturn, aggregate};
pub use allocation::allocation_snapshot;
pub use performance::portfolio_returns;
pub use rank::{bottom_n, top_n};
pub use window::{AggregationWindow, latest_date};
