//! Report pipeline.
//!
//! Loads both sheets, selects the policy, renders every report section in a
//! fixed order and writes the assembled document.

pub(crate) mod images;
pub(crate) mod pipeline;
pub(crate) mod sections;
