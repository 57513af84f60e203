#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/lisbon/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod graphic;
pub mod palette;
pub mod render;
pub mod spec;
pub mod svg;

pub use builder::{RANGE_PADDING, assign_colors, build_bar, build_pie, format_percent, padded_range};
pub use graphic::{Graphic, Shape, TextAnchor};
pub use palette::{Color, InvalidColor, PALETTE, palette_color};
pub use render::{ChartRenderer, RenderError, VectorRenderer};
pub use spec::{ChartKind, ChartLabels, ChartSpec};
pub use svg::to_svg;
