//! Paginated document model.
//!
//! Positions and sizes are millimetres measured from the top-left corner of
//! the page.

use lisbon_charts::{ChartSpec, Graphic};
use serde::Serialize;
use std::path::PathBuf;

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
}

/// ISO A4, portrait.
pub const A4: PageSize = PageSize {
    width: 210.0,
    height: 297.0,
};

/// Horizontal alignment of text inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Flush left.
    Left,
    /// Centered.
    Center,
}

/// Font settings of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Regular weight at `size` points.
    pub const fn regular(size: f64) -> Self {
        Self { size, bold: false }
    }

    /// Bold weight at `size` points.
    pub const fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }
}

/// A positioned item on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A single line of text in a cell.
    Text {
        /// Text content.
        text: String,
        /// Cell left edge.
        x: f64,
        /// Cell top edge.
        y: f64,
        /// Cell width.
        w: f64,
        /// Cell height.
        h: f64,
        /// Font settings.
        style: TextStyle,
        /// Alignment inside the cell.
        align: Align,
    },
    /// A chart, referenced by its index in [`Document::images`].
    Image {
        /// Index into the document's images.
        image: usize,
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
    },
}

/// One page of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Elements in drawing order.
    pub elements: Vec<Element>,
}

impl Page {
    /// Indices of the images placed on this page, in drawing order.
    pub fn image_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Image { image, .. } => Some(*image),
                Element::Text { .. } => None,
            })
            .collect()
    }

    /// Texts on this page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                Element::Image { .. } => None,
            })
            .collect()
    }
}

/// A rendered chart ready to be placed in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportImage {
    /// Path of the exported image file.
    pub handle: PathBuf,
    /// Chart title.
    pub title: String,
    /// Chart description the image was rendered from.
    pub chart: ChartSpec,
    /// Rendered vector graphic.
    #[serde(skip)]
    pub graphic: Graphic,
}

/// An assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Report title.
    pub title: String,
    /// Size of every page.
    pub page_size: PageSize,
    /// Pages in order.
    pub pages: Vec<Page>,
    /// Charts referenced by the pages' image elements.
    pub images: Vec<ReportImage>,
}

impl Document {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the page structure as pretty-printed JSON.
    ///
    /// Rendered graphics are left out; images are identified by their file
    /// handle and chart description.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
