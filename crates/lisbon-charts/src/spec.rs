//! Chart descriptions.

use crate::palette::Color;
use serde::{Deserialize, Serialize};

/// Kind of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bars, one per category.
    Bar,
    /// Slices proportional to each category's share of the total.
    Pie,
}

/// Text around a chart: title and axis labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabels {
    /// Chart title.
    pub title: String,
    /// X-axis label (bar charts).
    pub x_label: String,
    /// Y-axis label (bar charts).
    pub y_label: String,
}

impl ChartLabels {
    /// Labels with a title only.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the axis labels.
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }
}

/// A fully parameterized chart, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Kind of chart.
    pub kind: ChartKind,

    /// Title and axis labels.
    pub labels: ChartLabels,

    /// Category names, in drawing order.
    pub categories: Vec<String>,

    /// One value per category.
    pub values: Vec<f64>,

    /// One display label per category.
    pub value_labels: Vec<String>,

    /// Y-axis range of bar charts.
    pub y_range: Option<(f64, f64)>,

    /// Color of each category, in category order.
    pub color_map: Vec<(String, Color)>,

    /// Whether category names are printed under the x-axis.
    pub show_x_tick_labels: bool,
}

impl ChartSpec {
    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the chart has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Color assigned to a category.
    pub fn color_of(&self, category: &str) -> Option<Color> {
        self.color_map
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| *color)
    }
}
