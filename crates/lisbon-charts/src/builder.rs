//! Chart description builders.
//!
//! Builders return `None` when there is nothing to draw; callers warn and
//! leave the chart out of the report.

use crate::palette::{Color, palette_color};
use crate::spec::{ChartKind, ChartLabels, ChartSpec};

/// Padding applied to each end of a bar chart's y-range.
pub const RANGE_PADDING: f64 = 0.1;

/// Format a percent value with two decimals.
///
/// No sign is forced on positive values; negative values keep their minus
/// sign.
///
/// # Examples
///
/// ```
/// use lisbon_charts::format_percent;
///
/// assert_eq!(format_percent(3.14159), "3.14%");
/// assert_eq!(format_percent(-0.5), "-0.50%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Y-range of a bar chart over `values`.
///
/// Each bound moves away from the data by 10% of its own magnitude, so the
/// lower bound is `min * 1.1` whenever `min <= 0` and the upper bound is
/// `max * 1.1` whenever `max >= 0`. All-negative data keeps its largest bar
/// visible (`max * 0.9`), and the range always contains every value.
/// All-positive data likewise starts at `min * 0.9` rather than `min * 1.1`,
/// which would leave the smallest bar below the axis.
/// Non-finite values are ignored; returns `None` when no finite value remains.
pub fn padded_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    Some((
        min - RANGE_PADDING * min.abs(),
        max + RANGE_PADDING * max.abs(),
    ))
}

/// Assign palette colors to distinct categories in encounter order.
pub fn assign_colors(categories: &[String]) -> Vec<(String, Color)> {
    let mut map: Vec<(String, Color)> = Vec::new();
    for category in categories {
        if map.iter().all(|(name, _)| name != category) {
            let color = palette_color(map.len());
            map.push((category.clone(), color));
        }
    }
    map
}

/// Build a bar chart.
///
/// Bars keep the given order. Every bar is labeled with `label_fmt(value)`
/// and the x-axis shows no tick labels.
///
/// Returns `None` when there are no categories or the two sequences differ
/// in length.
pub fn build_bar(
    labels: ChartLabels,
    categories: Vec<String>,
    values: Vec<f64>,
    label_fmt: fn(f64) -> String,
) -> Option<ChartSpec> {
    if categories.is_empty() || categories.len() != values.len() {
        return None;
    }

    let y_range = padded_range(&values)?;
    let value_labels = values.iter().map(|&v| label_fmt(v)).collect();
    let color_map = assign_colors(&categories);

    Some(ChartSpec {
        kind: ChartKind::Bar,
        labels,
        categories,
        values,
        value_labels,
        y_range: Some(y_range),
        color_map,
        show_x_tick_labels: false,
    })
}

/// Build a pie chart.
///
/// Repeated category names are merged into one slice whose value is their
/// sum, in first-occurrence order. Each slice is labeled with its share of
/// the total.
///
/// Returns `None` when there are no categories, the two sequences differ in
/// length, or the total of the finite positive values is not positive.
pub fn build_pie(
    labels: ChartLabels,
    categories: Vec<String>,
    values: Vec<f64>,
) -> Option<ChartSpec> {
    if categories.is_empty() || categories.len() != values.len() {
        return None;
    }

    let mut merged: Vec<(String, f64)> = Vec::new();
    for (category, value) in categories.into_iter().zip(values) {
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        match merged.iter_mut().find(|(name, _)| *name == category) {
            Some((_, total)) => *total += value,
            None => merged.push((category, value)),
        }
    }

    let total: f64 = merged.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return None;
    }

    let (categories, values): (Vec<_>, Vec<_>) = merged.into_iter().unzip();
    let value_labels = values
        .iter()
        .map(|v| format_percent(v / total * 100.0))
        .collect();
    let color_map = assign_colors(&categories);

    Some(ChartSpec {
        kind: ChartKind::Pie,
        labels,
        categories,
        values,
        value_labels,
        y_range: None,
        color_map,
        show_x_tick_labels: false,
    })
}
