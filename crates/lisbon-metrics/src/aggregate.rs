//! Return aggregation over trailing windows.

use crate::window::AggregationWindow;
use lisbon_data::TimeSeriesRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Summed return of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReturn {
    /// Asset name.
    pub entity_id: String,

    /// Sum of the asset's returns inside the window, in percent.
    pub summed_return: f64,
}

impl EntityReturn {
    /// Create a new entity return.
    pub fn new(entity_id: impl Into<String>, summed_return: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            summed_return,
        }
    }
}

/// Per-asset summed returns, ranked.
///
/// Entries are sorted by summed return descending, ties by asset name
/// ascending, and every asset appears at most once. An empty result means
/// the window held no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    entries: Vec<EntityReturn>,
}

impl AggregatedResult {
    /// Build a ranked result from per-asset totals.
    pub fn from_totals(totals: HashMap<String, f64>) -> Self {
        let mut entries: Vec<_> = totals
            .into_iter()
            .map(|(entity_id, summed_return)| EntityReturn::new(entity_id, summed_return))
            .collect();
        entries.sort_by(ranking_order);
        Self { entries }
    }

    /// Wrap entries that are already in ranking order.
    pub(crate) const fn from_ranked(entries: Vec<EntityReturn>) -> Self {
        Self { entries }
    }

    /// Ranked entries.
    pub fn entries(&self) -> &[EntityReturn] {
        &self.entries
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window held no data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the ranked entries.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityReturn> {
        self.entries.iter()
    }

    /// Asset names in ranking order.
    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.entity_id.clone()).collect()
    }

    /// Summed returns in ranking order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.summed_return).collect()
    }
}

impl<'a> IntoIterator for &'a AggregatedResult {
    type Item = &'a EntityReturn;
    type IntoIter = std::slice::Iter<'a, EntityReturn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn ranking_order(a: &EntityReturn, b: &EntityReturn) -> Ordering {
    b.summed_return
        .total_cmp(&a.summed_return)
        .then_with(|| a.entity_id.cmp(&b.entity_id))
}

/// Sum asset returns over a trailing window.
///
/// The window ends at the latest valid evaluation date in `rows` (see
/// [`AggregationWindow::start_from`]); rows on either bound are included and
/// rows without a valid date are excluded. Blank returns do not contribute to
/// an asset's sum, but the asset still appears when it has a row in the
/// window.
///
/// Returns an empty result when `rows` has no valid date or nothing falls in
/// the window.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lisbon_data::TimeSeriesRow;
/// use lisbon_metrics::{AggregationWindow, aggregate};
///
/// let day0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let day40 = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// let rows = vec![
///     TimeSeriesRow::new("P", "A", Some(day0), 2.0),
///     TimeSeriesRow::new("P", "A", Some(day40), -1.0),
///     TimeSeriesRow::new("P", "B", Some(day40), 3.0),
/// ];
///
/// let result = aggregate(&rows, AggregationWindow::Month);
/// assert_eq!(result.categories(), ["B", "A"]);
/// assert_eq!(result.values(), [3.0, -1.0]);
/// ```
pub fn aggregate(rows: &[TimeSeriesRow], window: AggregationWindow) -> AggregatedResult {
    let Some((start, latest)) = window.bounds(rows) else {
        return AggregatedResult::default();
    };

    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in rows {
        let Some(date) = row.as_of_date else {
            continue;
        };
        if date < start || date > latest {
            continue;
        }

        let total = totals.entry(row.entity_id.clone()).or_insert(0.0);
        if row.return_value.is_finite() {
            *total += row.return_value;
        }
    }

    AggregatedResult::from_totals(totals)
}
