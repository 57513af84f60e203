//! Allocation snapshot at the latest evaluation date.

use lisbon_data::{AllocationRow, Holding};
use std::cmp::Ordering;

/// Holdings of the latest evaluation date, largest share first.
///
/// Holdings without a valid date are ignored. Equal shares keep their sheet
/// order. Returns an empty snapshot when no holding has a valid date.
pub fn allocation_snapshot(holdings: &[Holding]) -> Vec<AllocationRow> {
    let Some(latest) = holdings.iter().filter_map(|h| h.as_of_date).max() else {
        return Vec::new();
    };

    let mut snapshot: Vec<_> = holdings
        .iter()
        .filter(|h| h.as_of_date == Some(latest))
        .map(|h| h.allocation.clone())
        .collect();
    snapshot.sort_by(|a, b| {
        b.portfolio_pct
            .partial_cmp(&a.portfolio_pct)
            .unwrap_or(Ordering::Equal)
    });
    snapshot
}
