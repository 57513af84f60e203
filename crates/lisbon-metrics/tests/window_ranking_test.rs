//! Integration tests chaining window aggregation and ranking.

use chrono::{Duration, NaiveDate};
use lisbon_data::TimeSeriesRow;
use lisbon_metrics::{AggregationWindow, EntityReturn, aggregate, bottom_n, top_n};

fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

#[test]
fn test_forty_day_gap_falls_outside_month() {
    let later = day0() + Duration::days(40);
    let rows = vec![
        TimeSeriesRow::new("P", "A", Some(day0()), 2.0),
        TimeSeriesRow::new("P", "A", Some(later), -1.0),
        TimeSeriesRow::new("P", "B", Some(later), 3.0),
    ];

    let result = aggregate(&rows, AggregationWindow::Month);
    assert_eq!(
        result.entries(),
        [EntityReturn::new("B", 3.0), EntityReturn::new("A", -1.0)]
    );

    // The quarter still reaches back to day0.
    let quarter = aggregate(&rows, AggregationWindow::Quarter);
    assert_eq!(quarter.values(), [3.0, 1.0]);
}

#[test]
fn test_best_and_worst_of_a_quarter() {
    let assets = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf"];
    let mut rows = Vec::new();
    for month in 1..=6u32 {
        let date = NaiveDate::from_ymd_opt(2024, month, 28).unwrap();
        for (i, asset) in assets.iter().enumerate() {
            rows.push(TimeSeriesRow::new("P", *asset, Some(date), i as f64 - 3.0));
        }
    }

    let result = aggregate(&rows, AggregationWindow::Quarter);
    // 28 Mar through 28 Jun: four observations per asset.
    assert_eq!(result.values()[0], 12.0);

    let best = top_n(&result, 5);
    let worst = bottom_n(&result, 5);
    assert_eq!(
        best.categories(),
        ["Golf", "Foxtrot", "Echo", "Delta", "Charlie"]
    );
    assert_eq!(
        worst.categories(),
        ["Echo", "Delta", "Charlie", "Bravo", "Alpha"]
    );
}
