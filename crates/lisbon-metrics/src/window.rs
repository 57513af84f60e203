//! Trailing aggregation windows.
//!
//! A window ends at the latest evaluation date present in the data and
//! reaches back a whole number of calendar months. Month subtraction clamps to
//! the end of shorter months, so the window starting point of 31 March is the
//! last day of February.

use chrono::{Months, NaiveDate};
use lisbon_data::TimeSeriesRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookback window for return aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationWindow {
    /// One calendar month.
    Month,
    /// Three calendar months.
    Quarter,
}

impl AggregationWindow {
    /// Length of the window in calendar months.
    pub const fn months(&self) -> u32 {
        match self {
            Self::Month => 1,
            Self::Quarter => 3,
        }
    }

    /// Stable identifier of the window.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }

    /// First date included in a window ending at `latest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lisbon_metrics::AggregationWindow;
    ///
    /// let latest = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    /// assert_eq!(
    ///     AggregationWindow::Quarter.start_from(latest),
    ///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    /// );
    /// ```
    pub fn start_from(&self, latest: NaiveDate) -> NaiveDate {
        latest
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive date bounds of the window over `rows`.
    ///
    /// Returns `None` when no row has a valid evaluation date.
    pub fn bounds(&self, rows: &[TimeSeriesRow]) -> Option<(NaiveDate, NaiveDate)> {
        latest_date(rows).map(|latest| (self.start_from(latest), latest))
    }
}

impl fmt::Display for AggregationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Latest valid evaluation date over `rows`.
///
/// Rows whose date could not be parsed are ignored.
pub fn latest_date(rows: &[TimeSeriesRow]) -> Option<NaiveDate> {
    rows.iter().filter_map(|r| r.as_of_date).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(AggregationWindow::Month, date(2024, 2, 10), date(2024, 1, 10))]
    #[case(AggregationWindow::Month, date(2024, 3, 31), date(2024, 2, 29))]
    #[case(AggregationWindow::Month, date(2024, 1, 15), date(2023, 12, 15))]
    #[case(AggregationWindow::Quarter, date(2024, 5, 31), date(2024, 2, 29))]
    #[case(AggregationWindow::Quarter, date(2023, 11, 30), date(2023, 8, 30))]
    fn test_start_from(
        #[case] window: AggregationWindow,
        #[case] latest: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(window.start_from(latest), expected);
    }

    #[test]
    fn test_latest_date_skips_invalid_dates() {
        let rows = vec![
            TimeSeriesRow::new("P", "A", Some(date(2024, 1, 31)), 1.0),
            TimeSeriesRow::new("P", "A", None, 1.0),
            TimeSeriesRow::new("P", "B", Some(date(2024, 2, 29)), 1.0),
        ];

        assert_eq!(latest_date(&rows), Some(date(2024, 2, 29)));
        assert_eq!(
            AggregationWindow::Month.bounds(&rows),
            Some((date(2024, 1, 29), date(2024, 2, 29)))
        );
    }

    #[test]
    fn test_bounds_without_dates() {
        let rows = vec![TimeSeriesRow::new("P", "A", None, 1.0)];
        assert_eq!(AggregationWindow::Quarter.bounds(&rows), None);
        assert_eq!(latest_date(&[]), None);
    }
}
