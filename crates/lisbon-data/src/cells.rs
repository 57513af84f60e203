//! Cell parsing for dates and numbers.
//!
//! Spreadsheet exports are loose about formatting: dates come out with or
//! without a time part and in day-first order, numbers may carry a percent
//! sign or a decimal comma. These helpers normalize the formats the workbook
//! produces and leave everything else to the caller.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Parse an evaluation date cell.
///
/// Returns `None` for blank or unrecognized cells; callers keep the row and
/// treat the date as invalid.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lisbon_data::cells::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 9, 30);
/// assert_eq!(parse_date("2024-09-30"), expected);
/// assert_eq!(parse_date("2024-09-30 00:00:00"), expected);
/// assert_eq!(parse_date("30/09/2024"), expected);
/// assert_eq!(parse_date("not a date"), None);
/// ```
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a numeric cell.
///
/// Blank cells are `Ok(None)`. A trailing `%` is dropped (the sheets already
/// store percent values) and a lone decimal comma is read as a decimal point.
/// Anything else that does not parse is returned as `Err` with the trimmed
/// cell so the caller can report it.
pub fn parse_number(cell: &str) -> Result<Option<f64>, String> {
    let trimmed = cell.trim();
    let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if body.is_empty() {
        return Ok(None);
    }

    let normalized = if body.contains(',') && !body.contains('.') {
        body.replacen(',', ".", 1)
    } else {
        body.to_string()
    };

    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|_| trimmed.to_string())
}

/// Trim a text cell, mapping blank cells to `None`.
pub fn parse_text(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-31", Some((2024, 1, 31)))]
    #[case(" 2024/01/31 ", Some((2024, 1, 31)))]
    #[case("31/01/2024", Some((2024, 1, 31)))]
    #[case("2024-01-31T10:15:00", Some((2024, 1, 31)))]
    #[case("31/01/2024 10:15:00", Some((2024, 1, 31)))]
    #[case("2024-02-30", None)]
    #[case("", None)]
    #[case("janeiro", None)]
    fn test_parse_date(#[case] cell: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(cell), expected);
    }

    #[rstest]
    #[case("1.25", Some(1.25))]
    #[case("-0.5", Some(-0.5))]
    #[case("2.5%", Some(2.5))]
    #[case("3,75", Some(3.75))]
    #[case(" 12 ", Some(12.0))]
    #[case("", None)]
    #[case("  %", None)]
    fn test_parse_number(#[case] cell: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(cell), Ok(expected));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert_eq!(parse_number(" abc "), Err("abc".to_string()));
        assert!(parse_number("1,234.5").is_err());
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text("  Alice "), Some("Alice".to_string()));
        assert_eq!(parse_text("   "), None);
    }
}
