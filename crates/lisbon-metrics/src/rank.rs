//! Best and worst performer selection.

use crate::aggregate::AggregatedResult;

/// The `n` best performers of a ranked result.
///
/// Returns the first `n` entries, or the whole result when it is shorter.
/// `n == 0` yields an empty result.
pub fn top_n(result: &AggregatedResult, n: usize) -> AggregatedResult {
    let take = n.min(result.len());
    AggregatedResult::from_ranked(result.entries()[..take].to_vec())
}

/// The `n` worst performers of a ranked result.
///
/// Returns the last `n` entries in their ranked (descending) order, so the
/// worst performer comes last. `n == 0` yields an empty result.
///
/// # Examples
///
/// ```
/// use lisbon_metrics::{AggregatedResult, bottom_n};
/// use std::collections::HashMap;
///
/// let totals = HashMap::from([
///     ("A".to_string(), 3.0),
///     ("B".to_string(), 1.0),
///     ("C".to_string(), -2.0),
/// ]);
/// let ranked = AggregatedResult::from_totals(totals);
///
/// assert_eq!(bottom_n(&ranked, 2).categories(), ["B", "C"]);
/// ```
pub fn bottom_n(result: &AggregatedResult, n: usize) -> AggregatedResult {
    let skip = result.len().saturating_sub(n);
    AggregatedResult::from_ranked(result.entries()[skip..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn ranked(len: usize) -> AggregatedResult {
        let totals = (0..len)
            .map(|i| (format!("E{i:02}"), (len - i) as f64))
            .collect::<HashMap<_, _>>();
        AggregatedResult::from_totals(totals)
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(7, 0, 0)]
    #[case(7, 3, 3)]
    #[case(7, 7, 7)]
    #[case(3, 5, 3)]
    fn test_slice_lengths(#[case] len: usize, #[case] n: usize, #[case] expected: usize) {
        let result = ranked(len);
        assert_eq!(top_n(&result, n).len(), expected);
        assert_eq!(bottom_n(&result, n).len(), expected);
    }

    #[test]
    fn test_top_n_keeps_leading_entries() {
        let result = ranked(6);
        assert_eq!(top_n(&result, 2).categories(), ["E00", "E01"]);
    }

    #[test]
    fn test_bottom_n_keeps_descending_tail() {
        let result = ranked(6);
        let bottom = bottom_n(&result, 3);

        assert_eq!(bottom.categories(), ["E03", "E04", "E05"]);
        assert!(bottom.values().windows(2).all(|w| w[0] >= w[1]));
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(9)]
    fn test_top_and_bottom_cover_result(#[case] len: usize) {
        let result = ranked(len);
        let n = len;
        let top = top_n(&result, n);
        let bottom = bottom_n(&result, n);

        assert_eq!(top, result);
        assert_eq!(bottom, result);

        // With a smaller n the two halves still rebuild the result once the overlap is dropped.
        let half = len.div_ceil(2);
        let mut rebuilt = top_n(&result, half).entries().to_vec();
        let tail = bottom_n(&result, half);
        let overlap = (2 * half).saturating_sub(len);
        rebuilt.extend(tail.entries()[overlap..].iter().cloned());
        assert_eq!(rebuilt, result.entries());
    }
}
