//! Headline policy results.

use lisbon_data::{PolicyMetric, PolicyRecord};

/// The policy's month, quarter and since-inception results, best first.
///
/// Returns `None` unless all three results are present. Equal results keep
/// the month, quarter, since-inception order.
pub fn portfolio_returns(policy: &PolicyRecord) -> Option<Vec<(PolicyMetric, f64)>> {
    let mut results = PolicyMetric::ALL
        .iter()
        .map(|&metric| policy.metric(metric).map(|value| (metric, value)))
        .collect::<Option<Vec<_>>>()?;
    results.sort_by(|a, b| b.1.total_cmp(&a.1));
    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_returns_sorted_descending() {
        let policy = PolicyRecord::new("101")
            .with_metric(PolicyMetric::ReturnMonth, -0.4)
            .with_metric(PolicyMetric::ReturnQuarter, 1.2)
            .with_metric(PolicyMetric::ReturnSinceInception, 0.9);

        assert_eq!(
            portfolio_returns(&policy),
            Some(vec![
                (PolicyMetric::ReturnQuarter, 1.2),
                (PolicyMetric::ReturnSinceInception, 0.9),
                (PolicyMetric::ReturnMonth, -0.4),
            ])
        );
    }

    #[test]
    fn test_portfolio_returns_needs_every_metric() {
        let policy = PolicyRecord::new("101")
            .with_metric(PolicyMetric::ReturnMonth, 1.0)
            .with_metric(PolicyMetric::ReturnQuarter, 2.0);

        assert_eq!(portfolio_returns(&policy), None);
    }

    #[test]
    fn test_equal_results_keep_sheet_order() {
        let policy = PolicyMetric::ALL
            .iter()
            .fold(PolicyRecord::new("101"), |p, &m| p.with_metric(m, 1.0));
        let order: Vec<_> = portfolio_returns(&policy)
            .unwrap()
            .into_iter()
            .map(|(metric, _)| metric)
            .collect();

        assert_eq!(order, PolicyMetric::ALL);
    }
}
