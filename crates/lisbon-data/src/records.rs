//! Typed records produced by the ingestion boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One asset observation of a policy at an evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    /// Policy the observation belongs to.
    pub policy_id: String,

    /// Asset name.
    pub entity_id: String,

    /// Evaluation date, `None` when the cell could not be parsed.
    pub as_of_date: Option<NaiveDate>,

    /// Asset return for the evaluation date, in percent. NaN when blank.
    pub return_value: f64,

    /// Account value of the policy at the evaluation date.
    pub account_value: Option<f64>,

    /// Plan participant names.
    pub participant_names: BTreeSet<String>,
}

impl TimeSeriesRow {
    /// Create a row with no account value and no participants.
    pub fn new(
        policy_id: impl Into<String>,
        entity_id: impl Into<String>,
        as_of_date: Option<NaiveDate>,
        return_value: f64,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            entity_id: entity_id.into(),
            as_of_date,
            return_value,
            account_value: None,
            participant_names: BTreeSet::new(),
        }
    }

    /// Set the account value.
    pub const fn with_account_value(mut self, value: f64) -> Self {
        self.account_value = Some(value);
        self
    }

    /// Add a participant name.
    pub fn with_participant(mut self, name: impl Into<String>) -> Self {
        self.participant_names.insert(name.into());
        self
    }
}

/// Allocation columns of a returns-sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Policy the holding belongs to.
    pub policy_id: String,

    /// Evaluation date, `None` when the cell could not be parsed.
    pub as_of_date: Option<NaiveDate>,

    /// Allocation fields of the holding.
    pub allocation: AllocationRow,
}

/// An asset's share of the portfolio at the latest evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Asset name.
    pub entity_id: String,

    /// Asset class (e.g. "Renda Fixa").
    pub asset_class: String,

    /// Asset type (e.g. "ETF").
    pub asset_type: String,

    /// Share of the portfolio, in percent.
    pub portfolio_pct: f64,
}

impl AllocationRow {
    /// Create a new allocation row.
    pub fn new(
        entity_id: impl Into<String>,
        asset_class: impl Into<String>,
        asset_type: impl Into<String>,
        portfolio_pct: f64,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            asset_class: asset_class.into(),
            asset_type: asset_type.into(),
            portfolio_pct,
        }
    }
}

/// Headline results reported per policy in the base sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMetric {
    /// Result over the last month.
    ReturnMonth,
    /// Result over the last three months.
    ReturnQuarter,
    /// Result since the policy started.
    ReturnSinceInception,
}

impl PolicyMetric {
    /// All metrics, in the order the base sheet lists them.
    pub const ALL: [Self; 3] = [
        Self::ReturnMonth,
        Self::ReturnQuarter,
        Self::ReturnSinceInception,
    ];

    /// Stable identifier of the metric.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ReturnMonth => "return_month",
            Self::ReturnQuarter => "return_quarter",
            Self::ReturnSinceInception => "return_since_inception",
        }
    }
}

impl fmt::Display for PolicyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A policy from the base sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Policy number.
    pub policy_id: String,

    /// Headline results present in the sheet for this policy.
    pub summary_metrics: BTreeMap<PolicyMetric, f64>,
}

impl PolicyRecord {
    /// Create a policy with no metrics.
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            summary_metrics: BTreeMap::new(),
        }
    }

    /// Set a metric value.
    pub fn with_metric(mut self, metric: PolicyMetric, value: f64) -> Self {
        self.summary_metrics.insert(metric, value);
        self
    }

    /// Get a metric value.
    pub fn metric(&self, metric: PolicyMetric) -> Option<f64> {
        self.summary_metrics.get(&metric).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_series_row_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 31);
        let row = TimeSeriesRow::new("P-1", "Fund A", date, 1.5)
            .with_account_value(1000.0)
            .with_participant("Ana")
            .with_participant("Ana");

        assert_eq!(row.policy_id, "P-1");
        assert_eq!(row.as_of_date, date);
        assert_eq!(row.account_value, Some(1000.0));
        assert_eq!(row.participant_names.len(), 1);
    }

    #[test]
    fn test_policy_record_metrics() {
        let policy = PolicyRecord::new("P-1").with_metric(PolicyMetric::ReturnMonth, 0.8);

        assert_eq!(policy.metric(PolicyMetric::ReturnMonth), Some(0.8));
        assert_eq!(policy.metric(PolicyMetric::ReturnQuarter), None);
    }

    #[test]
    fn test_policy_metric_order_and_keys() {
        let keys: Vec<_> = PolicyMetric::ALL.iter().map(PolicyMetric::key).collect();
        assert_eq!(
            keys,
            ["return_month", "return_quarter", "return_since_inception"]
        );
        assert_eq!(PolicyMetric::ReturnQuarter.to_string(), "return_quarter");
    }
}
