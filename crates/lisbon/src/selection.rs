//! Policy selection.
//!
//! Every report covers a single policy. Selection scopes the returns sheet to
//! that policy and fixes the reference dates the report is computed at.

use chrono::NaiveDate;
use lisbon_data::{BaseSheet, Holding, PolicyRecord, ReturnsSheet, TimeSeriesRow};
use thiserror::Error;

/// Errors that can occur when selecting a policy.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The base sheet has no policies to choose from.
    #[error("The base sheet lists no policies")]
    NoPolicies,

    /// The requested policy is not in the base sheet.
    #[error("Policy '{0}' is not in the base sheet")]
    UnknownPolicy(String),

    /// None of the policy's returns rows carry a valid evaluation date.
    #[error("Policy '{0}' has no valid evaluation date")]
    NoValidDate(String),
}

/// A policy and the returns data scoped to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySelection {
    /// The selected policy.
    pub policy: PolicyRecord,

    /// Returns rows and holdings of the policy only.
    pub returns: ReturnsSheet,

    /// Latest valid evaluation date of the policy.
    pub latest_date: NaiveDate,

    /// Latest valid evaluation date of the whole returns sheet.
    pub report_date: NaiveDate,
}

impl PolicySelection {
    /// Id of the selected policy.
    pub fn policy_id(&self) -> &str {
        &self.policy.policy_id
    }

    /// Returns rows of the policy.
    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.returns.rows
    }

    /// Holdings of the policy, `None` when the sheet has no allocation columns.
    pub fn holdings(&self) -> Option<&[Holding]> {
        self.returns.holdings.as_deref()
    }

    /// Participant names, unique, in order of first appearance.
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.returns.rows {
            for name in &row.participant_names {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Account value of the first row dated at the policy's latest date.
    pub fn account_value(&self) -> Option<f64> {
        self.returns
            .rows
            .iter()
            .find(|r| r.as_of_date == Some(self.latest_date))
            .and_then(|r| r.account_value)
            .filter(|v| v.is_finite())
    }
}

/// Select a policy and scope the returns sheet to it.
///
/// Without an explicit id the first policy of the base sheet is selected.
///
/// # Errors
///
/// Returns an error if the base sheet is empty, the policy is unknown, or
/// none of its returns rows has a valid evaluation date.
pub fn select_policy(
    base: &BaseSheet,
    returns: &ReturnsSheet,
    policy_id: Option<&str>,
) -> Result<PolicySelection, SelectionError> {
    let policy = match policy_id {
        Some(id) => base
            .policy(id)
            .ok_or_else(|| SelectionError::UnknownPolicy(id.to_string()))?,
        None => base.policies.first().ok_or(SelectionError::NoPolicies)?,
    };

    let scoped = returns.for_policy(&policy.policy_id);
    let latest_date = scoped
        .latest_date()
        .ok_or_else(|| SelectionError::NoValidDate(policy.policy_id.clone()))?;
    let report_date = returns.latest_date().unwrap_or(latest_date);

    Ok(PolicySelection {
        policy: policy.clone(),
        returns: scoped,
        latest_date,
        report_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 10, d)
    }

    fn base() -> BaseSheet {
        BaseSheet {
            policies: vec![PolicyRecord::new("A1"), PolicyRecord::new("B2")],
            missing_columns: vec![],
        }
    }

    fn returns() -> ReturnsSheet {
        ReturnsSheet {
            rows: vec![
                TimeSeriesRow::new("A1", "Alpha", date(15), 1.0)
                    .with_account_value(900.0)
                    .with_participant("Rui"),
                TimeSeriesRow::new("A1", "Alpha", date(20), 1.0)
                    .with_account_value(1000.0)
                    .with_participant("Ana"),
                TimeSeriesRow::new("A1", "Beta", date(20), 2.0)
                    .with_account_value(1100.0)
                    .with_participant("Rui"),
                TimeSeriesRow::new("B2", "Gamma", date(31), 3.0),
                TimeSeriesRow::new("C3", "Delta", None, 3.0),
            ],
            ..ReturnsSheet::default()
        }
    }

    #[test]
    fn test_defaults_to_first_policy() {
        let selection = select_policy(&base(), &returns(), None).unwrap();

        assert_eq!(selection.policy_id(), "A1");
        assert_eq!(selection.rows().len(), 3);
        assert_eq!(selection.latest_date, date(20).unwrap());
        assert_eq!(selection.report_date, date(31).unwrap());
    }

    #[test]
    fn test_summary_fields() {
        let selection = select_policy(&base(), &returns(), Some("A1")).unwrap();

        assert_eq!(selection.participants(), ["Rui", "Ana"]);
        assert_eq!(selection.account_value(), Some(1000.0));
        assert_eq!(selection.holdings(), None);
    }

    #[test]
    fn test_unknown_policy() {
        let err = select_policy(&base(), &returns(), Some("Z9")).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownPolicy(id) if id == "Z9"));
    }

    #[test]
    fn test_policy_without_dates() {
        let base = BaseSheet {
            policies: vec![PolicyRecord::new("C3")],
            missing_columns: vec![],
        };
        let err = select_policy(&base, &returns(), None).unwrap_err();
        assert!(matches!(err, SelectionError::NoValidDate(_)));
    }

    #[test]
    fn test_empty_base_sheet() {
        let base = BaseSheet {
            policies: vec![],
            missing_columns: vec![],
        };
        let err = select_policy(&base, &returns(), None).unwrap_err();
        assert!(matches!(err, SelectionError::NoPolicies));
    }
}
