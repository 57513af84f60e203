//! Policy base sheet loader.

use crate::cells::{parse_number, parse_text};
use crate::columns::ColumnNames;
use crate::error::{DataError, Result};
use crate::records::{PolicyMetric, PolicyRecord};
use crate::sheet::Sheet;
use std::collections::HashSet;

/// Policies read from the base sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSheet {
    /// One record per policy, in first-appearance order.
    pub policies: Vec<PolicyRecord>,

    /// Metric columns the sheet does not have.
    pub missing_columns: Vec<String>,
}

impl BaseSheet {
    /// Policy ids in first-appearance order.
    pub fn policy_ids(&self) -> Vec<&str> {
        self.policies.iter().map(|p| p.policy_id.as_str()).collect()
    }

    /// Look up a policy by id.
    pub fn policy(&self, policy_id: &str) -> Option<&PolicyRecord> {
        self.policies.iter().find(|p| p.policy_id == policy_id)
    }

    /// Whether every headline metric column is present.
    pub fn has_all_metrics(&self) -> bool {
        self.missing_columns.is_empty()
    }
}

fn metric_header(columns: &ColumnNames, metric: PolicyMetric) -> &str {
    match metric {
        PolicyMetric::ReturnMonth => &columns.return_month,
        PolicyMetric::ReturnQuarter => &columns.return_quarter,
        PolicyMetric::ReturnSinceInception => &columns.return_since_inception,
    }
}

/// Load the policy base sheet.
///
/// The policy column is required. Metric columns are optional: absent ones
/// are listed in [`BaseSheet::missing_columns`] and blank cells are left out
/// of the policy's metrics. When a policy appears on several rows the first
/// row wins.
///
/// # Errors
///
/// Returns an error if the policy column is missing, the sheet has no rows,
/// or a metric cell is not a number.
pub fn load_base(sheet: &Sheet, columns: &ColumnNames) -> Result<BaseSheet> {
    let policy_col = sheet.require(&columns.policy_id)?;
    if sheet.is_empty() {
        return Err(DataError::EmptySheet(sheet.name().to_string()));
    }

    let mut missing_columns = Vec::new();
    let mut metric_cols = Vec::new();
    for metric in PolicyMetric::ALL {
        let header = metric_header(columns, metric);
        match sheet.column(header) {
            Some(col) => metric_cols.push((metric, col, header)),
            None => missing_columns.push(header.to_string()),
        }
    }

    let mut seen = HashSet::new();
    let mut policies = Vec::new();
    for (row_number, row) in sheet.rows() {
        let Some(policy_id) = parse_text(row.cell(policy_col)) else {
            continue;
        };
        if !seen.insert(policy_id.clone()) {
            continue;
        }

        let mut policy = PolicyRecord::new(policy_id);
        for &(metric, col, header) in &metric_cols {
            let value = parse_number(row.cell(col)).map_err(|value| DataError::InvalidNumber {
                row: row_number,
                column: header.to_string(),
                value,
            })?;
            if let Some(value) = value {
                policy.summary_metrics.insert(metric, value);
            }
        }
        policies.push(policy);
    }

    Ok(BaseSheet {
        policies,
        missing_columns,
    })
}
