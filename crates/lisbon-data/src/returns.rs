//! Asset returns sheet loader.

use crate::cells::{parse_date, parse_number, parse_text};
use crate::columns::ColumnNames;
use crate::error::{DataError, Result};
use crate::records::{AllocationRow, Holding, TimeSeriesRow};
use crate::sheet::{Row, Sheet};
use chrono::NaiveDate;
use tracing::warn;

/// Rows read from the returns sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnsSheet {
    /// One row per asset observation.
    pub rows: Vec<TimeSeriesRow>,

    /// Allocation columns of every row, `None` when the sheet lacks them.
    pub holdings: Option<Vec<Holding>>,

    /// Optional columns the sheet does not have.
    pub missing_columns: Vec<String>,
}

impl ReturnsSheet {
    /// Latest valid evaluation date across all rows.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().filter_map(|r| r.as_of_date).max()
    }

    /// Rows and holdings of a single policy.
    pub fn for_policy(&self, policy_id: &str) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|r| r.policy_id == policy_id)
                .cloned()
                .collect(),
            holdings: self.holdings.as_ref().map(|holdings| {
                holdings
                    .iter()
                    .filter(|h| h.policy_id == policy_id)
                    .cloned()
                    .collect()
            }),
            missing_columns: self.missing_columns.clone(),
        }
    }
}

struct Layout {
    policy_id: usize,
    as_of_date: usize,
    entity_id: Option<usize>,
    return_value: Option<usize>,
    account_value: Option<usize>,
    participant_names: Option<usize>,
    allocation: Option<(usize, usize, usize)>,
}

impl Layout {
    fn resolve(sheet: &Sheet, columns: &ColumnNames) -> Result<(Self, Vec<String>)> {
        // The date column is checked first: without it no report can be built.
        let as_of_date =
            sheet
                .column(&columns.as_of_date)
                .ok_or_else(|| DataError::MissingDateColumn {
                    sheet: sheet.name().to_string(),
                    column: columns.as_of_date.clone(),
                })?;

        let mut missing = Vec::new();
        let mut optional = |header: &str| {
            let col = sheet.column(header);
            if col.is_none() {
                missing.push(header.to_string());
            }
            col
        };

        let entity_id = optional(&columns.entity_id);
        let return_value = optional(&columns.return_value);
        let account_value = optional(&columns.account_value);
        let participant_names = optional(&columns.participant_names);
        let asset_class = optional(&columns.asset_class);
        let asset_type = optional(&columns.asset_type);
        let portfolio_pct = optional(&columns.portfolio_pct);

        let allocation = match (asset_class, asset_type, portfolio_pct) {
            (Some(class), Some(kind), Some(pct)) => Some((class, kind, pct)),
            _ => None,
        };

        let layout = Self {
            policy_id: sheet.require(&columns.policy_id)?,
            as_of_date,
            entity_id,
            return_value,
            account_value,
            participant_names,
            allocation,
        };
        Ok((layout, missing))
    }
}

fn number(
    row: &Row<'_>,
    row_number: usize,
    column: usize,
    header: &str,
) -> Result<Option<f64>> {
    parse_number(row.cell(column)).map_err(|value| DataError::InvalidNumber {
        row: row_number,
        column: header.to_string(),
        value,
    })
}

/// Parse a cell of an optional column, treating unparseable values as blank.
fn lenient_number(row: &Row<'_>, row_number: usize, column: usize, header: &str) -> Option<f64> {
    parse_number(row.cell(column)).unwrap_or_else(|value| {
        warn!(row = row_number, column = header, value = %value, "Ignoring invalid number");
        None
    })
}

/// Load the asset returns sheet.
///
/// Policy and evaluation date columns are required; a missing date column is
/// reported as [`DataError::MissingDateColumn`]. Every other column is
/// optional and is listed in [`ReturnsSheet::missing_columns`] when absent:
/// rows then carry an empty asset name or a `NaN` return. Holdings are only
/// produced when all three allocation columns are present. Invalid account
/// values and portfolio shares are logged and read as blank.
///
/// # Errors
///
/// Returns an error if a required column is missing or a return cell is not
/// a number.
pub fn load_returns(sheet: &Sheet, columns: &ColumnNames) -> Result<ReturnsSheet> {
    let (layout, missing_columns) = Layout::resolve(sheet, columns)?;

    let mut rows = Vec::with_capacity(sheet.len());
    let mut holdings = layout.allocation.map(|_| Vec::with_capacity(sheet.len()));

    for (row_number, row) in sheet.rows() {
        let policy_id = parse_text(row.cell(layout.policy_id)).unwrap_or_default();
        let entity_id = row
            .cell_opt(layout.entity_id)
            .and_then(parse_text)
            .unwrap_or_default();
        let as_of_date = parse_date(row.cell(layout.as_of_date));

        let return_value = match layout.return_value {
            Some(col) => number(&row, row_number, col, &columns.return_value)?,
            None => None,
        }
        .unwrap_or(f64::NAN);
        let account_value = layout
            .account_value
            .and_then(|col| lenient_number(&row, row_number, col, &columns.account_value));

        let mut series_row = TimeSeriesRow::new(policy_id, entity_id, as_of_date, return_value);
        series_row.account_value = account_value;
        if let Some(names) = row.cell_opt(layout.participant_names).and_then(parse_text) {
            series_row.participant_names.insert(names);
        }

        if let (Some(holdings), Some((class, kind, pct))) = (holdings.as_mut(), layout.allocation)
        {
            // Blank shares do not hold any of the portfolio.
            let portfolio_pct =
                lenient_number(&row, row_number, pct, &columns.portfolio_pct).unwrap_or(0.0);
            holdings.push(Holding {
                policy_id: series_row.policy_id.clone(),
                as_of_date,
                allocation: AllocationRow::new(
                    series_row.entity_id.clone(),
                    parse_text(row.cell(class)).unwrap_or_default(),
                    parse_text(row.cell(kind)).unwrap_or_default(),
                    portfolio_pct,
                ),
            });
        }

        rows.push(series_row);
    }

    Ok(ReturnsSheet {
        rows,
        holdings,
        missing_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Número da Apólice,Data de Avaliação,Nome do Ativo,Retornos,Valor de Conta,\
                          Nome(s) do(s) Participante(s) do Plano,Classe do Ativo,Tipo de Ativo,Portfólio %";

    fn sheet(body: &str) -> Sheet {
        Sheet::from_reader("returns", format!("{HEADER}\n{body}").as_bytes()).unwrap()
    }

    #[test]
    fn test_load_returns_full_row() {
        let sheet = sheet("101,2024-06-28,Fund A,1.25,5000.5,Ana Souza,Equity,ETF,40%\n");
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();

        assert!(returns.missing_columns.is_empty());
        let row = &returns.rows[0];
        assert_eq!(row.policy_id, "101");
        assert_eq!(row.entity_id, "Fund A");
        assert_eq!(row.as_of_date, NaiveDate::from_ymd_opt(2024, 6, 28));
        assert_eq!(row.return_value, 1.25);
        assert_eq!(row.account_value, Some(5000.5));
        assert!(row.participant_names.contains("Ana Souza"));

        let holding = &returns.holdings.as_ref().unwrap()[0];
        assert_eq!(holding.allocation.asset_class, "Equity");
        assert_eq!(holding.allocation.portfolio_pct, 40.0);
    }

    #[test]
    fn test_invalid_date_and_blank_return_are_kept() {
        let sheet = sheet("101,soon,Fund A,,,,Equity,ETF,\n");
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();
        let row = &returns.rows[0];

        assert_eq!(row.as_of_date, None);
        assert!(row.return_value.is_nan());
        assert_eq!(row.account_value, None);
        assert!(row.participant_names.is_empty());
        assert_eq!(returns.holdings.unwrap()[0].allocation.portfolio_pct, 0.0);
    }

    #[test]
    fn test_missing_date_column_is_reported_first() {
        let sheet = Sheet::from_reader("returns", "Nome do Ativo\nFund A\n".as_bytes()).unwrap();
        let err = load_returns(&sheet, &ColumnNames::default()).unwrap_err();

        assert!(matches!(err, DataError::MissingDateColumn { .. }));
    }

    #[test]
    fn test_allocation_needs_all_three_columns() {
        let csv = "Número da Apólice,Data de Avaliação,Nome do Ativo,Retornos,Classe do Ativo\n\
                   101,2024-06-28,Fund A,1.0,Equity\n";
        let sheet = Sheet::from_reader("returns", csv.as_bytes()).unwrap();
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();

        assert!(returns.holdings.is_none());
        assert!(returns.missing_columns.contains(&"Tipo de Ativo".to_string()));
        assert!(returns.missing_columns.contains(&"Valor de Conta".to_string()));
    }

    #[test]
    fn test_for_policy_scopes_rows_and_holdings() {
        let sheet = sheet(
            "101,2024-06-28,Fund A,1,,,Equity,ETF,60\n\
             202,2024-06-28,Fund B,2,,,Bonds,Fund,40\n\
             101,2024-05-31,Fund A,3,,,Equity,ETF,55\n",
        );
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();
        let scoped = returns.for_policy("101");

        assert_eq!(scoped.rows.len(), 2);
        assert_eq!(scoped.holdings.as_ref().map(Vec::len), Some(2));
        assert_eq!(returns.latest_date(), NaiveDate::from_ymd_opt(2024, 6, 28));
    }

    #[test]
    fn test_asset_and_return_columns_are_optional() {
        let csv = "Número da Apólice,Data de Avaliação,Nome do Ativo\n101,2024-06-28,Fund A\n";
        let sheet = Sheet::from_reader("returns", csv.as_bytes()).unwrap();
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();

        assert!(returns.missing_columns.contains(&"Retornos".to_string()));
        assert!(!returns.missing_columns.contains(&"Nome do Ativo".to_string()));
        assert_eq!(returns.rows[0].entity_id, "Fund A");
        assert!(returns.rows[0].return_value.is_nan());
        assert_eq!(returns.latest_date(), NaiveDate::from_ymd_opt(2024, 6, 28));
    }

    #[test]
    fn test_invalid_account_value_and_share_read_as_blank() {
        let sheet = sheet("101,2024-06-28,Fund A,1.0,-,Ana,Equity,ETF,n/a\n");
        let returns = load_returns(&sheet, &ColumnNames::default()).unwrap();

        assert_eq!(returns.rows[0].account_value, None);
        assert_eq!(returns.rows[0].return_value, 1.0);
        assert_eq!(returns.holdings.unwrap()[0].allocation.portfolio_pct, 0.0);
    }

    #[test]
    fn test_invalid_return_is_an_error() {
        let sheet = sheet("101,2024-06-28,Fund A,abc,,,Equity,ETF,1\n");
        let err = load_returns(&sheet, &ColumnNames::default()).unwrap_err();

        assert!(matches!(err, DataError::InvalidNumber { row: 1, .. }));
    }
}
