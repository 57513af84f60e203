//! Column headers of the workbook exports.
//!
//! The defaults are the headers of the source workbook. Every name can be
//! overridden from the report configuration when an export uses different
//! headers.

use serde::{Deserialize, Serialize};

/// Header names used to locate each field in the base and returns sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Policy number (both sheets).
    pub policy_id: String,
    /// Evaluation date (both sheets).
    pub as_of_date: String,
    /// Asset name.
    pub entity_id: String,
    /// Asset return for the evaluation date, in percent.
    pub return_value: String,
    /// Account value of the policy.
    pub account_value: String,
    /// Names of the plan participants.
    pub participant_names: String,
    /// Asset class.
    pub asset_class: String,
    /// Asset type.
    pub asset_type: String,
    /// Share of the portfolio held in the asset, in percent.
    pub portfolio_pct: String,
    /// Policy result over the last month.
    pub return_month: String,
    /// Policy result over the last three months.
    pub return_quarter: String,
    /// Policy result since inception.
    pub return_since_inception: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            policy_id: "Número da Apólice".to_string(),
            as_of_date: "Data de Avaliação".to_string(),
            entity_id: "Nome do Ativo".to_string(),
            return_value: "Retornos".to_string(),
            account_value: "Valor de Conta".to_string(),
            participant_names: "Nome(s) do(s) Participante(s) do Plano".to_string(),
            asset_class: "Classe do Ativo".to_string(),
            asset_type: "Tipo de Ativo".to_string(),
            portfolio_pct: "Portfólio %".to_string(),
            return_month: "Resultado - Mês".to_string(),
            return_quarter: "Resultado - Três Meses".to_string(),
            return_since_inception: "Resultado - Desde o Início".to_string(),
        }
    }
}
