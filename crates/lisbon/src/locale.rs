//! Report language.

use chrono::{Datelike, NaiveDate};
use lisbon_data::PolicyMetric;
use lisbon_metrics::AggregationWindow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use thousands::Separable;

/// Fixed texts of the report in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLabels {
    /// Month names, January first.
    pub months: [&'static str; 12],
    /// Summary label of the policy number.
    pub policy: &'static str,
    /// Summary label of the participant names.
    pub participants: &'static str,
    /// Summary label of the account value.
    pub account_value: &'static str,
    /// Summary label of the evaluation month.
    pub evaluation_month: &'static str,
    /// Shown when a summary value is unavailable.
    pub not_available: &'static str,
    /// Portfolio performance chart title.
    pub portfolio_title: &'static str,
    /// Asset returns chart title, followed by the window name.
    pub asset_returns_title: &'static str,
    /// Best performers chart title, followed by the window name.
    pub best_title: &'static str,
    /// Worst performers chart title, followed by the window name.
    pub worst_title: &'static str,
    /// Allocation by asset class chart title.
    pub class_title: &'static str,
    /// Allocation by asset type chart title.
    pub type_title: &'static str,
    /// Allocation by asset chart title.
    pub asset_title: &'static str,
    /// Month window name.
    pub month_window: &'static str,
    /// Quarter window name.
    pub quarter_window: &'static str,
    /// Portfolio performance period names: month, three months, since inception.
    pub periods: [&'static str; 3],
    /// Portfolio performance x-axis label.
    pub period_axis: &'static str,
    /// Asset x-axis label.
    pub asset_axis: &'static str,
    /// Return y-axis label.
    pub return_axis: &'static str,
    /// Portfolio share y-axis label.
    pub share_axis: &'static str,
}

const PORTUGUESE: ReportLabels = ReportLabels {
    months: [
        "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
        "Outubro", "Novembro", "Dezembro",
    ],
    policy: "Número da Apólice",
    participants: "Nome(s) do(s) Participante(s) do Plano",
    account_value: "Valor de Conta",
    evaluation_month: "Mês da Apuração",
    not_available: "n/a",
    portfolio_title: "Retornos da Carteira",
    asset_returns_title: "Retornos dos Ativos",
    best_title: "Maiores Retornos",
    worst_title: "Menores Retornos",
    class_title: "Distribuição por Classe do Ativo",
    type_title: "Distribuição por Tipo de Ativo",
    asset_title: "Distribuição por Ativo",
    month_window: "Mês",
    quarter_window: "Trimestre",
    periods: ["Mês", "Três Meses", "Desde o Início"],
    period_axis: "Período",
    asset_axis: "Ativo",
    return_axis: "Retorno (%)",
    share_axis: "Portfólio (%)",
};

const ENGLISH: ReportLabels = ReportLabels {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    policy: "Policy Number",
    participants: "Plan Participant(s)",
    account_value: "Account Value",
    evaluation_month: "Evaluation Month",
    not_available: "n/a",
    portfolio_title: "Portfolio Returns",
    asset_returns_title: "Asset Returns",
    best_title: "Best Returns",
    worst_title: "Worst Returns",
    class_title: "Allocation by Asset Class",
    type_title: "Allocation by Asset Type",
    asset_title: "Allocation by Asset",
    month_window: "Month",
    quarter_window: "Quarter",
    periods: ["Month", "Three Months", "Since Inception"],
    period_axis: "Period",
    asset_axis: "Asset",
    return_axis: "Return (%)",
    share_axis: "Portfolio (%)",
};

/// Error returned when a locale name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown locale '{0}' (expected pt or en)")]
pub struct UnknownLocale(pub String);

/// Language of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Portuguese.
    #[default]
    Pt,

    /// English.
    En,
}

impl Locale {
    /// Short code of the locale.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    /// Fixed report texts.
    pub const fn labels(&self) -> &'static ReportLabels {
        match self {
            Self::Pt => &PORTUGUESE,
            Self::En => &ENGLISH,
        }
    }

    /// Name of the month of `date`.
    pub fn month_name(&self, date: NaiveDate) -> &'static str {
        self.labels().months[date.month0() as usize]
    }

    /// Name of an aggregation window.
    pub const fn window_name(&self, window: AggregationWindow) -> &'static str {
        match window {
            AggregationWindow::Month => self.labels().month_window,
            AggregationWindow::Quarter => self.labels().quarter_window,
        }
    }

    /// Display name of a portfolio performance period.
    pub const fn period_name(&self, metric: PolicyMetric) -> &'static str {
        let periods = &self.labels().periods;
        match metric {
            PolicyMetric::ReturnMonth => periods[0],
            PolicyMetric::ReturnQuarter => periods[1],
            PolicyMetric::ReturnSinceInception => periods[2],
        }
    }

    /// Report title for `date`: `"{title} - {month}"`.
    pub fn report_title(&self, title: &str, date: NaiveDate) -> String {
        format!("{title} - {}", self.month_name(date))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt-pt" | "portuguese" => Ok(Self::Pt),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Format an amount as `$1,234.56`.
///
/// The sign follows the dollar sign, as in `$-42.00`.
///
/// # Examples
///
/// ```
/// use lisbon::format_currency;
///
/// assert_eq!(format_currency(1234567.891), "$1,234,567.89");
/// assert_eq!(format_currency(-42.0), "$-42.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format!("{amount:.2}").separate_with_commas())
}
