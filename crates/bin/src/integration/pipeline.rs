//! Report run: sheets in, document out.

use super::images::{ImageError, ImageStore};
use super::sections::{SECTIONS, SectionContext, SectionOutcome};
use crate::config::ReportConfig;
use lisbon::{Locale, PolicySelection, SelectionError, format_currency, select_policy};
use lisbon_data::{BaseSheet, ColumnNames, DataError, ReturnsSheet, Sheet, load_base, load_returns};
use lisbon_output::{Document, SummaryRecord, WriteError, assemble, render_document};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Error type for report runs.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Sheet ingestion error.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    /// Policy selection error.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    /// Chart rendering or export error.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
    /// Document writing error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

/// Inputs of a report run.
#[derive(Debug, Clone)]
pub(crate) struct ReportRequest {
    /// Base sheet CSV.
    pub base: PathBuf,
    /// Returns sheet CSV.
    pub returns: PathBuf,
    /// Policy to report on; the first policy of the base sheet when `None`.
    pub policy: Option<String>,
    /// Output document path.
    pub output: PathBuf,
    /// Directory to keep the chart images in; a temporary one when `None`.
    pub images_dir: Option<PathBuf>,
    /// Report settings.
    pub config: ReportConfig,
}

/// What a report run produced.
#[derive(Debug, Clone)]
pub(crate) struct ReportSummary {
    /// Selected policy.
    pub policy_id: String,
    /// Number of pages written.
    pub pages: usize,
    /// Number of charts in the report.
    pub charts: usize,
    /// Path of the written document.
    pub output: PathBuf,
}

/// Load the base sheet.
pub(crate) fn load_base_sheet(
    path: &Path,
    columns: &ColumnNames,
) -> Result<BaseSheet, PipelineError> {
    let base = load_base(&Sheet::from_path("base", path)?, columns)?;
    for column in &base.missing_columns {
        warn!(sheet = "base", column = %column, "Optional column missing");
    }
    Ok(base)
}

/// Load the returns sheet.
pub(crate) fn load_returns_sheet(
    path: &Path,
    columns: &ColumnNames,
) -> Result<ReturnsSheet, PipelineError> {
    let returns = load_returns(&Sheet::from_path("returns", path)?, columns)?;
    for column in &returns.missing_columns {
        warn!(sheet = "returns", column = %column, "Optional column missing");
    }
    Ok(returns)
}

/// Summary lines of the title page.
pub(crate) fn build_summary(selection: &PolicySelection, locale: Locale) -> SummaryRecord {
    let labels = locale.labels();
    let participants = selection.participants();
    let participants = if participants.is_empty() {
        labels.not_available.to_string()
    } else {
        participants.join(", ")
    };
    let account_value = selection
        .account_value()
        .map_or_else(|| labels.not_available.to_string(), format_currency);

    SummaryRecord::new()
        .with(labels.policy, selection.policy_id())
        .with(labels.participants, participants)
        .with(labels.account_value, account_value)
        .with(labels.evaluation_month, locale.month_name(selection.report_date))
}

/// Render every section for the selected policy and assemble the document.
pub(crate) fn build_document(
    selection: &PolicySelection,
    missing_base_columns: &[String],
    config: &ReportConfig,
    store: &mut ImageStore,
) -> Result<Document, PipelineError> {
    let ctx = SectionContext {
        selection,
        missing_base_columns,
        columns: &config.columns,
        locale: config.locale,
        top_n: config.top_n,
    };

    let mut images = Vec::new();
    for section in SECTIONS {
        match section.build(&ctx) {
            SectionOutcome::Charts(charts) => {
                info!(section = %section, charts = charts.len(), "Rendered section");
                for chart in charts {
                    images.push(store.store(&chart.slug, chart.spec)?);
                }
            }
            SectionOutcome::Skipped(reason) => {
                warn!(section = %section, reason = %reason, "Skipping section");
            }
        }
    }

    let summary = build_summary(selection, config.locale);
    let title = config.locale.report_title(&config.title, selection.report_date);
    Ok(assemble(images, &summary, &title))
}

/// Run a report end to end and write the document.
pub(crate) fn run_report(request: &ReportRequest) -> Result<ReportSummary, PipelineError> {
    let columns = &request.config.columns;
    let base = load_base_sheet(&request.base, columns)?;
    let returns = load_returns_sheet(&request.returns, columns)?;

    let selection = select_policy(&base, &returns, request.policy.as_deref())?;
    info!(
        policy = selection.policy_id(),
        rows = selection.rows().len(),
        latest = %selection.latest_date,
        "Selected policy"
    );

    let mut store = match &request.images_dir {
        Some(dir) => ImageStore::in_dir(dir)?,
        None => ImageStore::temporary()?,
    };
    debug!(dir = %store.dir().display(), "Chart image directory");

    let document = build_document(&selection, &base.missing_columns, &request.config, &mut store)?;
    render_document(&document, request.config.format, &request.output)?;
    info!(
        path = %request.output.display(),
        format = %request.config.format,
        pages = document.page_count(),
        "Wrote report"
    );

    Ok(ReportSummary {
        policy_id: selection.policy_id().to_string(),
        pages: document.page_count(),
        charts: document.images.len(),
        output: request.output.clone(),
    })
}
