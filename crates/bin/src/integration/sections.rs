//! Report sections.
//!
//! Each section turns the selected policy into zero or more charts. A section
//! without data is skipped with a reason; the rest of the report is unaffected.

use lisbon::{Locale, PolicySelection};
use lisbon_charts::{ChartLabels, ChartSpec, build_bar, build_pie, format_percent};
use lisbon_data::{AllocationRow, ColumnNames};
use lisbon_metrics::{
    AggregatedResult, AggregationWindow, aggregate, allocation_snapshot, bottom_n,
    portfolio_returns, top_n,
};
use std::fmt;

/// A chart produced by a section.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SectionChart {
    /// File name stem of the exported image.
    pub slug: String,
    /// Chart description.
    pub spec: ChartSpec,
}

/// Result of building one section.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SectionOutcome {
    /// Charts to render, in order.
    Charts(Vec<SectionChart>),
    /// Nothing to draw, with the reason.
    Skipped(String),
}

/// Inputs shared by every section.
#[derive(Debug)]
pub(crate) struct SectionContext<'a> {
    /// Selected policy and its returns rows.
    pub selection: &'a PolicySelection,
    /// Result columns the base sheet lacks.
    pub missing_base_columns: &'a [String],
    /// Column headers of the sheets.
    pub columns: &'a ColumnNames,
    /// Report language.
    pub locale: Locale,
    /// Number of assets in the best and worst performer charts.
    pub top_n: usize,
}

/// The report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    /// Month, quarter and since-inception results of the policy.
    Portfolio,
    /// Summed asset returns over a window.
    AssetReturns(AggregationWindow),
    /// Best and worst assets over a window.
    BestWorst(AggregationWindow),
    /// Latest allocation by asset class.
    AllocationByClass,
    /// Latest allocation by asset type.
    AllocationByType,
    /// Latest allocation by asset.
    AllocationByAsset,
}

/// Sections in report order.
pub(crate) const SECTIONS: [Section; 8] = [
    Section::Portfolio,
    Section::AssetReturns(AggregationWindow::Quarter),
    Section::AssetReturns(AggregationWindow::Month),
    Section::BestWorst(AggregationWindow::Quarter),
    Section::BestWorst(AggregationWindow::Month),
    Section::AllocationByClass,
    Section::AllocationByType,
    Section::AllocationByAsset,
];

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portfolio => write!(f, "portfolio"),
            Self::AssetReturns(window) => write!(f, "asset_returns_{}", window.key()),
            Self::BestWorst(window) => write!(f, "best_worst_{}", window.key()),
            Self::AllocationByClass => write!(f, "allocation_class"),
            Self::AllocationByType => write!(f, "allocation_type"),
            Self::AllocationByAsset => write!(f, "allocation_asset"),
        }
    }
}

impl Section {
    /// Build the charts of this section.
    pub(crate) fn build(&self, ctx: &SectionContext<'_>) -> SectionOutcome {
        match self {
            Self::Portfolio => portfolio(ctx),
            Self::AssetReturns(window) => asset_returns(ctx, *window),
            Self::BestWorst(window) => best_worst(ctx, *window),
            Self::AllocationByClass => allocation(ctx, *self, |row| row.asset_class.clone()),
            Self::AllocationByType => allocation(ctx, *self, |row| row.asset_type.clone()),
            Self::AllocationByAsset => allocation(ctx, *self, |row| row.entity_id.clone()),
        }
    }
}

impl SectionContext<'_> {
    /// Skip reason when the returns sheet lacks any of `headers`.
    fn lacking_returns_columns(&self, headers: &[&str]) -> Option<SectionOutcome> {
        let missing: Vec<&str> = headers
            .iter()
            .copied()
            .filter(|h| self.selection.returns.missing_columns.iter().any(|m| m == h))
            .collect();
        (!missing.is_empty()).then(|| {
            let missing = missing.join(", ");
            SectionOutcome::Skipped(format!("returns sheet lacks column(s): {missing}"))
        })
    }

    fn lacking_asset_returns(&self) -> Option<SectionOutcome> {
        self.lacking_returns_columns(&[&self.columns.entity_id, &self.columns.return_value])
    }
}

fn single(slug: String, spec: Option<ChartSpec>, reason: &str) -> SectionOutcome {
    spec.map_or_else(
        || SectionOutcome::Skipped(reason.to_string()),
        |spec| SectionOutcome::Charts(vec![SectionChart { slug, spec }]),
    )
}

fn portfolio(ctx: &SectionContext<'_>) -> SectionOutcome {
    if !ctx.missing_base_columns.is_empty() {
        return SectionOutcome::Skipped(format!(
            "base sheet lacks column(s): {}",
            ctx.missing_base_columns.join(", ")
        ));
    }
    let Some(results) = portfolio_returns(&ctx.selection.policy) else {
        return SectionOutcome::Skipped("policy lacks one or more results".to_string());
    };

    let labels = ctx.locale.labels();
    let (categories, values) = results
        .into_iter()
        .map(|(metric, value)| (ctx.locale.period_name(metric).to_string(), value))
        .unzip();
    let spec = build_bar(
        ChartLabels::titled(labels.portfolio_title)
            .with_axes(labels.period_axis, labels.return_axis),
        categories,
        values,
        format_percent,
    );
    single(Section::Portfolio.to_string(), spec, "no results to draw")
}

fn windowed(
    ctx: &SectionContext<'_>,
    window: AggregationWindow,
) -> Result<AggregatedResult, SectionOutcome> {
    if let Some(skipped) = ctx.lacking_asset_returns() {
        return Err(skipped);
    }
    let result = aggregate(ctx.selection.rows(), window);
    if result.is_empty() {
        Err(SectionOutcome::Skipped(format!("no returns in the {window} window")))
    } else {
        Ok(result)
    }
}

fn returns_chart(
    title: String,
    ctx: &SectionContext<'_>,
    result: &AggregatedResult,
) -> Option<ChartSpec> {
    let labels = ctx.locale.labels();
    build_bar(
        ChartLabels::titled(title).with_axes(labels.asset_axis, labels.return_axis),
        result.categories(),
        result.values(),
        format_percent,
    )
}

fn asset_returns(ctx: &SectionContext<'_>, window: AggregationWindow) -> SectionOutcome {
    let result = match windowed(ctx, window) {
        Ok(result) => result,
        Err(skipped) => return skipped,
    };

    let title = format!(
        "{} - {}",
        ctx.locale.labels().asset_returns_title,
        ctx.locale.window_name(window)
    );
    let spec = returns_chart(title, ctx, &result);
    single(Section::AssetReturns(window).to_string(), spec, "no returns to draw")
}

fn best_worst(ctx: &SectionContext<'_>, window: AggregationWindow) -> SectionOutcome {
    let result = match windowed(ctx, window) {
        Ok(result) => result,
        Err(skipped) => return skipped,
    };

    let labels = ctx.locale.labels();
    let window_name = ctx.locale.window_name(window);
    let best = returns_chart(
        format!("{} - {window_name}", labels.best_title),
        ctx,
        &top_n(&result, ctx.top_n),
    );
    let worst = returns_chart(
        format!("{} - {window_name}", labels.worst_title),
        ctx,
        &bottom_n(&result, ctx.top_n),
    );

    // Both charts or neither.
    match (best, worst) {
        (Some(best), Some(worst)) => SectionOutcome::Charts(vec![
            SectionChart {
                slug: format!("best_{}", window.key()),
                spec: best,
            },
            SectionChart {
                slug: format!("worst_{}", window.key()),
                spec: worst,
            },
        ]),
        _ => SectionOutcome::Skipped(format!("no assets to rank (n = {})", ctx.top_n)),
    }
}

fn allocation(
    ctx: &SectionContext<'_>,
    section: Section,
    category: fn(&AllocationRow) -> String,
) -> SectionOutcome {
    if section == Section::AllocationByAsset
        && let Some(skipped) = ctx.lacking_returns_columns(&[&ctx.columns.entity_id])
    {
        return skipped;
    }
    let Some(holdings) = ctx.selection.holdings() else {
        return SectionOutcome::Skipped("returns sheet lacks allocation columns".to_string());
    };
    let snapshot = allocation_snapshot(holdings);
    if snapshot.is_empty() {
        return SectionOutcome::Skipped("no holdings at the latest date".to_string());
    }

    let labels = ctx.locale.labels();
    let categories = snapshot.iter().map(category).collect();
    let values = snapshot.iter().map(|row| row.portfolio_pct).collect();
    let spec = match section {
        Section::AllocationByClass => {
            build_pie(ChartLabels::titled(labels.class_title), categories, values)
        }
        Section::AllocationByType => {
            build_pie(ChartLabels::titled(labels.type_title), categories, values)
        }
        _ => build_bar(
            ChartLabels::titled(labels.asset_title).with_axes(labels.asset_axis, labels.share_axis),
            categories,
            values,
            format_percent,
        ),
    };
    single(section.to_string(), spec, "allocation has no positive share")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lisbon::select_policy;
    use lisbon_data::{
        BaseSheet, Holding, PolicyMetric, PolicyRecord, ReturnsSheet, TimeSeriesRow,
    };
    use std::sync::LazyLock;

    static COLUMNS: LazyLock<ColumnNames> = LazyLock::new(ColumnNames::default);

    fn date(m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, m, d)
    }

    fn selection(holdings: Option<Vec<Holding>>) -> PolicySelection {
        let policy = PolicyRecord::new("7")
            .with_metric(PolicyMetric::ReturnMonth, 0.5)
            .with_metric(PolicyMetric::ReturnQuarter, 1.5)
            .with_metric(PolicyMetric::ReturnSinceInception, 9.0);
        let base = BaseSheet {
            policies: vec![policy],
            missing_columns: vec![],
        };
        let returns = ReturnsSheet {
            rows: vec![
                TimeSeriesRow::new("7", "Alpha", date(7, 15), 2.0),
                TimeSeriesRow::new("7", "Beta", date(9, 30), -1.0),
                TimeSeriesRow::new("7", "Gamma", date(9, 30), 3.0),
            ],
            holdings,
            missing_columns: vec![],
        };
        select_policy(&base, &returns, None).unwrap()
    }

    fn holding(entity: &str, class: &str, pct: f64) -> Holding {
        Holding {
            policy_id: "7".to_string(),
            as_of_date: date(9, 30),
            allocation: AllocationRow::new(entity, class, "Fund", pct),
        }
    }

    fn charts(outcome: SectionOutcome) -> Vec<SectionChart> {
        match outcome {
            SectionOutcome::Charts(charts) => charts,
            SectionOutcome::Skipped(reason) => panic!("section skipped: {reason}"),
        }
    }

    fn ctx(selection: &PolicySelection) -> SectionContext<'_> {
        SectionContext {
            selection,
            missing_base_columns: &[],
            columns: &COLUMNS,
            locale: Locale::Pt,
            top_n: 5,
        }
    }

    #[test]
    fn test_portfolio_sorted_descending() {
        let selection = selection(None);
        let chart = charts(Section::Portfolio.build(&ctx(&selection))).remove(0);

        assert_eq!(chart.slug, "portfolio");
        assert_eq!(chart.spec.categories, ["Desde o Início", "Três Meses", "Mês"]);
        assert_eq!(chart.spec.labels.title, "Retornos da Carteira");
    }

    #[test]
    fn test_portfolio_skipped_without_result_columns() {
        let selection = selection(None);
        let missing = vec!["Resultado - Mês".to_string()];
        let ctx = SectionContext {
            missing_base_columns: &missing,
            ..ctx(&selection)
        };

        assert!(matches!(Section::Portfolio.build(&ctx), SectionOutcome::Skipped(_)));
    }

    #[test]
    fn test_month_window_excludes_old_rows() {
        let selection = selection(None);
        let section = Section::AssetReturns(AggregationWindow::Month);
        let chart = charts(section.build(&ctx(&selection))).remove(0);

        assert_eq!(chart.spec.categories, ["Gamma", "Beta"]);
        assert_eq!(chart.spec.labels.title, "Retornos dos Ativos - Mês");
    }

    #[test]
    fn test_best_worst_pair() {
        let selection = selection(None);
        let ctx = SectionContext {
            top_n: 1,
            ..ctx(&selection)
        };
        let pair = charts(Section::BestWorst(AggregationWindow::Quarter).build(&ctx));

        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].spec.categories, ["Gamma"]);
        assert_eq!(pair[1].spec.categories, ["Beta"]);
        assert_eq!(pair[1].slug, "worst_quarter");
    }

    #[test]
    fn test_best_worst_skipped_for_zero() {
        let selection = selection(None);
        let ctx = SectionContext {
            top_n: 0,
            ..ctx(&selection)
        };

        assert!(matches!(
            Section::BestWorst(AggregationWindow::Month).build(&ctx),
            SectionOutcome::Skipped(_)
        ));
    }

    #[test]
    fn test_allocation_sections() {
        let selection = selection(Some(vec![
            holding("Alpha", "Equity", 30.0),
            holding("Beta", "Bonds", 50.0),
            holding("Gamma", "Equity", 20.0),
        ]));
        let ctx = ctx(&selection);

        let class = charts(Section::AllocationByClass.build(&ctx)).remove(0);
        assert_eq!(class.spec.categories, ["Bonds", "Equity"]);
        assert_eq!(class.spec.values, [50.0, 50.0]);

        let asset = charts(Section::AllocationByAsset.build(&ctx)).remove(0);
        assert_eq!(asset.spec.categories, ["Beta", "Alpha", "Gamma"]);
        assert_eq!(asset.spec.labels.y_label, "Portfólio (%)");
    }

    #[test]
    fn test_allocation_skipped_without_holdings() {
        let selection = selection(Some(vec![]));

        for section in [
            Section::AllocationByClass,
            Section::AllocationByType,
            Section::AllocationByAsset,
        ] {
            assert!(matches!(section.build(&ctx(&selection)), SectionOutcome::Skipped(_)));
        }
    }

    #[test]
    fn test_asset_sections_skipped_without_return_column() {
        let mut selection = selection(Some(vec![holding("Alpha", "Equity", 100.0)]));
        selection.returns.missing_columns = vec!["Retornos".to_string()];
        let ctx = ctx(&selection);

        for section in [
            Section::AssetReturns(AggregationWindow::Quarter),
            Section::BestWorst(AggregationWindow::Month),
        ] {
            assert_eq!(
                section.build(&ctx),
                SectionOutcome::Skipped("returns sheet lacks column(s): Retornos".to_string())
            );
        }
        assert!(matches!(Section::Portfolio.build(&ctx), SectionOutcome::Charts(_)));
        assert!(matches!(Section::AllocationByAsset.build(&ctx), SectionOutcome::Charts(_)));
    }

    #[test]
    fn test_asset_allocation_skipped_without_asset_column() {
        let mut selection = selection(Some(vec![holding("", "Equity", 100.0)]));
        selection.returns.missing_columns = vec!["Nome do Ativo".to_string()];
        let ctx = ctx(&selection);

        assert!(matches!(Section::AllocationByAsset.build(&ctx), SectionOutcome::Skipped(_)));
        assert!(matches!(Section::AllocationByClass.build(&ctx), SectionOutcome::Charts(_)));
    }

    #[test]
    fn test_section_order() {
        let names: Vec<String> = SECTIONS.iter().map(Section::to_string).collect();
        assert_eq!(
            names,
            [
                "portfolio",
                "asset_returns_quarter",
                "asset_returns_month",
                "best_worst_quarter",
                "best_worst_month",
                "allocation_class",
                "allocation_type",
                "allocation_asset",
            ]
        );
    }
}
