//! Net profit: a one-page profit and loss statement

use super::{percent, ratio, NetProfitPage, ReportDeps, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::{total_expenses, GrossProfitReport, GrossProfitRequest};
use crate::filter::{active_filter_count, FilterState};
use crate::types::{net_variant, PLLineItem, SummaryMetric, Variant};
use pnlweb_config::labels::NetProfitLabels;
use pnlweb_utils::format_currency;

const TEMPLATES: Templates = Templates {
    full: "net-profit",
    partial: "net-profit-content",
};

/// Net profit figures for one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetProfitFigures {
    pub net_revenue: f64,
    pub cost_of_sales: f64,
    pub gross_profit: f64,
    pub expenses: f64,
    pub net_profit: f64,
    pub gross_margin: f64,
    pub net_margin: f64,
}

impl NetProfitFigures {
    /// Combine a gross profit summary with the period's expense total.
    /// Both margins are relative to net revenue, and zero without revenue.
    pub fn compute(report: &GrossProfitReport, expenses: f64) -> Self {
        let summary = &report.summary;
        let net_profit = summary.total_gross_profit - expenses;
        Self {
            net_revenue: summary.net_revenue,
            cost_of_sales: summary.total_cogs,
            gross_profit: summary.total_gross_profit,
            expenses,
            net_profit,
            gross_margin: ratio(summary.total_gross_profit, summary.net_revenue),
            net_margin: ratio(net_profit, summary.net_revenue),
        }
    }

    pub fn variant(&self) -> Variant {
        net_variant(self.net_profit, self.net_margin)
    }
}

pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.net_profit;
    let period_labels = &deps.labels.period;

    let filter = FilterState::from_query(&ctx.query, period_labels);
    let report_url = ctx.report_url(&deps.routes.net_profit_url);

    if ctx.wants_filter_sheet() {
        return ViewResult::filter_sheet(filter, period_labels, report_url);
    }

    let range = filter.resolve_range();
    let report = deps
        .data_source
        .gross_profit_report(&GrossProfitRequest::new(range))
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to get gross profit for net profit report: {}", e);
            GrossProfitReport::default()
        });
    let expenses = deps.data_source.list_expenses(&range).await.unwrap_or_else(|e| {
        log::error!("Failed to list expenses for net profit report: {}", e);
        Vec::new()
    });

    let figures = NetProfitFigures::compute(&report, total_expenses(&expenses));

    let active_filter_count = active_filter_count(&filter);
    let page = NetProfitPage {
        page: ctx.header("net-profit", &labels.title, &labels.subtitle, "icon-dollar-sign"),
        content_template: TEMPLATES.partial.to_string(),
        summary: build_summary(&figures, labels),
        line_items: build_statement(&figures, labels),
        filter,
        period_labels: period_labels.clone(),
        report_url,
        active_filter_count,
    };

    ViewResult::page(ctx, TEMPLATES, ViewModel::NetProfit(page))
}

fn build_summary(figures: &NetProfitFigures, labels: &NetProfitLabels) -> Vec<SummaryMetric> {
    vec![
        SummaryMetric::new(&labels.summary_revenue, format_currency(figures.net_revenue)),
        SummaryMetric::new(&labels.summary_gross, format_currency(figures.gross_profit)),
        SummaryMetric::new(&labels.summary_expenses, format_currency(figures.expenses)),
        SummaryMetric::new(&labels.summary_net_profit, format_currency(figures.net_profit))
            .highlighted()
            .with_variant(figures.variant()),
    ]
}

fn build_statement(figures: &NetProfitFigures, labels: &NetProfitLabels) -> Vec<PLLineItem> {
    vec![
        PLLineItem::new(&labels.revenue, format_currency(figures.net_revenue)),
        PLLineItem::new(&labels.cost_of_sales, format_currency(figures.cost_of_sales)),
        PLLineItem::new(&labels.gross_profit, format_currency(figures.gross_profit)).total(),
        PLLineItem::new(&labels.gross_margin, percent(figures.gross_margin)),
        PLLineItem::new(&labels.expenses, format_currency(figures.expenses)),
        PLLineItem::new(&labels.net_profit, format_currency(figures.net_profit)).total(),
        PLLineItem::new(&labels.net_margin, percent(figures.net_margin)).with_variant(figures.variant()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{ExpenseRecord, GrossProfitSummary};
    use crate::reports::testing::{ctx, deps, FakeDataSource};
    use std::sync::Arc;

    fn report(net_revenue: f64, cogs: f64) -> GrossProfitReport {
        GrossProfitReport {
            line_items: Vec::new(),
            summary: GrossProfitSummary {
                net_revenue,
                total_cogs: cogs,
                total_gross_profit: net_revenue - cogs,
                ..Default::default()
            },
        }
    }

    fn expense(amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id: "1".to_string(),
            status: "paid".to_string(),
            total_amount: amount,
            ..Default::default()
        }
    }

    fn net_page(result: ViewResult) -> NetProfitPage {
        match result.model {
            ViewModel::NetProfit(page) => page,
            other => panic!("unexpected model {:?}", other),
        }
    }

    #[test]
    fn test_figures() {
        let figures = NetProfitFigures::compute(&report(10000.0, 6000.0), 2500.0);
        assert_eq!(figures.net_profit, 1500.0);
        assert_eq!(figures.gross_margin, 40.0);
        assert_eq!(figures.net_margin, 15.0);
        assert_eq!(figures.variant(), Variant::Success);

        let thin = NetProfitFigures::compute(&report(10000.0, 6000.0), 3500.0);
        assert_eq!(thin.variant(), Variant::Warning);

        let loss = NetProfitFigures::compute(&report(10000.0, 6000.0), 4500.0);
        assert_eq!(loss.net_profit, -500.0);
        assert_eq!(loss.variant(), Variant::Danger);
    }

    #[test]
    fn test_no_revenue_zero_margins() {
        let figures = NetProfitFigures::compute(&GrossProfitReport::default(), 200.0);
        assert_eq!(figures.gross_margin, 0.0);
        assert_eq!(figures.net_margin, 0.0);
        assert_eq!(figures.net_profit, -200.0);
        assert_eq!(figures.variant(), Variant::Danger);
    }

    #[tokio::test]
    async fn test_statement_lines() {
        let source = Arc::new(FakeDataSource {
            gross_profit: report(10000.0, 6000.0),
            expenses: vec![expense(2000.0), expense(500.0)],
            ..Default::default()
        });
        let page = net_page(view(&deps(source.clone()), &ctx(&[])).await);

        let values: Vec<&str> = page.line_items.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(
            values,
            [
                "\u{20b1}10,000.00",
                "\u{20b1}6,000.00",
                "\u{20b1}4,000.00",
                "40.0%",
                "\u{20b1}2,500.00",
                "\u{20b1}1,500.00",
                "15.0%",
            ]
        );
        let totals: Vec<bool> = page.line_items.iter().map(|l| l.is_total).collect();
        assert_eq!(totals, [false, false, true, false, false, true, false]);
        assert_eq!(page.line_items[6].variant, Variant::Success);

        assert!(page.summary[3].highlight);
        assert_eq!(page.summary[3].value, "\u{20b1}1,500.00");
        assert_eq!(page.summary[3].variant, Variant::Success);

        // Both calls share the resolved range; the gross profit request is ungrouped
        let requests = source.gross_profit_requests.lock().unwrap();
        assert_eq!(requests[0].group_by, None);
        let ranges = source.ranges.lock().unwrap();
        assert_eq!(ranges[0], requests[0].range);
    }

    #[tokio::test]
    async fn test_loss_is_negative_and_danger() {
        let source = Arc::new(FakeDataSource {
            gross_profit: report(1000.0, 800.0),
            expenses: vec![expense(450.0)],
            ..Default::default()
        });
        let page = net_page(view(&deps(source), &ctx(&[])).await);

        assert_eq!(page.summary[3].value, "-\u{20b1}250.00");
        assert_eq!(page.summary[3].variant, Variant::Danger);
        assert_eq!(page.line_items[6].value, "-25.0%");
    }

    #[tokio::test]
    async fn test_failures_produce_zero_statement() {
        let source = Arc::new(FakeDataSource::failing());
        let page = net_page(view(&deps(source.clone()), &ctx(&[])).await);

        assert_eq!(source.call_count(), 2);
        assert!(page.line_items.iter().all(|l| l.value == "\u{20b1}0.00" || l.value == "0.0%"));
        assert_eq!(page.summary[3].variant, Variant::Warning);
    }
}
