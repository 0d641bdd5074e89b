//! Reports landing page: this month's KPIs and links to each report

use super::net_profit::NetProfitFigures;
use super::{percent, DashboardPage, ReportDeps, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::{total_expenses, GrossProfitReport, GrossProfitRequest};
use crate::period::{self, PeriodPreset};
use crate::types::{ReportCard, SummaryMetric};
use pnlweb_config::{ReportsLabels, ReportsRoutes};
use pnlweb_utils::format_currency;

const TEMPLATES: Templates = Templates {
    full: "reports-dashboard",
    partial: "reports-dashboard-content",
};

/// The dashboard ignores filter parameters and always covers this month.
pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.dashboard;
    let range = period::resolve_now(PeriodPreset::ThisMonth);

    let report = deps
        .data_source
        .gross_profit_report(&GrossProfitRequest::new(range))
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to get gross profit for dashboard: {}", e);
            GrossProfitReport::default()
        });
    let expenses = deps.data_source.list_expenses(&range).await.unwrap_or_else(|e| {
        log::error!("Failed to list expenses for dashboard: {}", e);
        Vec::new()
    });

    let figures = NetProfitFigures::compute(&report, total_expenses(&expenses));
    let variant = figures.variant();

    let summary = vec![
        SummaryMetric::new(&labels.revenue_card, format_currency(figures.net_revenue)),
        SummaryMetric::new(&labels.expenses_card, format_currency(figures.expenses)),
        SummaryMetric::new(&labels.net_profit_card, format_currency(figures.net_profit))
            .highlighted()
            .with_variant(variant),
        SummaryMetric::new(&labels.net_margin_card, percent(figures.net_margin)).with_variant(variant),
    ];

    let page = DashboardPage {
        page: ctx.header("dashboard", &labels.title, &labels.subtitle, "icon-pie-chart"),
        content_template: TEMPLATES.partial.to_string(),
        summary,
        report_cards: report_cards(&deps.labels, &deps.routes),
        labels: labels.clone(),
    };

    ViewResult::page(ctx, TEMPLATES, ViewModel::Dashboard(page))
}

/// Navigation cards, one per report, in menu order
pub fn report_cards(labels: &ReportsLabels, routes: &ReportsRoutes) -> Vec<ReportCard> {
    let dashboard = &labels.dashboard;
    let card = |title: &str, description: &str, icon: &str, url: &str| ReportCard {
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        url: url.to_string(),
    };

    vec![
        card(&labels.revenue.title, &dashboard.revenue_desc, "icon-trending-up", &routes.revenue_url),
        card(
            &labels.gross_profit.title,
            &dashboard.gross_profit_desc,
            "icon-bar-chart",
            &routes.gross_profit_url,
        ),
        card(
            &labels.cost_of_sales.title,
            &dashboard.cost_of_sales_desc,
            "icon-package",
            &routes.cost_of_sales_url,
        ),
        card(&labels.expenses.title, &dashboard.expenses_desc, "icon-file-minus", &routes.expenses_url),
        card(
            &labels.net_profit.title,
            &dashboard.net_profit_desc,
            "icon-dollar-sign",
            &routes.net_profit_url,
        ),
    ]
}
