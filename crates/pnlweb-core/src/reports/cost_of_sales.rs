//! Cost of sales report, per product

use super::{percent, ratio, ReportDeps, TableReportPage, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::{GrossProfitReport, GrossProfitRequest, GrossProfitSummary, GroupKey};
use crate::filter::{active_filter_count, FilterState};
use crate::table::{data_attrs, SortDirection, TableCell, TableColumn, TableConfig, TableRow};
use crate::types::SummaryMetric;
use pnlweb_config::labels::CostOfSalesLabels;
use pnlweb_utils::format_currency;

const TEMPLATES: Templates = Templates {
    full: "cost-of-sales",
    partial: "cost-of-sales-content",
};

pub const TABLE_ID: &str = "cost-of-sales-table";

pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.cost_of_sales;
    let period_labels = &deps.labels.period;

    let filter = FilterState::from_query(&ctx.query, period_labels);
    let report_url = ctx.report_url(&deps.routes.cost_of_sales_url);

    if ctx.wants_filter_sheet() {
        return ViewResult::filter_sheet(filter, period_labels, report_url);
    }

    let request = GrossProfitRequest::new(filter.resolve_range()).grouped(GroupKey::Product, None);
    let report = deps
        .data_source
        .gross_profit_report(&request)
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to get cost of sales report: {}", e);
            GrossProfitReport::default()
        });

    let active_filter_count = active_filter_count(&filter);
    let page = TableReportPage {
        page: ctx.header("cost-of-sales", &labels.title, &labels.subtitle, "icon-package"),
        content_template: TEMPLATES.partial.to_string(),
        summary: build_summary(&report.summary, labels),
        table: build_table(&report, labels),
        filter,
        period_labels: period_labels.clone(),
        report_url,
        active_filter_count,
    };

    ViewResult::page(ctx, TEMPLATES, ViewModel::Table(page))
}

fn build_summary(summary: &GrossProfitSummary, labels: &CostOfSalesLabels) -> Vec<SummaryMetric> {
    let cogs_ratio = ratio(summary.total_cogs, summary.net_revenue);
    vec![
        SummaryMetric::new(&labels.summary_total_cogs, format_currency(summary.total_cogs)).highlighted(),
        SummaryMetric::new(&labels.summary_revenue, format_currency(summary.net_revenue)),
        SummaryMetric::new(&labels.summary_cogs_ratio, percent(cogs_ratio)),
        SummaryMetric::new(&labels.summary_units, summary.total_units_sold.to_string()),
    ]
}

fn build_table(report: &GrossProfitReport, labels: &CostOfSalesLabels) -> TableConfig {
    let columns = vec![
        TableColumn::new("group", &labels.item),
        TableColumn::numeric("cogs", &labels.cogs, "120px"),
        TableColumn::numeric("revenue", &labels.net_revenue, "120px"),
        TableColumn::numeric("ratio", &labels.ratio, "80px"),
        TableColumn::numeric("units", &labels.units, "80px"),
    ];

    let rows = report
        .line_items
        .iter()
        .map(|item| {
            let item_ratio = ratio(item.cost_of_goods_sold, item.net_revenue);
            TableRow {
                id: item.group_key.clone(),
                cells: vec![
                    TableCell::name(&item.group_key),
                    TableCell::text(format_currency(item.cost_of_goods_sold)),
                    TableCell::text(format_currency(item.net_revenue)),
                    TableCell::text(percent(item_ratio)),
                    TableCell::text(item.units_sold.to_string()),
                ],
                data_attrs: data_attrs([
                    ("cogs", format!("{:.2}", item.cost_of_goods_sold)),
                    ("revenue", format!("{:.2}", item.net_revenue)),
                    ("ratio", format!("{:.1}", item_ratio)),
                    ("units", item.units_sold.to_string()),
                ]),
            }
        })
        .collect();

    TableConfig::new(TABLE_ID, "No data", "No cost of sales data found for the selected period.")
        .without_search()
        .with_columns(columns)
        .with_rows(rows)
        .sorted_by("cogs", SortDirection::Desc)
}
