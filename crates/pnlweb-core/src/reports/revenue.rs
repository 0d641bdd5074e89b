//! Revenue report: one row per sale

use super::{ReportDeps, TableReportPage, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::RevenueRecord;
use crate::filter::{active_filter_count, FilterState};
use crate::table::{data_attrs, SortDirection, TableCell, TableColumn, TableConfig, TableRow};
use crate::types::{revenue_status_variant, SummaryMetric};
use pnlweb_config::labels::RevenueLabels;
use pnlweb_utils::{format_amount, format_currency};

const TEMPLATES: Templates = Templates {
    full: "revenue",
    partial: "revenue-content",
};

pub const TABLE_ID: &str = "revenue-table";

pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.revenue;
    let period_labels = &deps.labels.period;

    let filter = FilterState::from_query(&ctx.query, period_labels);
    let report_url = ctx.report_url(&deps.routes.revenue_url);

    if ctx.wants_filter_sheet() {
        return ViewResult::filter_sheet(filter, period_labels, report_url);
    }

    let records = deps
        .data_source
        .list_revenue(&filter.resolve_range())
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to list revenue: {}", e);
            Vec::new()
        });

    let active_filter_count = active_filter_count(&filter);
    let page = TableReportPage {
        page: ctx.header("revenue", &labels.title, &labels.subtitle, "icon-trending-up"),
        content_template: TEMPLATES.partial.to_string(),
        summary: build_summary(&records, labels),
        table: build_table(&records, labels),
        filter,
        period_labels: period_labels.clone(),
        report_url,
        active_filter_count,
    };

    ViewResult::page(ctx, TEMPLATES, ViewModel::Table(page))
}

fn build_summary(records: &[RevenueRecord], labels: &RevenueLabels) -> Vec<SummaryMetric> {
    let total: f64 = records.iter().map(|r| r.total_amount).sum();
    let average = if records.is_empty() {
        0.0
    } else {
        total / records.len() as f64
    };

    vec![
        SummaryMetric::new(&labels.summary_total, format_currency(total)).highlighted(),
        SummaryMetric::new(&labels.summary_transactions, records.len().to_string()),
        SummaryMetric::new(&labels.summary_average, format_currency(average)),
    ]
}

fn build_table(records: &[RevenueRecord], labels: &RevenueLabels) -> TableConfig {
    let columns = vec![
        TableColumn::new("reference", &labels.reference),
        TableColumn::new("customer", &labels.customer),
        TableColumn::new("amount", &labels.amount).width("140px").align_right(),
        TableColumn::new("status", &labels.status).width("120px"),
    ];

    let rows = records
        .iter()
        .map(|record| {
            let amount = format_amount(&record.currency, record.total_amount);
            TableRow {
                id: record.id.clone(),
                cells: vec![
                    TableCell::text(&record.reference_number),
                    TableCell::text(&record.customer_name),
                    TableCell::text(&amount),
                    TableCell::badge(&record.status, revenue_status_variant(&record.status)),
                ],
                data_attrs: data_attrs([
                    ("reference", record.reference_number.clone()),
                    ("customer", record.customer_name.clone()),
                    ("amount", amount),
                    ("status", record.status.clone()),
                ]),
            }
        })
        .collect();

    TableConfig::new(TABLE_ID, "No revenue", "No revenue records found for the selected period.")
        .with_columns(columns)
        .with_rows(rows)
        .sorted_by("reference", SortDirection::Desc)
}
