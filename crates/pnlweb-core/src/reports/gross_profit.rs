//! Gross profit report: revenue less cost of goods sold, bucketed by
//! product, location, category or time period.

use super::{percent, GrossProfitPage, TableReportPage, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::{GrossProfitLineItem, GrossProfitReport, GrossProfitRequest, GrossProfitSummary, GroupKey};
use crate::filter::{
    active_filter_count, group_by_param, gross_profit_group_by_options, param, FilterState, DEFAULT_GROUP_BY,
};
use crate::reports::ReportDeps;
use crate::table::{data_attrs, ColumnGroup, TableCell, TableColumn, TableConfig, TableRow};
use crate::types::{margin_variant, SummaryMetric};
use pnlweb_config::labels::GrossProfitLabels;
use pnlweb_utils::format_currency;

const TEMPLATES: Templates = Templates {
    full: "gross-profit",
    partial: "gross-profit-content",
};

pub const TABLE_ID: &str = "grossProfitTable";

/// Row id of the synthetic totals row
pub const TOTALS_ROW_ID: &str = "__totals__";

pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.gross_profit;
    let period_labels = &deps.labels.period;

    let group_by = match group_by_param(&ctx.query) {
        "" => DEFAULT_GROUP_BY,
        value => value,
    };
    let filter = FilterState::from_query(&ctx.query, period_labels)
        .with_group_by(group_by, gross_profit_group_by_options(labels, group_by));
    let report_url = ctx.report_url(&deps.routes.gross_profit_url);

    if ctx.wants_filter_sheet() {
        return ViewResult::filter_sheet(filter, period_labels, report_url);
    }

    let product_id = param(&ctx.query, "product-id");
    let location_id = param(&ctx.query, "location-id");
    let category_id = param(&ctx.query, "category-id");

    let (key, granularity) = GroupKey::from_group_by(group_by);
    let mut request = GrossProfitRequest::new(filter.resolve_range()).grouped(key, granularity);
    request.product_id = non_empty(product_id);
    request.location_id = non_empty(location_id);
    request.category_id = non_empty(category_id);

    let report = deps
        .data_source
        .gross_profit_report(&request)
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to get gross profit report: {}", e);
            GrossProfitReport::default()
        });

    let summary = build_summary(&report.summary, labels);
    let table = build_table(&report, labels);
    let active_filter_count = active_filter_count(&filter);

    let page = GrossProfitPage {
        report: TableReportPage {
            page: ctx.header("gross-profit", &labels.title, "", "icon-bar-chart"),
            content_template: TEMPLATES.partial.to_string(),
            summary,
            table,
            filter,
            period_labels: period_labels.clone(),
            report_url,
            active_filter_count,
        },
        labels: labels.clone(),
        product_id: product_id.to_string(),
        location_id: location_id.to_string(),
        category_id: category_id.to_string(),
    };

    ViewResult::page(ctx, TEMPLATES, ViewModel::GrossProfit(page))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn build_summary(summary: &GrossProfitSummary, labels: &GrossProfitLabels) -> Vec<SummaryMetric> {
    vec![
        SummaryMetric::new(&labels.summary_net_revenue, format_currency(summary.net_revenue)),
        SummaryMetric::new(&labels.summary_cogs, format_currency(summary.total_cogs)),
        SummaryMetric::new(&labels.summary_gross_profit, format_currency(summary.total_gross_profit)).highlighted(),
        SummaryMetric::new(&labels.summary_margin, percent(summary.overall_margin))
            .with_variant(margin_variant(summary.overall_margin)),
    ]
}

fn build_table(report: &GrossProfitReport, labels: &GrossProfitLabels) -> TableConfig {
    let column_groups = vec![
        ColumnGroup {
            label: labels.revenue_group.clone(),
            columns: vec![
                TableColumn::numeric("totalRevenue", &labels.gross_revenue, "120px"),
                TableColumn::numeric("totalDiscount", &labels.discount, "100px"),
                TableColumn::numeric("netRevenue", &labels.net_revenue, "120px"),
            ],
        },
        ColumnGroup {
            label: labels.profitability_group.clone(),
            columns: vec![
                TableColumn::numeric("cogs", &labels.cogs, "120px"),
                TableColumn::numeric("grossProfit", &labels.gross_profit, "120px"),
                TableColumn::numeric("margin", &labels.margin, "80px"),
            ],
        },
        ColumnGroup {
            label: labels.volume_group.clone(),
            columns: vec![
                TableColumn::numeric("unitsSold", &labels.units_sold, "80px"),
                TableColumn::numeric("txnCount", &labels.transactions, "80px"),
            ],
        },
    ];

    let mut rows: Vec<TableRow> = report.line_items.iter().map(line_item_row).collect();
    if !report.line_items.is_empty() {
        rows.push(totals_row(&report.summary));
    }

    TableConfig::new(TABLE_ID, "No data", "No gross profit data found for the selected period.")
        .without_search()
        .with_column_groups(column_groups)
        .with_rows(rows)
}

fn line_item_row(item: &GrossProfitLineItem) -> TableRow {
    TableRow {
        id: item.group_key.clone(),
        cells: vec![
            TableCell::name(&item.group_key),
            TableCell::text(format_currency(item.total_revenue)),
            TableCell::text(format_currency(item.total_discount)),
            TableCell::text(format_currency(item.net_revenue)),
            TableCell::text(format_currency(item.cost_of_goods_sold)),
            TableCell::text(format_currency(item.gross_profit)),
            TableCell::badge(percent(item.gross_profit_margin), margin_variant(item.gross_profit_margin)),
            TableCell::text(item.units_sold.to_string()),
            TableCell::text(item.transaction_count.to_string()),
        ],
        data_attrs: data_attrs([
            ("totalRevenue", format!("{:.2}", item.total_revenue)),
            ("totalDiscount", format!("{:.2}", item.total_discount)),
            ("netRevenue", format!("{:.2}", item.net_revenue)),
            ("cogs", format!("{:.2}", item.cost_of_goods_sold)),
            ("grossProfit", format!("{:.2}", item.gross_profit)),
            ("margin", format!("{:.1}", item.gross_profit_margin)),
            ("unitsSold", item.units_sold.to_string()),
            ("txnCount", item.transaction_count.to_string()),
        ]),
    }
}

fn totals_row(summary: &GrossProfitSummary) -> TableRow {
    TableRow {
        id: TOTALS_ROW_ID.to_string(),
        cells: vec![
            TableCell::name("TOTALS"),
            TableCell::text(format_currency(summary.total_revenue)),
            TableCell::text(format_currency(summary.total_discount)),
            TableCell::text(format_currency(summary.net_revenue)),
            TableCell::text(format_currency(summary.total_cogs)),
            TableCell::text(format_currency(summary.total_gross_profit)),
            TableCell::badge(percent(summary.overall_margin), margin_variant(summary.overall_margin)),
            TableCell::text(summary.total_units_sold.to_string()),
            TableCell::text(summary.total_transactions.to_string()),
        ],
        data_attrs: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::PeriodGranularity;
    use crate::reports::testing::{ctx, deps, FakeDataSource};
    use crate::table::CellKind;
    use crate::types::Variant;
    use std::sync::Arc;

    fn sample_report() -> GrossProfitReport {
        GrossProfitReport {
            line_items: vec![
                GrossProfitLineItem {
                    group_key: "Haircut".to_string(),
                    total_revenue: 12000.0,
                    total_discount: 500.0,
                    net_revenue: 11500.0,
                    cost_of_goods_sold: 2000.0,
                    gross_profit: 9500.0,
                    gross_profit_margin: 82.6,
                    units_sold: 40,
                    transaction_count: 38,
                },
                GrossProfitLineItem {
                    group_key: "Hair Color".to_string(),
                    net_revenue: 5000.0,
                    cost_of_goods_sold: 4500.0,
                    gross_profit: 500.0,
                    gross_profit_margin: 10.0,
                    units_sold: 5,
                    transaction_count: 5,
                    ..Default::default()
                },
            ],
            summary: GrossProfitSummary {
                total_revenue: 17000.0,
                total_discount: 500.0,
                net_revenue: 16500.0,
                total_cogs: 6500.0,
                total_gross_profit: 10000.0,
                overall_margin: 60.6,
                total_units_sold: 45,
                total_transactions: 43,
            },
        }
    }

    fn page(result: ViewResult) -> GrossProfitPage {
        match result.model {
            ViewModel::GrossProfit(page) => page,
            other => panic!("unexpected model {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rows_and_totals() {
        let source = Arc::new(FakeDataSource {
            gross_profit: sample_report(),
            ..Default::default()
        });
        let result = view(&deps(source.clone()), &ctx(&[])).await;
        assert_eq!(result.template, "gross-profit");
        let page = page(result);

        let rows = &page.report.table.rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells[1].value, "\u{20b1}12,000.00");
        assert_eq!(rows[0].data_attrs["margin"], "82.6");
        assert_eq!(rows[1].cells[6].variant, Some(Variant::Danger));
        assert_eq!(rows[2].id, TOTALS_ROW_ID);
        assert_eq!(rows[2].cells[0].kind, CellKind::Name);
        assert_eq!(rows[2].cells[0].value, "TOTALS");
        assert_eq!(rows[2].cells[7].value, "45");

        let summary = &page.report.summary;
        assert_eq!(summary[2].value, "\u{20b1}10,000.00");
        assert!(summary[2].highlight);
        assert_eq!(summary[3].value, "60.6%");
        assert_eq!(summary[3].variant, Variant::Success);
        assert_eq!(page.report.active_filter_count, 0);
        assert!(!page.report.table.show_search);
    }

    #[tokio::test]
    async fn test_monthly_group_by_maps_to_period_key() {
        let source = Arc::new(FakeDataSource::default());
        let result = view(&deps(source.clone()), &ctx(&[("group-by", "monthly")])).await;

        let requests = source.gross_profit_requests.lock().unwrap();
        assert_eq!(requests[0].group_by, Some(GroupKey::Period));
        assert_eq!(requests[0].granularity, Some(PeriodGranularity::Monthly));

        let page = page(result);
        assert_eq!(page.report.filter.group_by, "monthly");
        assert_eq!(page.report.active_filter_count, 1);
    }

    #[tokio::test]
    async fn test_optional_filters_forwarded() {
        let source = Arc::new(FakeDataSource::default());
        let result = view(
            &deps(source.clone()),
            &ctx(&[("groupBy", "location"), ("product-id", "p-1"), ("category-id", "")]),
        )
        .await;

        let requests = source.gross_profit_requests.lock().unwrap();
        assert_eq!(requests[0].group_by, Some(GroupKey::Location));
        assert_eq!(requests[0].product_id.as_deref(), Some("p-1"));
        assert_eq!(requests[0].location_id, None);
        assert_eq!(requests[0].category_id, None);
        assert_eq!(page(result).product_id, "p-1");
    }

    #[tokio::test]
    async fn test_custom_range_accepts_unix_seconds() {
        let source = Arc::new(FakeDataSource::default());
        view(
            &deps(source.clone()),
            &ctx(&[("period", "custom"), ("start", "1704067200"), ("end", "1706745599")]),
        )
        .await;

        let requests = source.gross_profit_requests.lock().unwrap();
        assert_eq!(requests[0].range.start_timestamp(), 1704067200);
        assert_eq!(requests[0].range.end_timestamp(), 1706745599);
    }

    #[tokio::test]
    async fn test_data_source_failure_yields_empty_page() {
        let source = Arc::new(FakeDataSource::failing());
        let mut context = ctx(&[]);
        context.is_htmx = true;
        let result = view(&deps(source.clone()), &context).await;
        assert_eq!(result.template, "gross-profit-content");

        let page = page(result);
        assert!(page.report.table.rows.is_empty());
        assert_eq!(page.report.summary[0].value, "\u{20b1}0.00");
        assert_eq!(page.report.summary[3].value, "0.0%");
        assert_eq!(page.report.summary[3].variant, Variant::Danger);
    }

    #[tokio::test]
    async fn test_unknown_group_by_requests_product() {
        let source = Arc::new(FakeDataSource::default());
        let result = view(&deps(source.clone()), &ctx(&[("group-by", "weekly")])).await;

        assert_eq!(source.gross_profit_requests.lock().unwrap()[0].group_by, Some(GroupKey::Product));
        let page = page(result);
        assert_eq!(page.report.filter.group_by, "weekly");
        assert!(page.report.filter.group_by_options.iter().all(|o| !o.selected));
    }
}
