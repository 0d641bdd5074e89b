//! Expenses report

use super::{ReportDeps, TableReportPage, Templates, ViewContext, ViewModel, ViewResult};
use crate::datasource::{total_expenses, ExpenseRecord};
use crate::filter::{active_filter_count, FilterState};
use crate::table::{data_attrs, SortDirection, TableCell, TableColumn, TableConfig, TableRow};
use crate::types::{expense_status_variant, SummaryMetric, Variant};
use pnlweb_config::labels::ExpensesLabels;
use pnlweb_utils::{format_amount, format_currency};

const TEMPLATES: Templates = Templates {
    full: "expenses-report",
    partial: "expenses-report-content",
};

pub const TABLE_ID: &str = "expenses-report-table";

pub async fn view(deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
    let labels = &deps.labels.expenses;
    let period_labels = &deps.labels.period;

    let filter = FilterState::from_query(&ctx.query, period_labels);
    let report_url = ctx.report_url(&deps.routes.expenses_url);

    if ctx.wants_filter_sheet() {
        return ViewResult::filter_sheet(filter, period_labels, report_url);
    }

    let records = deps
        .data_source
        .list_expenses(&filter.resolve_range())
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to list expenses: {}", e);
            Vec::new()
        });

    let active_filter_count = active_filter_count(&filter);
    let page = TableReportPage {
        page: ctx.header("expenses", &labels.title, &labels.subtitle, "icon-file-minus"),
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

fn build_summary(records: &[ExpenseRecord], labels: &ExpensesLabels) -> Vec<SummaryMetric> {
    let approved = records
        .iter()
        .filter(|r| matches!(r.status.as_str(), "approved" | "paid"))
        .count();
    let pending = records.iter().filter(|r| r.status == "pending").count();

    vec![
        SummaryMetric::new(&labels.summary_total, format_currency(total_expenses(records))).highlighted(),
        SummaryMetric::new(&labels.summary_count, records.len().to_string()),
        SummaryMetric::new(&labels.summary_approved, approved.to_string()).with_variant(Variant::Success),
        SummaryMetric::new(&labels.summary_pending, pending.to_string()).with_variant(Variant::Warning),
    ]
}

fn build_table(records: &[ExpenseRecord], labels: &ExpensesLabels) -> TableConfig {
    let columns = vec![
        TableColumn::new("reference", &labels.reference),
        TableColumn::new("vendor", &labels.vendor),
        TableColumn::new("category", &labels.category),
        TableColumn::new("date", &labels.date).width("140px"),
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
                    TableCell::text(&record.vendor_name),
                    TableCell::text(&record.category),
                    TableCell::text(&record.expenditure_date),
                    TableCell::text(&amount),
                    TableCell::badge(&record.status, expense_status_variant(&record.status)),
                ],
                data_attrs: data_attrs([
                    ("reference", record.reference_number.clone()),
                    ("vendor", record.vendor_name.clone()),
                    ("category", record.category.clone()),
                    ("date", record.expenditure_date.clone()),
                    ("amount", amount),
                    ("status", record.status.clone()),
                ]),
            }
        })
        .collect();

    TableConfig::new(TABLE_ID, "No expenses", "No expense records found for the selected period.")
        .with_columns(columns)
        .with_rows(rows)
        .sorted_by("date", SortDirection::Desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::{ctx, deps, FakeDataSource};
    use std::sync::Arc;

    fn expense(id: &str, amount: f64, status: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            reference_number: format!("EXP-{}", id),
            vendor_name: "Meralco".to_string(),
            category: "Utilities".to_string(),
            expenditure_date: "2024-03-05".to_string(),
            currency: "PHP".to_string(),
            status: status.to_string(),
            total_amount: amount,
        }
    }

    fn table_page(result: ViewResult) -> TableReportPage {
        match result.model {
            ViewModel::Table(page) => page,
            other => panic!("unexpected model {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_counts() {
        let source = Arc::new(FakeDataSource {
            expenses: vec![
                expense("1", 1200.0, "paid"),
                expense("2", 300.0, "approved"),
                expense("3", 50.25, "pending"),
                expense("4", 10.0, "cancelled"),
            ],
            ..Default::default()
        });
        let page = table_page(view(&deps(source), &ctx(&[])).await);

        assert_eq!(page.summary[0].value, "\u{20b1}1,560.25");
        assert!(page.summary[0].highlight);
        assert_eq!(page.summary[1].value, "4");
        assert_eq!(page.summary[2].value, "2");
        assert_eq!(page.summary[2].variant, Variant::Success);
        assert_eq!(page.summary[3].value, "1");
        assert_eq!(page.summary[3].variant, Variant::Warning);
    }

    #[tokio::test]
    async fn test_rows_and_badges() {
        let source = Arc::new(FakeDataSource {
            expenses: vec![expense("1", 1200.0, "approved"), expense("2", 5.0, "on-hold")],
            ..Default::default()
        });
        let page = table_page(view(&deps(source), &ctx(&[])).await);
        let rows = &page.table.rows;

        assert_eq!(rows[0].cells[3].value, "2024-03-05");
        assert_eq!(rows[0].cells[4].value, "PHP 1200.00");
        assert_eq!(rows[0].cells[5].variant, Some(Variant::Info));
        assert_eq!(rows[1].cells[5].variant, Some(Variant::Default));
        assert_eq!(rows[0].data_attrs["vendor"], "Meralco");
        assert_eq!(page.table.default_sort_column.as_deref(), Some("date"));
        assert_eq!(page.table.default_sort_direction, Some(SortDirection::Desc));
    }

    #[tokio::test]
    async fn test_failure_yields_empty_page() {
        let source = Arc::new(FakeDataSource::failing());
        let page = table_page(view(&deps(source), &ctx(&[("period", "lastQuarter")])).await);

        assert!(page.table.rows.is_empty());
        assert_eq!(page.table.empty_state.title, "No expenses");
        assert_eq!(page.summary[0].value, "\u{20b1}0.00");
        assert_eq!(page.filter.active_preset, "lastQuarter");
    }
}
