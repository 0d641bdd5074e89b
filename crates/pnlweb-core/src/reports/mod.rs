//! Report views
//!
//! Each view reads the request's query, resolves a date range, calls the
//! [`DataSource`], and shapes the response into a view-model keyed by
//! template name. Data-source failures are logged and replaced by an empty
//! response; a view always produces a page.

pub mod cost_of_sales;
pub mod dashboard;
pub mod expenses;
pub mod gross_profit;
pub mod net_profit;
pub mod revenue;

use crate::datasource::DataSource;
use crate::filter::{param, FilterSheetData, FilterState, QueryParams};
use crate::table::TableConfig;
use crate::types::{PLLineItem, PageHeader, ReportCard, SummaryMetric};
use pnlweb_config::labels::{DashboardLabels, GrossProfitLabels, PeriodLabels};
use pnlweb_config::{ReportsLabels, ReportsRoutes};
use serde::Serialize;
use std::sync::Arc;

/// Template of the filter side panel
pub const FILTER_SHEET_TEMPLATE: &str = "report-filter-sheet";

const ACTIVE_NAV: &str = "reports";

/// Shared, read-only dependencies of every view
#[derive(Clone)]
pub struct ReportDeps {
    pub data_source: Arc<dyn DataSource>,
    pub labels: Arc<ReportsLabels>,
    pub routes: Arc<ReportsRoutes>,
}

/// Per-request input to a view
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub query: QueryParams,
    pub current_path: String,
    /// Partial refresh: render only the content fragment
    pub is_htmx: bool,
    pub cache_version: String,
}

impl ViewContext {
    fn wants_filter_sheet(&self) -> bool {
        param(&self.query, "sheet") == "filters"
    }

    /// The current path, or `fallback` when the request carries none
    fn report_url(&self, fallback: &str) -> String {
        if self.current_path.is_empty() {
            fallback.to_string()
        } else {
            self.current_path.clone()
        }
    }

    fn header(&self, sub_nav: &str, title: &str, subtitle: &str, icon: &str) -> PageHeader {
        PageHeader {
            cache_version: self.cache_version.clone(),
            title: title.to_string(),
            current_path: self.current_path.clone(),
            active_nav: ACTIVE_NAV.to_string(),
            active_sub_nav: sub_nav.to_string(),
            header_title: title.to_string(),
            header_subtitle: subtitle.to_string(),
            header_icon: icon.to_string(),
        }
    }
}

/// Template name plus the data it renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    pub template: &'static str,
    pub model: ViewModel,
}

impl ViewResult {
    /// The full page, or its `-content` fragment for a partial refresh
    fn page(ctx: &ViewContext, templates: Templates, model: ViewModel) -> Self {
        Self {
            template: if ctx.is_htmx { templates.partial } else { templates.full },
            model,
        }
    }

    fn filter_sheet(filter: FilterState, period_labels: &PeriodLabels, report_url: String) -> Self {
        Self {
            template: FILTER_SHEET_TEMPLATE,
            model: ViewModel::FilterSheet(FilterSheetData {
                filter,
                period_labels: period_labels.clone(),
                report_url,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Templates {
    full: &'static str,
    partial: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewModel {
    FilterSheet(FilterSheetData),
    Dashboard(DashboardPage),
    Table(TableReportPage),
    GrossProfit(GrossProfitPage),
    NetProfit(NetProfitPage),
}

/// Summary bar plus one table: revenue, cost of sales, expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReportPage {
    #[serde(flatten)]
    pub page: PageHeader,
    pub content_template: String,
    pub summary: Vec<SummaryMetric>,
    pub table: TableConfig,
    pub filter: FilterState,
    pub period_labels: PeriodLabels,
    pub report_url: String,
    pub active_filter_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrossProfitPage {
    #[serde(flatten)]
    pub report: TableReportPage,
    pub labels: GrossProfitLabels,
    pub product_id: String,
    pub location_id: String,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetProfitPage {
    #[serde(flatten)]
    pub page: PageHeader,
    pub content_template: String,
    pub summary: Vec<SummaryMetric>,
    pub line_items: Vec<PLLineItem>,
    pub filter: FilterState,
    pub period_labels: PeriodLabels,
    pub report_url: String,
    pub active_filter_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    #[serde(flatten)]
    pub page: PageHeader,
    pub content_template: String,
    pub summary: Vec<SummaryMetric>,
    pub report_cards: Vec<ReportCard>,
    pub labels: DashboardLabels,
}

/// The six report views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportView {
    Dashboard,
    Revenue,
    CostOfSales,
    GrossProfit,
    Expenses,
    NetProfit,
}

impl ReportView {
    pub const ALL: [ReportView; 6] = [
        ReportView::Dashboard,
        ReportView::Revenue,
        ReportView::CostOfSales,
        ReportView::GrossProfit,
        ReportView::Expenses,
        ReportView::NetProfit,
    ];

    /// Sub-navigation key, also the path segment of the default route
    pub fn sub_nav(&self) -> &'static str {
        match self {
            ReportView::Dashboard => "dashboard",
            ReportView::Revenue => "revenue",
            ReportView::CostOfSales => "cost-of-sales",
            ReportView::GrossProfit => "gross-profit",
            ReportView::Expenses => "expenses",
            ReportView::NetProfit => "net-profit",
        }
    }

    /// Configured route for this view
    pub fn route<'a>(&self, routes: &'a ReportsRoutes) -> &'a str {
        match self {
            ReportView::Dashboard => &routes.dashboard_url,
            ReportView::Revenue => &routes.revenue_url,
            ReportView::CostOfSales => &routes.cost_of_sales_url,
            ReportView::GrossProfit => &routes.gross_profit_url,
            ReportView::Expenses => &routes.expenses_url,
            ReportView::NetProfit => &routes.net_profit_url,
        }
    }

    pub async fn render(&self, deps: &ReportDeps, ctx: &ViewContext) -> ViewResult {
        match self {
            ReportView::Dashboard => dashboard::view(deps, ctx).await,
            ReportView::Revenue => revenue::view(deps, ctx).await,
            ReportView::CostOfSales => cost_of_sales::view(deps, ctx).await,
            ReportView::GrossProfit => gross_profit::view(deps, ctx).await,
            ReportView::Expenses => expenses::view(deps, ctx).await,
            ReportView::NetProfit => net_profit::view(deps, ctx).await,
        }
    }
}

/// `x.x%`
fn percent(value: f64) -> String {
    pnlweb_utils::format_percent(value)
}

/// `part / whole * 100`, or zero when `whole` is not positive
fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory data source shared by the view tests

    use crate::datasource::{
        DataSource, DataSourceError, ExpenseRecord, GrossProfitReport, GrossProfitRequest, RevenueRecord,
    };
    use crate::period::PeriodRange;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeDataSource {
        pub gross_profit: GrossProfitReport,
        pub revenue: Vec<RevenueRecord>,
        pub expenses: Vec<ExpenseRecord>,
        pub fail: bool,
        pub gross_profit_requests: Mutex<Vec<GrossProfitRequest>>,
        pub ranges: Mutex<Vec<PeriodRange>>,
        pub calls: Mutex<usize>,
    }

    impl FakeDataSource {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn result<T>(&self, value: T) -> Result<T, DataSourceError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Err(DataSourceError::Unavailable {
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(value)
            }
        }
    }

    #[async_trait]
    impl DataSource for FakeDataSource {
        async fn gross_profit_report(
            &self,
            request: &GrossProfitRequest,
        ) -> Result<GrossProfitReport, DataSourceError> {
            self.gross_profit_requests.lock().unwrap().push(request.clone());
            self.result(self.gross_profit.clone())
        }

        async fn list_revenue(&self, range: &PeriodRange) -> Result<Vec<RevenueRecord>, DataSourceError> {
            self.ranges.lock().unwrap().push(*range);
            self.result(self.revenue.clone())
        }

        async fn list_expenses(&self, range: &PeriodRange) -> Result<Vec<ExpenseRecord>, DataSourceError> {
            self.ranges.lock().unwrap().push(*range);
            self.result(self.expenses.clone())
        }
    }

    pub fn deps(source: std::sync::Arc<FakeDataSource>) -> super::ReportDeps {
        super::ReportDeps {
            data_source: source,
            labels: Default::default(),
            routes: Default::default(),
        }
    }

    pub fn ctx(pairs: &[(&str, &str)]) -> super::ViewContext {
        super::ViewContext {
            query: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            current_path: String::new(),
            is_htmx: false,
            cache_version: "test".to_string(),
        }
    }
}
