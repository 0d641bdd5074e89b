//! Translatable strings for the report views
//!
//! Every struct deserializes with `#[serde(default)]`, so a translation file
//! only needs the keys it overrides. Missing keys keep the English default.
//!
//! Translation files use camelCase keys. Serialized labels use the field
//! names, matching the page view-models they are embedded in.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All labels for the reports module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct ReportsLabels {
    pub gross_profit: GrossProfitLabels,
    pub revenue: RevenueLabels,
    pub cost_of_sales: CostOfSalesLabels,
    pub expenses: ExpensesLabels,
    pub net_profit: NetProfitLabels,
    pub dashboard: DashboardLabels,
    pub period: PeriodLabels,
}

impl ReportsLabels {
    /// Parse a (possibly partial) JSON translation
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
            message: e.to_string(),
        })
    }

    /// Load a translation file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::from_json(&ConfigError::read(path)?)
    }
}

/// Period preset labels shared by every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct PeriodLabels {
    pub this_month: String,
    pub last_month: String,
    pub this_quarter: String,
    pub last_quarter: String,
    pub this_year: String,
    pub last_year: String,
    pub custom: String,
    pub date_start: String,
    pub date_end: String,
    pub group_by: String,
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self {
            this_month: "This Month".to_string(),
            last_month: "Last Month".to_string(),
            this_quarter: "This Quarter".to_string(),
            last_quarter: "Last Quarter".to_string(),
            this_year: "This Year".to_string(),
            last_year: "Last Year".to_string(),
            custom: "Custom".to_string(),
            date_start: "Start Date".to_string(),
            date_end: "End Date".to_string(),
            group_by: "Group By".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct DashboardLabels {
    pub title: String,
    pub subtitle: String,
    pub revenue_card: String,
    pub expenses_card: String,
    pub net_profit_card: String,
    pub net_margin_card: String,
    pub revenue_desc: String,
    pub gross_profit_desc: String,
    pub cost_of_sales_desc: String,
    pub expenses_desc: String,
    pub net_profit_desc: String,
    pub view_report: String,
}

impl Default for DashboardLabels {
    fn default() -> Self {
        Self {
            title: "Reports".to_string(),
            subtitle: "Financial overview for this month".to_string(),
            revenue_card: "Revenue".to_string(),
            expenses_card: "Expenses".to_string(),
            net_profit_card: "Net Profit".to_string(),
            net_margin_card: "Net Margin".to_string(),
            revenue_desc: "Sales and collections by transaction".to_string(),
            gross_profit_desc: "Revenue less cost of goods sold, by product or period".to_string(),
            cost_of_sales_desc: "Cost of goods sold and its share of revenue".to_string(),
            expenses_desc: "Operating expenses by vendor and category".to_string(),
            net_profit_desc: "Profit and loss statement".to_string(),
            view_report: "View report".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct GrossProfitLabels {
    pub title: String,
    pub revenue_group: String,
    pub profitability_group: String,
    pub volume_group: String,
    pub gross_revenue: String,
    pub discount: String,
    pub net_revenue: String,
    pub cogs: String,
    #[serde(rename(deserialize = "profit"))]
    pub gross_profit: String,
    pub margin: String,
    pub units_sold: String,
    pub transactions: String,
    pub group_by: String,
    pub group_by_product: String,
    pub group_by_location: String,
    pub group_by_category: String,
    pub group_by_monthly: String,
    pub group_by_quarterly: String,
    pub filter_product: String,
    pub filter_location: String,
    pub filter_category: String,
    pub filter_all: String,
    pub apply: String,
    pub summary_net_revenue: String,
    pub summary_cogs: String,
    pub summary_gross_profit: String,
    pub summary_margin: String,
}

impl Default for GrossProfitLabels {
    fn default() -> Self {
        Self {
            title: "Gross Profit".to_string(),
            revenue_group: "Revenue".to_string(),
            profitability_group: "Profitability".to_string(),
            volume_group: "Volume".to_string(),
            gross_revenue: "Gross Revenue".to_string(),
            discount: "Discount".to_string(),
            net_revenue: "Net Revenue".to_string(),
            cogs: "COGS".to_string(),
            gross_profit: "Gross Profit".to_string(),
            margin: "Margin".to_string(),
            units_sold: "Units Sold".to_string(),
            transactions: "Transactions".to_string(),
            group_by: "Group By".to_string(),
            group_by_product: "Product".to_string(),
            group_by_location: "Location".to_string(),
            group_by_category: "Category".to_string(),
            group_by_monthly: "Monthly".to_string(),
            group_by_quarterly: "Quarterly".to_string(),
            filter_product: "Product".to_string(),
            filter_location: "Location".to_string(),
            filter_category: "Category".to_string(),
            filter_all: "All".to_string(),
            apply: "Apply".to_string(),
            summary_net_revenue: "Net Revenue".to_string(),
            summary_cogs: "Cost of Goods Sold".to_string(),
            summary_gross_profit: "Gross Profit".to_string(),
            summary_margin: "Gross Margin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct RevenueLabels {
    pub title: String,
    pub subtitle: String,
    pub reference: String,
    pub customer: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub summary_total: String,
    pub summary_transactions: String,
    pub summary_average: String,
}

impl Default for RevenueLabels {
    fn default() -> Self {
        Self {
            title: "Revenue".to_string(),
            subtitle: "Sales recorded in the selected period".to_string(),
            reference: "Reference".to_string(),
            customer: "Customer".to_string(),
            date: "Date".to_string(),
            amount: "Amount".to_string(),
            status: "Status".to_string(),
            summary_total: "Total Revenue".to_string(),
            summary_transactions: "Transactions".to_string(),
            summary_average: "Average Sale".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct CostOfSalesLabels {
    pub title: String,
    pub subtitle: String,
    pub item: String,
    pub cogs: String,
    pub net_revenue: String,
    pub ratio: String,
    pub units: String,
    #[serde(rename(deserialize = "summaryTotalCogs"))]
    pub summary_total_cogs: String,
    pub summary_revenue: String,
    #[serde(rename(deserialize = "summaryCosRatio"))]
    pub summary_cogs_ratio: String,
    pub summary_units: String,
}

impl Default for CostOfSalesLabels {
    fn default() -> Self {
        Self {
            title: "Cost of Sales".to_string(),
            subtitle: "Cost of goods sold by product".to_string(),
            item: "Item".to_string(),
            cogs: "COGS".to_string(),
            net_revenue: "Net Revenue".to_string(),
            ratio: "COGS %".to_string(),
            units: "Units".to_string(),
            summary_total_cogs: "Total COGS".to_string(),
            summary_revenue: "Net Revenue".to_string(),
            summary_cogs_ratio: "COGS Ratio".to_string(),
            summary_units: "Units Sold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct ExpensesLabels {
    pub title: String,
    pub subtitle: String,
    pub reference: String,
    pub vendor: String,
    pub category: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub summary_total: String,
    pub summary_count: String,
    pub summary_approved: String,
    pub summary_pending: String,
}

impl Default for ExpensesLabels {
    fn default() -> Self {
        Self {
            title: "Expenses".to_string(),
            subtitle: "Expenditures recorded in the selected period".to_string(),
            reference: "Reference".to_string(),
            vendor: "Vendor".to_string(),
            category: "Category".to_string(),
            date: "Date".to_string(),
            amount: "Amount".to_string(),
            status: "Status".to_string(),
            summary_total: "Total Expenses".to_string(),
            summary_count: "Records".to_string(),
            summary_approved: "Approved".to_string(),
            summary_pending: "Pending".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct NetProfitLabels {
    pub title: String,
    pub subtitle: String,
    pub revenue: String,
    pub cost_of_sales: String,
    pub gross_profit: String,
    pub gross_margin: String,
    pub expenses: String,
    pub net_profit: String,
    pub net_margin: String,
    pub summary_revenue: String,
    #[serde(rename(deserialize = "summaryGrossProfit"))]
    pub summary_gross: String,
    pub summary_expenses: String,
    pub summary_net_profit: String,
}

impl Default for NetProfitLabels {
    fn default() -> Self {
        Self {
            title: "Net Profit".to_string(),
            subtitle: "Profit and loss for the selected period".to_string(),
            revenue: "Revenue".to_string(),
            cost_of_sales: "Cost of Sales".to_string(),
            gross_profit: "Gross Profit".to_string(),
            gross_margin: "Gross Margin".to_string(),
            expenses: "Operating Expenses".to_string(),
            net_profit: "Net Profit".to_string(),
            net_margin: "Net Margin".to_string(),
            summary_revenue: "Revenue".to_string(),
            summary_gross: "Gross Profit".to_string(),
            summary_expenses: "Expenses".to_string(),
            summary_net_profit: "Net Profit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_translation_keeps_defaults() {
        let labels = ReportsLabels::from_json(
            r#"{"period": {"thisMonth": "Ngayong Buwan"}, "grossProfit": {"profit": "Kita"}}"#,
        )
        .unwrap();

        assert_eq!(labels.period.this_month, "Ngayong Buwan");
        assert_eq!(labels.period.last_month, "Last Month");
        assert_eq!(labels.gross_profit.gross_profit, "Kita");
        assert_eq!(labels.revenue, RevenueLabels::default());
    }

    #[test]
    fn test_renamed_keys() {
        let labels = ReportsLabels::from_json(
            r#"{"costOfSales": {"summaryCosRatio": "Ratio"}, "netProfit": {"summaryGrossProfit": "GP"}}"#,
        )
        .unwrap();
        assert_eq!(labels.cost_of_sales.summary_cogs_ratio, "Ratio");
        assert_eq!(labels.net_profit.summary_gross, "GP");
    }

    #[test]
    fn test_serialized_keys_match_field_names() {
        let value = serde_json::to_value(ReportsLabels::default()).unwrap();
        assert_eq!(value["period"]["this_month"], "This Month");
        assert!(value["cost_of_sales"]["summary_cogs_ratio"].is_string());
        assert!(value["gross_profit"]["gross_profit"].is_string());
        assert!(value.get("costOfSales").is_none());
    }

    #[test]
    fn test_invalid_translation() {
        assert!(ReportsLabels::from_json("{not json").is_err());
    }
}
