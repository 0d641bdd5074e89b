//! Data access seam for the report views
//!
//! The views never compute report figures themselves. Everything comes from
//! a [`DataSource`], which the embedding application provides.

use crate::period::PeriodRange;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dimension a gross profit report is bucketed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Product,
    Location,
    Category,
    /// Time buckets, sized by [`PeriodGranularity`]
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    Monthly,
    Quarterly,
}

impl GroupKey {
    /// Map a UI group-by value to the request key and granularity.
    ///
    /// `monthly` and `quarterly` become time buckets; anything unrecognised
    /// falls back to `product`.
    pub fn from_group_by(group_by: &str) -> (GroupKey, Option<PeriodGranularity>) {
        match group_by {
            "location" => (GroupKey::Location, None),
            "category" => (GroupKey::Category, None),
            "monthly" => (GroupKey::Period, Some(PeriodGranularity::Monthly)),
            "quarterly" => (GroupKey::Period, Some(PeriodGranularity::Quarterly)),
            _ => (GroupKey::Product, None),
        }
    }
}

/// Parameters of a gross profit report query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrossProfitRequest {
    pub range: PeriodRange,
    pub group_by: Option<GroupKey>,
    pub granularity: Option<PeriodGranularity>,
    pub product_id: Option<String>,
    pub location_id: Option<String>,
    pub category_id: Option<String>,
}

impl GrossProfitRequest {
    /// Ungrouped request over `range`
    pub fn new(range: PeriodRange) -> Self {
        Self {
            range,
            group_by: None,
            granularity: None,
            product_id: None,
            location_id: None,
            category_id: None,
        }
    }

    pub fn grouped(mut self, group_by: GroupKey, granularity: Option<PeriodGranularity>) -> Self {
        self.group_by = Some(group_by);
        self.granularity = granularity;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossProfitLineItem {
    pub group_key: String,
    pub total_revenue: f64,
    pub total_discount: f64,
    pub net_revenue: f64,
    pub cost_of_goods_sold: f64,
    pub gross_profit: f64,
    pub gross_profit_margin: f64,
    pub units_sold: i64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossProfitSummary {
    pub total_revenue: f64,
    pub total_discount: f64,
    pub net_revenue: f64,
    pub total_cogs: f64,
    pub total_gross_profit: f64,
    pub overall_margin: f64,
    pub total_units_sold: i64,
    pub total_transactions: i64,
}

/// Gross profit line items plus their totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossProfitReport {
    pub line_items: Vec<GrossProfitLineItem>,
    pub summary: GrossProfitSummary,
}

/// One sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueRecord {
    pub id: String,
    pub reference_number: String,
    pub customer_name: String,
    pub currency: String,
    pub status: String,
    pub total_amount: f64,
    pub date: Option<NaiveDate>,
}

/// One expenditure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseRecord {
    pub id: String,
    pub reference_number: String,
    pub vendor_name: String,
    pub category: String,
    /// Display date, as stored
    pub expenditure_date: String,
    pub currency: String,
    pub status: String,
    pub total_amount: f64,
}

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("data source unavailable: {message}")]
    Unavailable { message: String },

    #[error("query failed: {message}")]
    Query { message: String },
}

/// Report data provider
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn gross_profit_report(
        &self,
        request: &GrossProfitRequest,
    ) -> Result<GrossProfitReport, DataSourceError>;

    async fn list_revenue(&self, range: &PeriodRange) -> Result<Vec<RevenueRecord>, DataSourceError>;

    async fn list_expenses(&self, range: &PeriodRange) -> Result<Vec<ExpenseRecord>, DataSourceError>;
}

/// Sum of `total_amount` over expense records
pub fn total_expenses(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.total_amount).sum()
}
