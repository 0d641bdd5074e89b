//! JSON-backed data source
//!
//! Serves a stored gross profit report as-is and filters stored revenue and
//! expense records by date. No figures are recomputed.

use crate::datasource::{
    DataSource, DataSourceError, ExpenseRecord, GrossProfitReport, GrossProfitRequest, RevenueRecord,
};
use crate::error::{CoreError, CoreResult};
use crate::period::PeriodRange;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureDataSource {
    pub gross_profit: GrossProfitReport,
    pub revenue: Vec<RevenueRecord>,
    pub expenses: Vec<ExpenseRecord>,
}

impl FixtureDataSource {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a fixture file
    pub async fn load(path: &Path) -> CoreResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CoreError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;
        let fixtures = Self::from_json(&content).map_err(|e| CoreError::InvalidFormat {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!(
            "Loaded fixtures from {}: {} line items, {} revenue, {} expenses",
            path.display(),
            fixtures.gross_profit.line_items.len(),
            fixtures.revenue.len(),
            fixtures.expenses.len()
        );
        Ok(fixtures)
    }
}

#[async_trait]
impl DataSource for FixtureDataSource {
    async fn gross_profit_report(
        &self,
        request: &GrossProfitRequest,
    ) -> Result<GrossProfitReport, DataSourceError> {
        log::debug!(
            "Fixture gross profit report {:?} for {} .. {}",
            request.group_by,
            request.range.start,
            request.range.end
        );
        Ok(self.gross_profit.clone())
    }

    async fn list_revenue(&self, range: &PeriodRange) -> Result<Vec<RevenueRecord>, DataSourceError> {
        Ok(self
            .revenue
            .iter()
            .filter(|r| r.date.map_or(true, |date| range.contains_date(date)))
            .cloned()
            .collect())
    }

    async fn list_expenses(&self, range: &PeriodRange) -> Result<Vec<ExpenseRecord>, DataSourceError> {
        Ok(self
            .expenses
            .iter()
            .filter(|r| {
                NaiveDate::parse_from_str(&r.expenditure_date, "%Y-%m-%d")
                    .map_or(true, |date| range.contains_date(date))
            })
            .cloned()
            .collect())
    }
}
