//! Route table for the report views
//!
//! Routes resolve in three layers:
//! 1. compiled-in defaults (`ReportsRoutes::default()`),
//! 2. an optional JSON overlay keyed by dot-notation (`reports.dashboard`)
//!    or by field name (`dashboard_url`),
//! 3. direct field assignment by the embedding application.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const REPORTS_BASE_URL: &str = "/app/reports/";
pub const REPORTS_DASHBOARD_URL: &str = "/app/reports/dashboard";
pub const REPORTS_REVENUE_URL: &str = "/app/reports/revenue";
pub const REPORTS_COST_OF_SALES_URL: &str = "/app/reports/cost-of-sales";
pub const REPORTS_GROSS_PROFIT_URL: &str = "/app/reports/gross-profit";
pub const REPORTS_EXPENSES_URL: &str = "/app/reports/expenses";
pub const REPORTS_NET_PROFIT_URL: &str = "/app/reports/net-profit";

/// Default route prefix for storage-backed file serving
pub const STORAGE_IMAGES_PREFIX: &str = "/storage/images";

/// Route paths for all reporting views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsRoutes {
    pub dashboard_url: String,
    pub revenue_url: String,
    pub cost_of_sales_url: String,
    pub gross_profit_url: String,
    pub expenses_url: String,
    pub net_profit_url: String,
}

impl Default for ReportsRoutes {
    fn default() -> Self {
        Self {
            dashboard_url: REPORTS_DASHBOARD_URL.to_string(),
            revenue_url: REPORTS_REVENUE_URL.to_string(),
            cost_of_sales_url: REPORTS_COST_OF_SALES_URL.to_string(),
            gross_profit_url: REPORTS_GROSS_PROFIT_URL.to_string(),
            expenses_url: REPORTS_EXPENSES_URL.to_string(),
            net_profit_url: REPORTS_NET_PROFIT_URL.to_string(),
        }
    }
}

impl ReportsRoutes {
    /// Dot-notation key to route path
    pub fn route_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("reports.dashboard", self.dashboard_url.clone()),
            ("reports.revenue", self.revenue_url.clone()),
            ("reports.cost_of_sales", self.cost_of_sales_url.clone()),
            ("reports.gross_profit", self.gross_profit_url.clone()),
            ("reports.expenses", self.expenses_url.clone()),
            ("reports.net_profit", self.net_profit_url.clone()),
        ])
    }

    /// Apply a JSON overlay on top of the current values.
    ///
    /// The overlay is a flat object of string values. Unknown keys are
    /// logged and skipped.
    pub fn apply_json(&mut self, json: &str) -> ConfigResult<()> {
        let overrides: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
                message: e.to_string(),
            })?;

        for (key, path) in overrides {
            match self.slot_mut(&key) {
                Some(slot) => *slot = path,
                None => log::warn!("Ignoring unknown route key '{}'", key),
            }
        }
        Ok(())
    }

    /// Defaults with the overlay file at `path` applied
    pub fn load_overlay(path: &Path) -> ConfigResult<Self> {
        let mut routes = Self::default();
        routes.apply_json(&ConfigError::read(path)?)?;
        Ok(routes)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "reports.dashboard" | "dashboard_url" => Some(&mut self.dashboard_url),
            "reports.revenue" | "revenue_url" => Some(&mut self.revenue_url),
            "reports.cost_of_sales" | "cost_of_sales_url" => Some(&mut self.cost_of_sales_url),
            "reports.gross_profit" | "gross_profit_url" => Some(&mut self.gross_profit_url),
            "reports.expenses" | "expenses_url" => Some(&mut self.expenses_url),
            "reports.net_profit" | "net_profit_url" => Some(&mut self.net_profit_url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = ReportsRoutes::default();
        assert_eq!(routes.dashboard_url, "/app/reports/dashboard");
        assert!(routes.net_profit_url.starts_with(REPORTS_BASE_URL));
        assert_eq!(routes.route_map().len(), 6);
        assert_eq!(routes.route_map()["reports.gross_profit"], "/app/reports/gross-profit");
    }

    #[test]
    fn test_json_overlay_dot_notation_and_field_names() {
        let mut routes = ReportsRoutes::default();
        routes
            .apply_json(r#"{"reports.dashboard": "/salon/reports", "revenue_url": "/salon/sales"}"#)
            .unwrap();

        assert_eq!(routes.dashboard_url, "/salon/reports");
        assert_eq!(routes.revenue_url, "/salon/sales");
        assert_eq!(routes.expenses_url, REPORTS_EXPENSES_URL);
    }

    #[test]
    fn test_json_overlay_unknown_key_is_ignored() {
        let mut routes = ReportsRoutes::default();
        routes.apply_json(r#"{"reports.unknown": "/nowhere"}"#).unwrap();
        assert_eq!(routes, ReportsRoutes::default());
    }

    #[test]
    fn test_json_overlay_invalid() {
        let mut routes = ReportsRoutes::default();
        let err = routes.apply_json("[1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[test]
    fn test_field_assignment_wins_last() {
        let mut routes = ReportsRoutes::default();
        routes.apply_json(r#"{"reports.expenses": "/json/expenses"}"#).unwrap();
        routes.expenses_url = "/app/expenses".to_string();
        assert_eq!(routes.route_map()["reports.expenses"], "/app/expenses");
    }

    #[test]
    fn test_load_overlay_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, r#"{"reports.net_profit": "/pnl"}"#).unwrap();

        let routes = ReportsRoutes::load_overlay(&path).unwrap();
        assert_eq!(routes.net_profit_url, "/pnl");
        assert_eq!(routes.dashboard_url, REPORTS_DASHBOARD_URL);
    }
}
