//! Reports JSON API

use crate::AppState;
use axum::extract::State;
use axum::Json;
use pnlweb_config::ReportsLabels;
use std::collections::BTreeMap;

/// Route table keyed by dot-notation name, e.g. `reports.revenue`
pub async fn api_report_routes(State(state): State<AppState>) -> Json<BTreeMap<&'static str, String>> {
    Json(state.deps.routes.route_map())
}

/// Labels currently in effect
pub async fn api_report_labels(State(state): State<AppState>) -> Json<ReportsLabels> {
    Json(state.deps.labels.as_ref().clone())
}
