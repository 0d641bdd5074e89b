//! Period preset routes
//!
//! Lets a front end show the same preset list and date ranges the report
//! views use.

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use pnlweb_core::filter::{default_period_presets, param, FilterOption};
use pnlweb_core::period::{self, PeriodPreset};
use pnlweb_core::QueryParams;
use serde::Serialize;

/// A resolved range as returned by `/api/reports/period`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRangeResponse {
    pub preset: PeriodPreset,
    pub start: String,
    pub end: String,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

/// Preset options in picker order (JSON API)
pub async fn api_period_presets(State(state): State<AppState>) -> Json<Vec<FilterOption>> {
    Json(default_period_presets(
        &state.deps.labels.period,
        PeriodPreset::default().as_str(),
    ))
}

/// Resolve `preset` (also accepted as `period`, plus `start`/`end` for
/// `custom`) to a date range.
///
/// Unlike the report views, an unknown preset is rejected.
pub async fn api_period_range(Query(query): Query<QueryParams>) -> ApiResult<Json<PeriodRangeResponse>> {
    let token = match param(&query, "preset") {
        "" => param(&query, "period"),
        value => value,
    };
    let preset = match token {
        "" => PeriodPreset::default(),
        token => token
            .parse::<PeriodPreset>()
            .map_err(|message| ApiError::BadRequest { message })?,
    };

    let range = period::resolve_custom_now(preset, param(&query, "start"), param(&query, "end"));
    Ok(Json(PeriodRangeResponse {
        preset,
        start: range.start.to_rfc3339(),
        end: range.end.to_rfc3339(),
        start_timestamp: range.start_timestamp(),
        end_timestamp: range.end_timestamp(),
    }))
}
