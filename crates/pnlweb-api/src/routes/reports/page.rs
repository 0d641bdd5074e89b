//! Report page handler, shared by all six views

use crate::error::ApiResult;
use crate::{is_htmx_request, AppState};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Response};
use pnlweb_core::{QueryParams, ReportView, ViewContext};

/// Render `view` for this request.
///
/// `hx-request` selects the partial template. Data-source failures never
/// surface here; only a render failure produces an error response.
pub async fn report_page(
    view: ReportView,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> ApiResult<Response> {
    let ctx = ViewContext {
        query,
        current_path: uri.path().to_string(),
        is_htmx: is_htmx_request(&headers),
        cache_version: state.config.app.cache_version.clone(),
    };

    let result = view.render(&state.deps, &ctx).await;
    log::debug!("{} -> {}", uri.path(), result.template);

    let rendered = state.renderer.render(&result)?;
    Ok(([(header::CONTENT_TYPE, rendered.content_type)], rendered.body).into_response())
}
