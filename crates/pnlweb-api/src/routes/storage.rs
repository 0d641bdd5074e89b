//! Storage-backed file route, `GET <prefix>/*path`

use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use pnlweb_core::ServeError;
use tokio_util::sync::CancellationToken;

/// Served objects are immutable by key
pub const CACHE_CONTROL: &str = "public, max-age=86400";

/// Non-standard "client closed request"
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Stream a stored object.
///
/// The read is cancelled if the client disconnects: axum drops this future,
/// and the drop guard cancels the token the reader is watching.
pub async fn serve_storage(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match state.storage.serve(&key, &cancel).await {
        Ok(object) => (
            [
                (header::CONTENT_TYPE, object.content_type),
                (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
            ],
            object.content,
        )
            .into_response(),
        Err(ServeError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(ServeError::Cancelled) => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
            .unwrap_or(StatusCode::BAD_REQUEST)
            .into_response(),
        Err(ServeError::Internal) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
