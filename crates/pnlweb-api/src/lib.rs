//! HTTP server for the report views, with HTMX support
//!
//! Routes are organized into modules:
//! - routes::reports: report pages at their configured paths, plus JSON API
//! - routes::period: period presets and range resolution
//! - routes::storage: files served from the storage backend

pub mod error;
pub mod render;
pub mod routes;

use axum::http::{HeaderMap, Method, Uri};
use axum::{extract::Query, extract::State, routing::get, Router};
use pnlweb_config::Config;
use pnlweb_core::{QueryParams, ReportDeps, ReportView, StorageService};
use render::{JsonRenderer, Renderer};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub deps: ReportDeps,
    pub storage: StorageService,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// State with the default JSON renderer
    pub fn new(config: Config, deps: ReportDeps, storage: StorageService) -> Self {
        Self {
            config: Arc::new(config),
            deps,
            storage,
            renderer: Arc::new(JsonRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

const HEALTH_ROUTE: &str = "/api/health";
const REPORT_ROUTES_ROUTE: &str = "/api/reports/routes";
const REPORT_LABELS_ROUTE: &str = "/api/reports/labels";
const PERIOD_PRESETS_ROUTE: &str = "/api/reports/period-presets";
const PERIOD_RANGE_ROUTE: &str = "/api/reports/period";

const API_ROUTES: [&str; 5] = [
    HEALTH_ROUTE,
    REPORT_ROUTES_ROUTE,
    REPORT_LABELS_ROUTE,
    PERIOD_PRESETS_ROUTE,
    PERIOD_RANGE_ROUTE,
];

/// Absolute path with no capture or wildcard segments
fn is_static_route(path: &str) -> bool {
    path.starts_with('/') && !path.contains(['*', ':', '{', '}'])
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::period::{api_period_presets, api_period_range};
    use routes::reports::{api_report_labels, api_report_routes};
    use routes::storage::serve_storage;

    let api = Router::new()
        .route(HEALTH_ROUTE, get(health_check))
        .route(REPORT_ROUTES_ROUTE, get(api_report_routes))
        .route(REPORT_LABELS_ROUTE, get(api_report_labels))
        .route(PERIOD_PRESETS_ROUTE, get(api_period_presets))
        .route(PERIOD_RANGE_ROUTE, get(api_period_range))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]));

    let mut router = Router::new()
        .merge(api)
        .route(&state.storage.route_pattern(), get(serve_storage));

    // Report pages live wherever the route table puts them
    let storage_prefix = format!("{}/", state.storage.route_prefix());
    let mut taken: HashSet<String> = API_ROUTES.iter().map(|r| r.to_string()).collect();
    for view in ReportView::ALL {
        let path = view.route(&state.deps.routes).to_string();
        if !is_static_route(&path) || path.starts_with(&storage_prefix) || !taken.insert(path.clone()) {
            log::error!("Skipping {} report: route {:?} is invalid or already taken", view.sub_nav(), path);
            continue;
        }
        router = router.route(
            &path,
            get(
                move |state: State<AppState>, uri: Uri, headers: HeaderMap, query: Query<QueryParams>| {
                    routes::reports::report_page(view, state, uri, headers, query)
                },
            ),
        );
    }

    router.with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.bind_addr();
    let routes = state.deps.routes.clone();
    let storage_prefix = state.storage.route_prefix().to_string();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting pnlweb server on http://{}", addr);
    for view in ReportView::ALL {
        log::info!("  - {} ({})", view.route(&routes), view.sub_nav());
    }
    log::info!("  - {}/* (stored files)", storage_prefix);
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
