use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::candidates::{parent_candidates, CandidateRow};
use crate::catalog::hierarchy::{build_hierarchy, HierarchyRow};
use crate::catalog::resolve::{breadcrumb, BreadcrumbSegment};
use crate::catalog::store::CatalogStore;
use crate::cli::ServeArgs;
use crate::core::entry::CatalogEntry;

/// Shared application state
pub struct AppState {
    pub store: CatalogStore,
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[derive(Deserialize)]
struct BreadcrumbParams {
    code: String,
}

#[derive(Deserialize)]
struct ParentsParams {
    /// Code of the entry being edited; omit for a new entry
    code: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server
/// fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(catalog_path: Option<PathBuf>) -> anyhow::Result<Router> {
    let store = if let Some(path) = catalog_path {
        CatalogStore::load_from_file(&path)?
    } else {
        CatalogStore::load_embedded()?
    };
    tracing::info!("Serving catalog with {} entries", store.len());
    let state = Arc::new(AppState { store });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/hierarchy", get(hierarchy_handler))
        .route("/api/breadcrumb", get(breadcrumb_handler))
        .route("/api/parents", get(parents_handler))
        .route("/api/entries", get(entries_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests
                .layer(ConcurrencyLimitLayer::new(100))
                // Query-only API; no request bodies expected
                .layer(DefaultBodyLimit::max(64 * 1024)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router(args.catalog.clone())?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting dx-catalog web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/hierarchy"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Liveness check
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "entries": state.store.len(),
    }))
}

/// Flattened display order for the whole forest
async fn hierarchy_handler(State(state): State<Arc<AppState>>) -> Json<Vec<HierarchyRow>> {
    let nodes = build_hierarchy(state.store.entries());
    Json(nodes.iter().map(HierarchyRow::from).collect())
}

/// Root-to-entry breadcrumb trail. Unknown codes are a 404 at this boundary
/// even though the core treats them as an empty path.
async fn breadcrumb_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BreadcrumbParams>,
) -> Response {
    let trail: Vec<BreadcrumbSegment> = breadcrumb(&params.code, state.store.entries());
    if trail.is_empty() {
        return not_found(&params.code);
    }
    Json(trail).into_response()
}

/// Parent candidates for an entry being edited (or a new entry)
async fn parents_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParentsParams>,
) -> Response {
    let editing = match &params.code {
        Some(code) => match state.store.get(code) {
            Some(entry) => Some(entry),
            None => return not_found(code),
        },
        None => None,
    };

    let rows: Vec<CandidateRow> = parent_candidates(state.store.entries(), editing)
        .iter()
        .map(CandidateRow::from)
        .collect();
    Json(rows).into_response()
}

/// Substring search over code and name
async fn entries_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<CatalogEntry>> {
    let results: Vec<CatalogEntry> = state
        .store
        .search(params.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Json(results)
}

fn not_found(code: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Entry '{code}' not found in catalog"),
            error_type: "unknown_code".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router_with_embedded_catalog() {
        let router = create_router(None);
        assert!(router.is_ok());
    }

    #[test]
    fn test_create_router_missing_file_fails() {
        let router = create_router(Some(PathBuf::from("/nonexistent/catalog.json")));
        assert!(router.is_err());
    }
}
