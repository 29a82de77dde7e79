//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::DistanceError;
use crate::prompts::DEFAULT_EMPTY_QUERY_PROMPTS;
use crate::session::{distance_between, search_prompts};

use super::dto::*;
use super::state::AppState;

/// Upper bound on the prompts a single request may ask for.
const MAX_PROMPTS: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/prompts", get(prompts))
        .route("/api/distance", get(distance))
        .route("/api/status", get(status))
        .route("/api/sync", post(sync))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Ranked prompts for a search box.
async fn prompts(
    State(state): State<AppState>,
    Query(req): Query<PromptsRequest>,
) -> Json<PromptsResponse> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_EMPTY_QUERY_PROMPTS)
        .min(MAX_PROMPTS);
    let catalog = state.catalog();
    let keywords = state.normalized_keywords(&catalog).await;

    let mut prompts = search_prompts(&catalog.stations, &keywords, &req.q, &req.exclude, limit);
    prompts.truncate(limit);

    Json(PromptsResponse { prompts })
}

/// Great-circle distance between two stations named exactly.
async fn distance(
    State(state): State<AppState>,
    Query(req): Query<DistanceRequest>,
) -> Result<Json<DistanceResponse>, AppError> {
    let distance_km = distance_between(&state.catalog(), &req.from, &req.to)?;

    Ok(Json(DistanceResponse {
        from: req.from,
        to: req.to,
        distance_km,
    }))
}

/// Catalog size and sync state.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let catalog = state.catalog();

    Json(StatusResponse {
        updating: state.sync.is_updating(),
        last_sync_ms: state.sync.last_sync().last_sync_ms(),
        stations: catalog.stations.len(),
        keywords: catalog.keywords.len(),
    })
}

/// Run a sync now and report what it did.
async fn sync(State(state): State<AppState>) -> Json<SyncResponse> {
    let outcome = state.sync.sync().await;
    Json(SyncResponse { outcome })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
}

impl From<DistanceError> for AppError {
    fn from(e: DistanceError) -> Self {
        match e {
            DistanceError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
