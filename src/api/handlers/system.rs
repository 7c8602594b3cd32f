//! System endpoints: the database health probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::persistence::{self, HealthSnapshot};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<HealthSnapshot>,
    timestamp: String,
    version: String,
}

/// `GET /health` - Database connectivity probe for external monitoring.
///
/// Runs a trivial round-trip query plus record counts. Returns 503 with
/// `connected: false` when the database is unreachable; the registries
/// themselves never consume this.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable"),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match persistence::health_snapshot(&state.db).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                connected: true,
                counts: Some(snapshot),
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    connected: false,
                    counts: None,
                    timestamp: Utc::now().to_rfc3339(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                }),
            )
        }
    }
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
