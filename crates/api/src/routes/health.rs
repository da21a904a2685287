use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use geomark_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Server time at the probe.
    pub timestamp: Timestamp,
    /// Whether the database answered a `SELECT 1`.
    pub database: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = geomark_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        database: if db_healthy { "connected" } else { "unreachable" },
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
