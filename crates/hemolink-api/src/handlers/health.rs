//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall service status.
    pub status: &'static str,
    /// Database reachability.
    pub database: &'static str,
    /// Number of live WebSocket channels.
    pub live_channels: usize,
}

/// GET /api/health — liveness and dependency probe (no auth)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            "down"
        }
    };

    Json(HealthStatus {
        status: if database == "up" { "ok" } else { "degraded" },
        database,
        live_channels: state.registry.channel_count(),
    })
}
