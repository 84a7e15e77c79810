//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    /// Current time, RFC 3339.
    pub timestamp: String,
    /// Seconds since the process started.
    pub uptime: f64,
    pub redis: RedisHealth,
}

/// Cache connectivity as seen by the health check.
#[derive(Debug, Serialize, ToSchema)]
pub struct RedisHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Creates the health router, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint.
///
/// Always answers 200; a cache outage is reported in the body only.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis = match state.cache.ping().await {
        Ok(connected) => RedisHealth {
            connected,
            error: None,
        },
        Err(e) => RedisHealth {
            connected: false,
            error: Some(e.to_string()),
        },
    };

    Json(HealthResponse {
        success: true,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs_f64(),
        redis,
    })
}
