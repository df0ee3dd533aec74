//! Health endpoints
//!
//! `/health` and `/health/live` answer while the process runs;
//! `/health/ready` also pings the user store.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'static str>,
}

impl HealthResponse {
    fn new(status: &'static str, store: Option<&'static str>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", None))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive", None))
}

/// 503 while the store is unreachable; the cause is only logged
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::new("ready", Some("reachable"))),
        ),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("not_ready", Some("unreachable"))),
            )
        }
    }
}
