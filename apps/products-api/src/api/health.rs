//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<String>,
}

impl HealthResponse {
    fn new(status: &'static str, failures: Vec<String>) -> Self {
        Self {
            status,
            service: "products-api",
            version: env!("CARGO_PKG_VERSION"),
            failures,
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", Vec::new()))
}

/// Ready once the database (and Redis, when used) answer a ping
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut failures = Vec::new();

    if let Err(e) = database::postgres::check_health(&state.db).await {
        failures.push(e.to_string());
    }
    if let Some(redis) = &state.redis {
        if let Err(e) = database::redis::check_health(redis).await {
            failures.push(e.to_string());
        }
    }

    if failures.is_empty() {
        (StatusCode::OK, Json(HealthResponse::new("ready", failures)))
    } else {
        tracing::warn!(?failures, "Readiness check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("unavailable", failures)),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
