//! API routes module

pub mod health;
pub mod products;

use axum::{Json, Router, routing::get};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(app(
        products::router(state)?,
        health::router(state.clone()),
        state.config.server.request_timeout,
    ))
}

/// Mount the products API under `/api/v1`, next to health and docs, with
/// request tracing and a per-request timeout.
pub fn app(products: Router, health: Router, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1/products", products)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(health)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(request_timeout))
}
