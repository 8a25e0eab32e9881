//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection, body limit)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with `VOXPIPE_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - The upload form and the pipeline endpoint

pub mod doc;
mod health;
mod index;
mod transcribe;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::Router;

use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(index::router())
        .merge(health::router())
        .merge(transcribe::router());

    // ── Swagger UI ────────────────────────────────────────────────────────────
    // Enabled by default; disable with VOXPIPE_ENABLE_SWAGGER=false in
    // production to avoid exposing the API structure.
    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(from_fn(trace::trace_middleware))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
