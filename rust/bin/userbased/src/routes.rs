//! Route registration: module routes plus system endpoints.

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use userbase_core::Module;

use crate::middleware::{cors, log_requests};

/// Build the complete router with all routes.
pub fn build_router(modules: &[Box<dyn Module>]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        debug!("mounting {} routes", module.name());
        app = app.merge(module.routes());
    }

    // Outermost layer runs first: log, then CORS.
    app.layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_requests))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "userbased",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
