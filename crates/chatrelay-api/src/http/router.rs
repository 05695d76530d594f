//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`. Middleware: CORS, request tracing.
//!
//! Every path the API does not claim is served from the static asset
//! directory (`[server] web_dir`, overridable via `CHATRELAY_WEB_DIR`).
//! If the directory does not exist, only the API is served.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/message",
            post(handlers::message::send_message)
                .delete(handlers::message::reset_session)
                .fallback(method_not_allowed),
        )
        .route(
            "/history",
            get(handlers::history::get_history).fallback(method_not_allowed),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check));

    let web_dir = state.config.server.web_dir.clone();
    if Path::new(&web_dir).is_dir() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir, "Static asset serving enabled");
    } else {
        tracing::warn!(path = %web_dir, "Static asset directory not found; serving API only");
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Method fallback for API routes.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
