//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat (streaming for plain messages, JSON for the other modes)
        .route("/chat", post(handlers::chat::chat))
        // Title generation for unsaved conversations
        .route("/generate-title", post(handlers::title::generate))
        // Profile (lazily created with defaults)
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        // Sessions
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route("/sessions/{id}", delete(handlers::session::delete_session))
        .route(
            "/sessions/{id}/rename",
            put(handlers::session::rename_session),
        )
        .route("/sessions/{id}/pin", put(handlers::session::pin_session));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
