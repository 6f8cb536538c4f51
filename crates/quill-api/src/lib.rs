pub mod auth;
pub mod content;
pub mod error;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};

pub use auth::{AppState, AppStateInner};

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// All `/api` routes. Static pages and middleware layers are the server
/// binary's concern.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route(
            "/api/content",
            get(content::list_content).post(content::create_content),
        )
        .route("/api/content/{id}", delete(content::delete_content))
        .route("/api/health", get(health))
        .with_state(state)
}
