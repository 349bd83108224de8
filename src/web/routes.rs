//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // API routes
        .route("/api/providers", get(handlers::list_providers))
        .route("/api/config", post(handlers::update_config))
        .route("/api/search", post(handlers::search))
        .route("/health", get(handlers::health));

    // Serve the built front-end when present, with SPA fallback
    if let Some(static_dir) = static_dir(&state) {
        let index = static_dir.join("index.html");
        router = router.fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)));
    }

    router.layer(cors).with_state(state)
}

fn static_dir(state: &AppState) -> Option<PathBuf> {
    state
        .settings
        .server
        .static_dir
        .clone()
        .or_else(|| {
            let conventional = PathBuf::from("static");
            conventional.is_dir().then_some(conventional)
        })
        .filter(|dir| dir.is_dir())
}
