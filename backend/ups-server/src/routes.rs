use crate::{AppState, get_profile, health, update_profile, upload_profile_picture};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.upload_body_limit();
    let upload_dir = state.uploads.policy().directory.clone();

    Router::new()
        // Profile endpoints
        .route("/api/v1/user/profile/{user_id}", get(get_profile))
        .route("/api/v1/user/update", put(update_profile))
        .route(
            "/api/v1/user/uploadProfilePicture/{user_id}",
            post(upload_profile_picture).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Stored pictures
        .nest_service("/uploads", ServeDir::new(upload_dir))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
