pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scan::handlers;
use crate::state::AppState;

/// Resumes and JD files above this size are rejected before extraction.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scan API
        .route("/api/v1/scan", post(handlers::handle_scan))
        .route("/api/v1/jd/skills", post(handlers::handle_jd_skills))
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommendations),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
