pub mod health;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/resume", get(resume::handle_hello))
        .route("/resume/generate", post(resume::handle_generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
