pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(handlers::handle_save_resume).get(handlers::handle_get_resume),
        )
        .route("/api/v1/resumes/preview", post(handlers::handle_preview))
        .route("/api/v1/resumes/history", get(handlers::handle_history))
        .route("/api/v1/resumes/pdf", post(handlers::handle_compile_pdf))
        .route(
            "/api/v1/resumes/sections/:section",
            patch(handlers::handle_patch_section),
        )
        .with_state(state)
}
