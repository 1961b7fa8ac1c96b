pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::placement::handlers as placement;
use crate::quiz::handlers as quiz;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Practice quizzes
        .route(
            "/practice",
            get(quiz::handle_practice_form).post(quiz::handle_generate_quiz),
        )
        .route("/submit-quiz", post(quiz::handle_submit_quiz))
        // Placement records
        .route("/coordinator", post(placement::handle_create_company))
        .route("/companies", get(placement::handle_list_companies))
        .route(
            "/students/:username/dashboard",
            get(placement::handle_dashboard),
        )
        .route(
            "/students/:username/profile",
            put(placement::handle_update_profile),
        )
        .with_state(state)
}
