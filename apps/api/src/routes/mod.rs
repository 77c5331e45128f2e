pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::interview::handlers as interview;
use crate::practice::handlers as practice;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/token", post(auth::handle_token))
        .route("/api/auth/me", get(auth::handle_me))
        .route("/api/auth/logout", post(auth::handle_logout))
        // Resume
        .route("/api/resume/build", post(resume::handle_build))
        .route("/api/resume/user/list", get(resume::handle_list))
        .route("/api/resume/:id", get(resume::handle_get))
        // Interview
        .route("/api/interview/questions", get(interview::handle_get_questions))
        .route("/api/interview/answer", post(interview::handle_submit_answer))
        // Practice
        .route("/api/practice/questions", get(practice::handle_get_all))
        .route("/api/practice/questions/random", get(practice::handle_get_random))
        .route(
            "/api/practice/questions/:category",
            get(practice::handle_get_by_category),
        )
        .route("/api/practice/submit", post(practice::handle_submit))
        // Dashboard
        .route("/api/dashboard/progress", get(dashboard::handle_progress))
        .route("/api/dashboard/stats", get(dashboard::handle_stats))
        .with_state(state)
}
