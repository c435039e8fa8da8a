//! HTTP routes for the survey endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{callback, cookies_page, finish, home, logout, question, update_question};

/// Creates the survey router with all endpoints.
pub fn survey_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/callback", get(callback))
        .route("/question/:question", get(question))
        .route("/api/update-question/:question", post(update_question))
        .route("/finish", get(finish))
        .route("/logout", get(logout))
        .route("/cookies", get(cookies_page))
}
