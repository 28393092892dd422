//! Route configuration for evaluation endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{import_users, pending_evaluations, submit_evaluation, submit_self_assessment};
use crate::adapters::http::AppState;

pub fn evaluation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/evaluations", post(submit_evaluation))
        .route("/api/evaluations/self-assessment", post(submit_self_assessment))
        .route("/api/evaluations/pending", get(pending_evaluations))
        .route("/api/users/import", post(import_users))
}
