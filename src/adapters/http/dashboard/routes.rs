//! Route configuration for dashboard endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    collaborator_summary, committee_overview, dashboard_stats, evolution, role_completion,
};
use crate::adapters::http::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/dashboard/roles", get(role_completion))
        .route("/api/dashboard/committee", get(committee_overview))
        .route("/api/dashboard/collaborators/:id/summary", get(collaborator_summary))
        .route("/api/dashboard/collaborators/:id/evolution", get(evolution))
}
