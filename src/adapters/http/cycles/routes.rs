//! Route configuration for cycle endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    active_cycle, cancel_cycle, create_cycle, export_cycle, extend_cycle, finalize_cycle,
    get_cycle, get_cycle_rubric, list_cycles, set_current_cycle, update_cycle, update_cycle_rubric,
};
use crate::adapters::http::AppState;

pub fn cycle_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cycles", get(list_cycles).post(create_cycle))
        .route("/api/cycles/active", get(active_cycle))
        .route("/api/cycles/current", put(set_current_cycle))
        .route(
            "/api/cycles/:id",
            get(get_cycle).patch(update_cycle).delete(cancel_cycle),
        )
        .route("/api/cycles/:id/extend", post(extend_cycle))
        .route("/api/cycles/:id/finalize", post(finalize_cycle))
        .route("/api/cycles/:id/rubric", get(get_cycle_rubric).put(update_cycle_rubric))
        .route("/api/cycles/:id/export", get(export_cycle))
}
