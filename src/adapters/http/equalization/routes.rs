//! Route configuration for equalization endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    edit_equalization, equalization_history, get_equalization, save_equalization,
};
use crate::adapters::http::AppState;

pub fn equalization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/equalizations",
            get(get_equalization)
                .post(save_equalization)
                .put(edit_equalization),
        )
        .route("/api/equalizations/history", get(equalization_history))
}
