//! HTTP handlers for equalization endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    EditEqualizationCommand, GetEqualizationHistoryQuery, GetEqualizationQuery,
    SaveEqualizationCommand,
};

use super::dto::{EqualizationParams, EqualizationRequest};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::AppState;

/// POST /api/equalizations
pub async fn save_equalization(
    State(state): State<AppState>,
    Json(request): Json<EqualizationRequest>,
) -> ApiResult<impl IntoResponse> {
    let saved = state
        .save_equalization_handler()
        .handle(SaveEqualizationCommand {
            cycle_id: request.cycle_id,
            collaborator_id: request.collaborator_id,
            score: request.score,
            justification: request.justification,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/equalizations
pub async fn edit_equalization(
    State(state): State<AppState>,
    Json(request): Json<EqualizationRequest>,
) -> ApiResult<impl IntoResponse> {
    let edited = state
        .edit_equalization_handler()
        .handle(EditEqualizationCommand {
            cycle_id: request.cycle_id,
            collaborator_id: request.collaborator_id,
            score: request.score,
            justification: request.justification,
            change_reason: request.change_reason,
            changed_by: request.changed_by,
        })
        .await?;
    Ok(Json(edited))
}

/// GET /api/equalizations
pub async fn get_equalization(
    State(state): State<AppState>,
    Query(params): Query<EqualizationParams>,
) -> ApiResult<impl IntoResponse> {
    let found = state
        .get_equalization_handler()
        .handle(GetEqualizationQuery {
            collaborator_id: params.collaborator_id,
            cycle_id: params.cycle_id,
        })
        .await?;
    Ok(Json(found))
}

/// GET /api/equalizations/history
pub async fn equalization_history(
    State(state): State<AppState>,
    Query(params): Query<EqualizationParams>,
) -> ApiResult<impl IntoResponse> {
    let history = state
        .equalization_history_handler()
        .handle(GetEqualizationHistoryQuery {
            collaborator_id: params.collaborator_id,
            cycle_id: params.cycle_id,
        })
        .await?;
    Ok(Json(history))
}
