//! HTTP handlers for draft rubric endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    GetActiveCriteriaQuery, RemoveTrackConfigCommand, UpsertTrackConfigCommand,
};
use crate::domain::foundation::{CriterionId, TrackId};

use super::dto::UpsertTrackConfigRequest;
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::AppState;

/// GET /api/rubric/tracks/:track_id
pub async fn get_track_rubric(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let track_id: TrackId = track_id.parse()?;
    let rubric = state
        .get_active_criteria_handler()
        .handle(GetActiveCriteriaQuery { track_id })
        .await?;
    Ok(Json(rubric))
}

/// PUT /api/rubric/tracks/:track_id
pub async fn upsert_track_config(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
    Json(request): Json<UpsertTrackConfigRequest>,
) -> ApiResult<impl IntoResponse> {
    let track_id: TrackId = track_id.parse()?;
    let result = state
        .upsert_track_config_handler()
        .handle(UpsertTrackConfigCommand {
            track_id,
            pillar_id: request.pillar_id,
            criterion_id: request.criterion_id,
            weight: request.weight,
            is_active: request.is_active,
        })
        .await?;
    Ok(Json(result.rows))
}

/// DELETE /api/rubric/tracks/:track_id/criteria/:criterion_id
pub async fn remove_track_config(
    State(state): State<AppState>,
    Path((track_id, criterion_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let track_id: TrackId = track_id.parse()?;
    let criterion_id: CriterionId = criterion_id.parse()?;
    state
        .remove_track_config_handler()
        .handle(RemoveTrackConfigCommand { track_id, criterion_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
