//! HTTP handlers for cycle endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    CancelCycleCommand, CreateCycleCommand, ExportRowsQuery, ExtendCycleCommand,
    FinalizeCycleCommand, GetCycleQuery, GetCycleRubricQuery, SetCurrentCycleCommand,
    UpdateCycleCommand, UpdateCycleRubricCommand,
};
use crate::domain::cycle::CycleView;
use crate::domain::foundation::CycleId;

use super::dto::{
    CancelCycleResponse, CreateCycleRequest, ExtendCycleRequest, SetCurrentCycleRequest,
    UpdateCycleRequest, UpdateCycleRubricRequest,
};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::AppState;

// ════════════════════════════════════════════════════════════════════════════════
// Queries (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/cycles
pub async fn list_cycles(State(state): State<AppState>) -> ApiResult<Json<Vec<CycleView>>> {
    Ok(Json(state.list_cycles_handler().handle().await?))
}

/// GET /api/cycles/active
pub async fn active_cycle(State(state): State<AppState>) -> ApiResult<Json<Option<CycleView>>> {
    Ok(Json(state.find_active_cycle_handler().handle().await?))
}

/// GET /api/cycles/:id
pub async fn get_cycle(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let view = state.get_cycle_handler().handle(GetCycleQuery { cycle_id }).await?;
    Ok(Json(view))
}

/// GET /api/cycles/:id/rubric
pub async fn get_cycle_rubric(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let rubric = state
        .get_cycle_rubric_handler()
        .handle(GetCycleRubricQuery { cycle_id })
        .await?;
    Ok(Json(rubric))
}

/// GET /api/cycles/:id/export
pub async fn export_cycle(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let rows = state.export_rows_handler().handle(ExportRowsQuery { cycle_id }).await?;
    Ok(Json(rows))
}

// ════════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/cycles
pub async fn create_cycle(
    State(state): State<AppState>,
    Json(request): Json<CreateCycleRequest>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .create_cycle_handler()
        .handle(CreateCycleCommand {
            name: request.name,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PATCH /api/cycles/:id
pub async fn update_cycle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCycleRequest>,
) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let view = state
        .update_cycle_handler()
        .handle(UpdateCycleCommand {
            name: request.name,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            ..UpdateCycleCommand::new(cycle_id)
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/cycles/:id/extend
pub async fn extend_cycle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ExtendCycleRequest>,
) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let view = state
        .extend_cycle_handler()
        .handle(ExtendCycleCommand {
            cycle_id,
            new_end_date: request.new_end_date,
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/cycles/:id/finalize
pub async fn finalize_cycle(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let view = state
        .finalize_cycle_handler()
        .handle(FinalizeCycleCommand { cycle_id })
        .await?;
    Ok(Json(view))
}

/// DELETE /api/cycles/:id
pub async fn cancel_cycle(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let cancelled = state
        .cancel_cycle_handler()
        .handle(CancelCycleCommand { cycle_id })
        .await?;
    Ok(Json(CancelCycleResponse::from(cancelled)))
}

/// PUT /api/cycles/current
pub async fn set_current_cycle(
    State(state): State<AppState>,
    Json(request): Json<SetCurrentCycleRequest>,
) -> ApiResult<StatusCode> {
    state
        .set_current_cycle_handler()
        .handle(SetCurrentCycleCommand {
            cycle_id: request.cycle_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/cycles/:id/rubric
pub async fn update_cycle_rubric(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCycleRubricRequest>,
) -> ApiResult<impl IntoResponse> {
    let cycle_id: CycleId = id.parse()?;
    let row = state
        .update_cycle_rubric_handler()
        .handle(UpdateCycleRubricCommand {
            cycle_id,
            track_id: request.track_id,
            criterion_id: request.criterion_id,
            weight: request.weight,
            is_active: request.is_active,
        })
        .await?;
    Ok(Json(row))
}
