//! HTTP handlers for dashboard endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    CollaboratorSummaryQuery, CommitteeOverviewQuery, DashboardQuery, EvolutionQuery,
};
use crate::domain::foundation::UserId;

use super::dto::{CycleParams, EvolutionParams};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::AppState;

/// GET /api/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Query(params): Query<CycleParams>,
) -> ApiResult<impl IntoResponse> {
    let stats = state
        .dashboard_stats_handler()
        .handle(DashboardQuery {
            cycle: params.cycle_ref()?,
        })
        .await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/roles
pub async fn role_completion(
    State(state): State<AppState>,
    Query(params): Query<CycleParams>,
) -> ApiResult<impl IntoResponse> {
    let roles = state
        .role_completion_handler()
        .handle(DashboardQuery {
            cycle: params.cycle_ref()?,
        })
        .await?;
    Ok(Json(roles))
}

/// GET /api/dashboard/committee
pub async fn committee_overview(
    State(state): State<AppState>,
    Query(params): Query<CycleParams>,
) -> ApiResult<impl IntoResponse> {
    let overview = state
        .committee_overview_handler()
        .handle(CommitteeOverviewQuery {
            cycle: params.cycle_ref()?,
        })
        .await?;
    Ok(Json(overview))
}

/// GET /api/dashboard/collaborators/:id/summary
pub async fn collaborator_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CycleParams>,
) -> ApiResult<impl IntoResponse> {
    let collaborator_id: UserId = id.parse()?;
    let summary = state
        .collaborator_summary_handler()
        .handle(CollaboratorSummaryQuery {
            collaborator_id,
            cycle: params.cycle_ref()?,
        })
        .await?;
    Ok(Json(summary))
}

/// GET /api/dashboard/collaborators/:id/evolution
pub async fn evolution(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<EvolutionParams>,
) -> ApiResult<impl IntoResponse> {
    let collaborator_id: UserId = id.parse()?;
    let evolution = state
        .evolution_handler()
        .handle(EvolutionQuery {
            collaborator_id,
            cycle_ids: params.cycle_ids()?,
        })
        .await?;
    Ok(Json(evolution))
}
