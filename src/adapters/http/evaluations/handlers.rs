//! HTTP handlers for evaluation endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ImportUsersCommand, PendingForQuery, SubmitEvaluationCommand, SubmitSelfAssessmentCommand,
};
use crate::domain::foundation::ValidationError;

use super::dto::{
    ImportUsersRequest, PendingParams, SelfAssessmentItemRequest, SubmitEvaluationRequest,
    SubmitSelfAssessmentRequest,
};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::AppState;

/// POST /api/evaluations
pub async fn submit_evaluation(
    State(state): State<AppState>,
    Json(request): Json<SubmitEvaluationRequest>,
) -> ApiResult<impl IntoResponse> {
    let payload = request.payload.into_payload()?;
    let record = state
        .submit_evaluation_handler()
        .handle(SubmitEvaluationCommand {
            evaluator_id: request.evaluator_id,
            evaluatee_id: request.evaluatee_id,
            cycle_id: request.cycle_id,
            kind: request.kind.unwrap_or_else(|| payload.kind()),
            payload,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/evaluations/self-assessment
pub async fn submit_self_assessment(
    State(state): State<AppState>,
    Json(request): Json<SubmitSelfAssessmentRequest>,
) -> ApiResult<impl IntoResponse> {
    let items = request
        .items
        .into_iter()
        .map(SelfAssessmentItemRequest::into_item)
        .collect::<Result<Vec<_>, ValidationError>>()?;
    let record = state
        .submit_self_assessment_handler()
        .handle(SubmitSelfAssessmentCommand {
            collaborator_id: request.collaborator_id,
            cycle_id: request.cycle_id,
            items,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/evaluations/pending
pub async fn pending_evaluations(
    State(state): State<AppState>,
    Query(params): Query<PendingParams>,
) -> ApiResult<impl IntoResponse> {
    let pending = state
        .pending_for_handler()
        .handle(PendingForQuery {
            evaluator_id: params.evaluator_id,
            cycle_id: params.cycle_id,
        })
        .await?;
    Ok(Json(pending))
}

/// POST /api/users/import
pub async fn import_users(
    State(state): State<AppState>,
    Json(request): Json<ImportUsersRequest>,
) -> impl IntoResponse {
    let outcome = state
        .import_users_handler()
        .handle(ImportUsersCommand { rows: request.rows });
    Json(outcome)
}
