//! Evaluation command and query handlers.

mod pending_for;
mod submit_evaluation;
mod submit_self_assessment;

pub use pending_for::{PendingForHandler, PendingForQuery};
pub use submit_evaluation::{SubmitEvaluationCommand, SubmitEvaluationHandler};
pub use submit_self_assessment::{SubmitSelfAssessmentCommand, SubmitSelfAssessmentHandler};

use crate::domain::evaluation::EvaluationPayload;
use crate::domain::foundation::{CriterionId, DomainError, ErrorCode, UserId};
use crate::domain::people::UserProfile;
use crate::ports::{RubricRepository, UserDirectory};

pub(crate) async fn load_user(directory: &dyn UserDirectory, id: UserId) -> Result<UserProfile, DomainError> {
    directory.find(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
            .with_detail("user_id", id.to_string())
    })
}

/// Every criterion a per-criterion payload names must exist; self-assessment
/// entries must also name the criterion's own pillar.
async fn verify_criteria(rubric: &dyn RubricRepository, payload: &EvaluationPayload) -> Result<(), DomainError> {
    let entries: Vec<(CriterionId, Option<_>)> = match payload {
        EvaluationPayload::SelfAssessment(items) => items
            .iter()
            .map(|i| (i.criterion_id, Some(i.pillar_id)))
            .collect(),
        EvaluationPayload::Manager(items) => items.iter().map(|i| (i.criterion_id, None)).collect(),
        _ => return Ok(()),
    };

    for (criterion_id, pillar_id) in entries {
        let criterion = rubric.find_criterion(criterion_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::CriterionNotFound,
                format!("Criterion not found: {}", criterion_id),
            )
        })?;
        if let Some(pillar_id) = pillar_id {
            if !criterion.belongs_to(pillar_id) {
                return Err(DomainError::validation(
                    "pillar_id",
                    format!("Criterion {} does not belong to pillar {}", criterion_id, pillar_id),
                ));
            }
        }
    }
    Ok(())
}
