//! Equalization handlers - the committee's final score per collaborator.

mod edit_equalization;
mod get_equalization;
mod get_equalization_history;
mod save_equalization;

pub use edit_equalization::{EditEqualizationCommand, EditEqualizationHandler};
pub use get_equalization::{GetEqualizationHandler, GetEqualizationQuery};
pub use get_equalization_history::{GetEqualizationHistoryHandler, GetEqualizationHistoryQuery};
pub use save_equalization::{SaveEqualizationCommand, SaveEqualizationHandler};

use crate::domain::evaluation::{EvaluationKey, EvaluationRecord};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};
use crate::ports::EvaluationRepository;

/// The collaborator's self-assessment header, which anchors the equalization.
async fn find_anchor(
    evaluations: &dyn EvaluationRepository,
    collaborator: UserId,
    cycle_id: CycleId,
) -> Result<Option<EvaluationRecord>, DomainError> {
    evaluations
        .find_by_key(&EvaluationKey::self_assessment(collaborator, cycle_id))
        .await
}

fn anchor_missing(collaborator: UserId, cycle_id: CycleId) -> DomainError {
    DomainError::new(
        ErrorCode::EvaluationNotFound,
        format!(
            "Collaborator {} has no self-assessment in cycle {}",
            collaborator, cycle_id
        ),
    )
    .with_detail("collaborator_id", collaborator.to_string())
    .with_detail("cycle_id", cycle_id.to_string())
}
