//! SubmitSelfAssessmentHandler - a collaborator scoring themself per criterion.

use crate::domain::evaluation::{EvaluationPayload, EvaluationRecord, SelfAssessmentItem, SourceKind};
use crate::domain::foundation::{CycleId, DomainError, UserId};

use super::{SubmitEvaluationCommand, SubmitEvaluationHandler};

#[derive(Debug, Clone)]
pub struct SubmitSelfAssessmentCommand {
    pub collaborator_id: UserId,
    /// `None` targets the active cycle.
    pub cycle_id: Option<CycleId>,
    pub items: Vec<SelfAssessmentItem>,
}

/// Thin wrapper that fixes evaluator = evaluatee and the self-assessment kind.
pub struct SubmitSelfAssessmentHandler {
    inner: SubmitEvaluationHandler,
}

impl SubmitSelfAssessmentHandler {
    pub fn new(inner: SubmitEvaluationHandler) -> Self {
        Self { inner }
    }

    pub async fn handle(&self, cmd: SubmitSelfAssessmentCommand) -> Result<EvaluationRecord, DomainError> {
        self.inner
            .handle(SubmitEvaluationCommand {
                evaluator_id: cmd.collaborator_id,
                evaluatee_id: cmd.collaborator_id,
                cycle_id: cmd.cycle_id,
                kind: SourceKind::SelfAssessment,
                payload: EvaluationPayload::SelfAssessment(cmd.items),
            })
            .await
    }
}
