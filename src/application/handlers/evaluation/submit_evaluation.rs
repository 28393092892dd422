//! SubmitEvaluationHandler - attaches a payload to the header of one evaluation.
//!
//! The header is found or created for (evaluator, evaluatee, cycle, kind).
//! Submissions are accepted only while the cycle is active.

use std::sync::Arc;

use crate::domain::evaluation::{EvaluationKey, EvaluationPayload, EvaluationRecord, SourceKind};
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::ports::{Clock, CycleRepository, EvaluationRepository, RubricRepository, UserDirectory};

use super::super::cycle::guard::explicit_or_active;
use super::{load_user, verify_criteria};

#[derive(Debug, Clone)]
pub struct SubmitEvaluationCommand {
    pub evaluator_id: UserId,
    pub evaluatee_id: UserId,
    /// `None` targets the active cycle.
    pub cycle_id: Option<CycleId>,
    /// Kind of the header; a payload of another kind is a conflict.
    pub kind: SourceKind,
    pub payload: EvaluationPayload,
}

pub struct SubmitEvaluationHandler {
    evaluations: Arc<dyn EvaluationRepository>,
    cycles: Arc<dyn CycleRepository>,
    rubric: Arc<dyn RubricRepository>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl SubmitEvaluationHandler {
    pub fn new(
        evaluations: Arc<dyn EvaluationRepository>,
        cycles: Arc<dyn CycleRepository>,
        rubric: Arc<dyn RubricRepository>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            evaluations,
            cycles,
            rubric,
            directory,
            clock,
        }
    }

    pub async fn handle(&self, cmd: SubmitEvaluationCommand) -> Result<EvaluationRecord, DomainError> {
        if cmd.payload.is_empty() {
            return Err(DomainError::validation("items", "At least one criterion must be scored"));
        }

        let now = self.clock.now();
        let cycle = explicit_or_active(self.cycles.as_ref(), cmd.cycle_id, now).await?;
        if let Err(err) = cycle.ensure_active(now) {
            tracing::warn!(cycle_id = %cycle.id(), kind = %cmd.kind, "Submission outside the cycle window");
            return Err(err);
        }

        let key = EvaluationKey::new(cmd.evaluator_id, cmd.evaluatee_id, cycle.id(), cmd.kind)?;
        load_user(self.directory.as_ref(), cmd.evaluator_id).await?;
        load_user(self.directory.as_ref(), cmd.evaluatee_id).await?;
        verify_criteria(self.rubric.as_ref(), &cmd.payload).await?;

        let record = self.evaluations.submit(key, cmd.payload, now).await?;

        tracing::info!(
            evaluation_id = %record.header.id,
            cycle_id = %cycle.id(),
            kind = %record.header.kind(),
            status = %record.header.status,
            "Evaluation submitted"
        );
        Ok(record)
    }
}
