//! EditEqualizationHandler - revises an existing committee score.
//!
//! Every edit appends a history entry with the previous and new score.

use std::sync::Arc;

use crate::domain::equalization::{Equalization, EqualizationInput};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};
use crate::ports::{Clock, CycleRepository, EqualizationRepository, EvaluationRepository};

use super::super::cycle::guard::load_cycle;
use super::find_anchor;

#[derive(Debug, Clone)]
pub struct EditEqualizationCommand {
    pub cycle_id: CycleId,
    pub collaborator_id: UserId,
    pub score: f64,
    pub justification: String,
    /// Blank or `None` records the default reason.
    pub change_reason: Option<String>,
    /// Committee member making the change, when known.
    pub changed_by: Option<UserId>,
}

pub struct EditEqualizationHandler {
    equalizations: Arc<dyn EqualizationRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl EditEqualizationHandler {
    pub fn new(
        equalizations: Arc<dyn EqualizationRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        cycles: Arc<dyn CycleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            equalizations,
            evaluations,
            cycles,
            clock,
        }
    }

    pub async fn handle(&self, cmd: EditEqualizationCommand) -> Result<Equalization, DomainError> {
        let input = EqualizationInput::new(cmd.score, &cmd.justification)?;
        let now = self.clock.now();

        let cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        if let Err(err) = cycle.ensure_open_for_committee(now) {
            tracing::warn!(cycle_id = %cycle.id(), error = %err, "Equalization edit rejected");
            return Err(err);
        }

        let not_saved = || {
            DomainError::new(
                ErrorCode::EqualizationNotFound,
                format!(
                    "No equalization saved for collaborator {} in cycle {}",
                    cmd.collaborator_id,
                    cycle.id()
                ),
            )
            .with_detail("collaborator_id", cmd.collaborator_id.to_string())
        };

        let anchor = find_anchor(self.evaluations.as_ref(), cmd.collaborator_id, cycle.id())
            .await?
            .ok_or_else(not_saved)?;
        let mut equalization = self
            .equalizations
            .find_by_evaluation(anchor.header.id)
            .await?
            .ok_or_else(not_saved)?;

        let amendment = equalization.edit(input, cmd.change_reason.as_deref(), cmd.changed_by, now)?;
        if let Err(err) = self.equalizations.amend(&equalization, &amendment).await {
            tracing::warn!(equalization_id = %equalization.id, error = %err, "Equalization edit not stored");
            return Err(err);
        }

        tracing::info!(
            cycle_id = %cycle.id(),
            collaborator_id = %cmd.collaborator_id,
            revision = equalization.revision,
            previous_score = amendment.previous_score.value(),
            new_score = amendment.new_score.value(),
            "Equalization edited"
        );
        Ok(equalization)
    }
}
