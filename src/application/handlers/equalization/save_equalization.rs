//! SaveEqualizationHandler - records the committee score for the first time.

use std::sync::Arc;

use crate::domain::equalization::{Equalization, EqualizationInput};
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::ports::{Clock, CycleRepository, EqualizationRepository, EvaluationRepository, UserDirectory};

use super::super::cycle::guard::load_cycle;
use super::super::evaluation::load_user;
use super::{anchor_missing, find_anchor};

#[derive(Debug, Clone)]
pub struct SaveEqualizationCommand {
    pub cycle_id: CycleId,
    pub collaborator_id: UserId,
    pub score: f64,
    pub justification: String,
}

pub struct SaveEqualizationHandler {
    equalizations: Arc<dyn EqualizationRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    cycles: Arc<dyn CycleRepository>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl SaveEqualizationHandler {
    pub fn new(
        equalizations: Arc<dyn EqualizationRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        cycles: Arc<dyn CycleRepository>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            equalizations,
            evaluations,
            cycles,
            directory,
            clock,
        }
    }

    pub async fn handle(&self, cmd: SaveEqualizationCommand) -> Result<Equalization, DomainError> {
        let input = EqualizationInput::new(cmd.score, &cmd.justification)?;
        let now = self.clock.now();

        let cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        if let Err(err) = cycle.ensure_open_for_committee(now) {
            tracing::warn!(cycle_id = %cycle.id(), error = %err, "Equalization rejected");
            return Err(err);
        }
        load_user(self.directory.as_ref(), cmd.collaborator_id).await?;

        let anchor = find_anchor(self.evaluations.as_ref(), cmd.collaborator_id, cycle.id())
            .await?
            .ok_or_else(|| anchor_missing(cmd.collaborator_id, cycle.id()))?;

        let equalization = self.equalizations.insert(&anchor.header, input, now).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            collaborator_id = %cmd.collaborator_id,
            score = equalization.score.value(),
            "Equalization saved"
        );
        Ok(equalization)
    }
}
