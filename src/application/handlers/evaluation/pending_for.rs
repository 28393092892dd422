//! PendingForHandler - evaluations an evaluator still has to fill in.

use std::sync::Arc;

use crate::domain::evaluation::EvaluationRecord;
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::ports::{Clock, CycleRepository, EvaluationRepository};

use super::super::cycle::guard::{find_active, load_cycle};

#[derive(Debug, Clone)]
pub struct PendingForQuery {
    pub evaluator_id: UserId,
    /// `None` uses the active cycle; with no active cycle the result is empty.
    pub cycle_id: Option<CycleId>,
}

pub struct PendingForHandler {
    evaluations: Arc<dyn EvaluationRepository>,
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl PendingForHandler {
    pub fn new(
        evaluations: Arc<dyn EvaluationRepository>,
        cycles: Arc<dyn CycleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            evaluations,
            cycles,
            clock,
        }
    }

    pub async fn handle(&self, query: PendingForQuery) -> Result<Vec<EvaluationRecord>, DomainError> {
        let cycle = match query.cycle_id {
            Some(id) => load_cycle(self.cycles.as_ref(), id).await?,
            None => match find_active(self.cycles.as_ref(), self.clock.now()).await? {
                Some(cycle) => cycle,
                None => return Ok(Vec::new()),
            },
        };

        let pending: Vec<EvaluationRecord> = self
            .evaluations
            .list_for_evaluator(query.evaluator_id, cycle.id())
            .await?
            .into_iter()
            .filter(|r| !r.is_completed())
            .collect();

        tracing::debug!(
            evaluator_id = %query.evaluator_id,
            cycle_id = %cycle.id(),
            pending = pending.len(),
            "Pending evaluations listed"
        );
        Ok(pending)
    }
}
