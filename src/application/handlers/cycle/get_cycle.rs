//! GetCycleHandler - Query handler for a single cycle with its frozen rubric.

use std::sync::Arc;

use crate::domain::cycle::CycleView;
use crate::domain::foundation::{CycleId, DomainError};
use crate::domain::rubric::RubricView;
use crate::ports::{Clock, CycleRepository, RubricRepository};

use super::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct GetCycleQuery {
    pub cycle_id: CycleId,
}

pub struct GetCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    rubric: Arc<dyn RubricRepository>,
    clock: Arc<dyn Clock>,
}

impl GetCycleHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        rubric: Arc<dyn RubricRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { cycles, rubric, clock }
    }

    pub async fn handle(&self, query: GetCycleQuery) -> Result<CycleView, DomainError> {
        let cycle = load_cycle(self.cycles.as_ref(), query.cycle_id).await?;
        let rubric = RubricView::from_lines(self.rubric.snapshot_lines(cycle.id()).await?);

        tracing::debug!(cycle_id = %cycle.id(), "Cycle loaded");
        Ok(CycleView::of(&cycle, self.clock.now()).with_rubric(rubric))
    }
}
