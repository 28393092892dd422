//! FinalizeCycleHandler - Command handler for marking a cycle done.

use std::sync::Arc;

use crate::domain::cycle::CycleView;
use crate::domain::foundation::{CycleId, DomainError};
use crate::ports::{Clock, CycleRepository};

use super::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct FinalizeCycleCommand {
    pub cycle_id: CycleId,
}

pub struct FinalizeCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl FinalizeCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cycles, clock }
    }

    pub async fn handle(&self, cmd: FinalizeCycleCommand) -> Result<CycleView, DomainError> {
        let mut cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        let now = self.clock.now();

        if let Err(err) = cycle.finalize(now) {
            tracing::warn!(cycle_id = %cycle.id(), error = %err, "Cycle finalization rejected");
            return Err(err);
        }
        self.cycles.update(&cycle).await?;

        tracing::info!(cycle_id = %cycle.id(), "Cycle finalized");
        Ok(CycleView::of(&cycle, now))
    }
}
