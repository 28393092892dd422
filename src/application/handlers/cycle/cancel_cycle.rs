//! CancelCycleHandler - Command handler for deleting a cycle and everything recorded in it.

use std::sync::Arc;

use crate::domain::foundation::{CycleId, DomainError};
use crate::ports::{CancelledCycle, CycleRepository};

#[derive(Debug, Clone)]
pub struct CancelCycleCommand {
    pub cycle_id: CycleId,
}

pub type CancelCycleResult = CancelledCycle;

pub struct CancelCycleHandler {
    cycles: Arc<dyn CycleRepository>,
}

impl CancelCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(&self, cmd: CancelCycleCommand) -> Result<CancelCycleResult, DomainError> {
        let cancelled = self.cycles.cancel(cmd.cycle_id).await?;

        tracing::info!(
            cycle_id = %cancelled.cycle_id,
            evaluations = cancelled.evaluations_removed,
            equalizations = cancelled.equalizations_removed,
            rubric_rows = cancelled.rubric_rows_removed,
            "Cycle cancelled"
        );
        Ok(cancelled)
    }
}
