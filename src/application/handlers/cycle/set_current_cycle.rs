//! SetCurrentCycleHandler - pins the cycle read operations default to.

use std::sync::Arc;

use crate::domain::foundation::{CycleId, DomainError};
use crate::ports::{CycleRepository, SystemSettings};

use super::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct SetCurrentCycleCommand {
    /// `None` clears the setting.
    pub cycle_id: Option<CycleId>,
}

pub struct SetCurrentCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    settings: Arc<dyn SystemSettings>,
}

impl SetCurrentCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, settings: Arc<dyn SystemSettings>) -> Self {
        Self { cycles, settings }
    }

    pub async fn handle(&self, cmd: SetCurrentCycleCommand) -> Result<(), DomainError> {
        match cmd.cycle_id {
            Some(id) => {
                let cycle = load_cycle(self.cycles.as_ref(), id).await?;
                self.settings.set_current_cycle_name(Some(cycle.name())).await?;
                tracing::info!(cycle_id = %id, cycle = cycle.name(), "Current cycle set");
            }
            None => {
                self.settings.set_current_cycle_name(None).await?;
                tracing::info!("Current cycle cleared");
            }
        }
        Ok(())
    }
}
