//! UpdateCycleHandler - Command handler for editing a cycle's name, description or window.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::{CycleChanges, CycleView};
use crate::domain::foundation::{CycleId, DomainError, OrgCalendar};
use crate::ports::{Clock, CycleRepository};

use super::guard::load_cycle;

/// `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct UpdateCycleCommand {
    pub cycle_id: CycleId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpdateCycleCommand {
    /// A command that changes nothing yet.
    pub fn new(cycle_id: CycleId) -> Self {
        Self {
            cycle_id,
            name: None,
            description: None,
            start_date: None,
            end_date: None,
        }
    }
}

pub struct UpdateCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
    calendar: OrgCalendar,
}

impl UpdateCycleHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, clock: Arc<dyn Clock>, calendar: OrgCalendar) -> Self {
        Self {
            cycles,
            clock,
            calendar,
        }
    }

    pub async fn handle(&self, cmd: UpdateCycleCommand) -> Result<CycleView, DomainError> {
        let mut cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        let now = self.clock.now();

        let changes = CycleChanges {
            name: cmd.name,
            description: cmd.description,
            start: cmd.start_date.map(|d| self.calendar.start_of_day(d)),
            end: cmd.end_date.map(|d| self.calendar.end_of_day(d)),
        };
        cycle.apply_changes(changes, now)?;
        self.cycles.update(&cycle).await?;

        tracing::info!(cycle_id = %cycle.id(), name = %cycle.name(), "Cycle updated");
        Ok(CycleView::of(&cycle, now))
    }
}
