//! ListCyclesHandler and FindActiveCycleHandler - cycle read models.

use std::sync::Arc;

use crate::domain::cycle::CycleView;
use crate::domain::foundation::DomainError;
use crate::domain::rubric::RubricView;
use crate::ports::{Clock, CycleRepository, RubricRepository};

use super::guard::find_active;

/// Lists every cycle, newest start date first. Rubrics are not included.
pub struct ListCyclesHandler {
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl ListCyclesHandler {
    pub fn new(cycles: Arc<dyn CycleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cycles, clock }
    }

    pub async fn handle(&self) -> Result<Vec<CycleView>, DomainError> {
        let now = self.clock.now();
        let views: Vec<CycleView> = self
            .cycles
            .list()
            .await?
            .iter()
            .map(|c| CycleView::of(c, now))
            .collect();

        tracing::debug!(count = views.len(), "Cycles listed");
        Ok(views)
    }
}

/// Returns the active cycle with its rubric, or `None`.
pub struct FindActiveCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    rubric: Arc<dyn RubricRepository>,
    clock: Arc<dyn Clock>,
}

impl FindActiveCycleHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        rubric: Arc<dyn RubricRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { cycles, rubric, clock }
    }

    pub async fn handle(&self) -> Result<Option<CycleView>, DomainError> {
        let now = self.clock.now();
        let Some(cycle) = find_active(self.cycles.as_ref(), now).await? else {
            return Ok(None);
        };
        let rubric = RubricView::from_lines(self.rubric.snapshot_lines(cycle.id()).await?);
        Ok(Some(CycleView::of(&cycle, now).with_rubric(rubric)))
    }
}
