//! RemoveTrackConfigHandler - Command handler for deleting one draft rubric row.

use std::sync::Arc;

use crate::domain::foundation::{CriterionId, DomainError, ErrorCode, TrackId};
use crate::ports::{Clock, CycleRepository, RubricRepository};

use super::super::cycle::guard::validate_not_active;

#[derive(Debug, Clone)]
pub struct RemoveTrackConfigCommand {
    pub track_id: TrackId,
    pub criterion_id: CriterionId,
}

pub struct RemoveTrackConfigHandler {
    rubric: Arc<dyn RubricRepository>,
    cycles: Arc<dyn CycleRepository>,
    clock: Arc<dyn Clock>,
}

impl RemoveTrackConfigHandler {
    pub fn new(
        rubric: Arc<dyn RubricRepository>,
        cycles: Arc<dyn CycleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { rubric, cycles, clock }
    }

    pub async fn handle(&self, cmd: RemoveTrackConfigCommand) -> Result<(), DomainError> {
        validate_not_active(self.cycles.as_ref(), self.clock.now()).await?;

        if !self.rubric.delete_draft(cmd.track_id, cmd.criterion_id).await? {
            return Err(DomainError::new(
                ErrorCode::RubricEntryNotFound,
                format!(
                    "No draft row for track {} and criterion {}",
                    cmd.track_id, cmd.criterion_id
                ),
            ));
        }

        tracing::info!(track_id = %cmd.track_id, criterion_id = %cmd.criterion_id, "Draft rubric row removed");
        Ok(())
    }
}
