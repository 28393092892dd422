//! UpdateCycleRubricHandler - edits one frozen row of a cycle's rubric.

use std::sync::Arc;

use crate::domain::foundation::{CriterionId, CycleId, DomainError, ErrorCode, TrackId, Weight};
use crate::domain::rubric::CycleRubricRow;
use crate::ports::{CycleRepository, RubricRepository};

use super::super::cycle::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct UpdateCycleRubricCommand {
    pub cycle_id: CycleId,
    pub track_id: TrackId,
    pub criterion_id: CriterionId,
    pub weight: f64,
    pub is_active: bool,
}

pub struct UpdateCycleRubricHandler {
    rubric: Arc<dyn RubricRepository>,
    cycles: Arc<dyn CycleRepository>,
}

impl UpdateCycleRubricHandler {
    pub fn new(rubric: Arc<dyn RubricRepository>, cycles: Arc<dyn CycleRepository>) -> Self {
        Self { rubric, cycles }
    }

    pub async fn handle(&self, cmd: UpdateCycleRubricCommand) -> Result<CycleRubricRow, DomainError> {
        let cycle = load_cycle(self.cycles.as_ref(), cmd.cycle_id).await?;
        cycle.ensure_not_done()?;

        let row = CycleRubricRow {
            cycle_id: cycle.id(),
            track_id: cmd.track_id,
            criterion_id: cmd.criterion_id,
            weight: Weight::try_new(cmd.weight)?,
            is_active: cmd.is_active,
        };
        if !self.rubric.update_snapshot_row(&row).await? {
            return Err(DomainError::new(
                ErrorCode::RubricEntryNotFound,
                format!(
                    "Cycle {} has no rubric row for track {} and criterion {}",
                    cmd.cycle_id, cmd.track_id, cmd.criterion_id
                ),
            ));
        }

        tracing::info!(
            cycle_id = %row.cycle_id,
            track_id = %row.track_id,
            criterion_id = %row.criterion_id,
            weight = row.weight.value(),
            "Cycle rubric row updated"
        );
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::foundation::Timestamp;
    use crate::domain::rubric::TrackCriterionWeight;

    async fn setup() -> (InMemoryStore, CycleId, TrackId, CriterionId) {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let criterion = store.add_criterion(pillar.id, "Ownership").await;
        store
            .upsert_draft(&[TrackCriterionWeight::new(track.id, criterion.id, Weight::try_new(20.0).unwrap(), true)])
            .await
            .unwrap();
        let now = Timestamp::now();
        let window = CycleWindow::new(now.minus_days(1), now.plus_days(30)).unwrap();
        let cycle = store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();
        (store, cycle.id(), track.id, criterion.id)
    }

    #[tokio::test]
    async fn edits_snapshot_without_touching_draft() {
        let (store, cycle_id, track_id, criterion_id) = setup().await;
        let handler = UpdateCycleRubricHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        handler
            .handle(UpdateCycleRubricCommand {
                cycle_id,
                track_id,
                criterion_id,
                weight: 45.0,
                is_active: true,
            })
            .await
            .unwrap();

        let frozen = store.snapshot_rows(cycle_id).await.unwrap();
        assert_eq!(frozen[0].weight.value(), 45.0);
        let draft = store.list_draft(Some(track_id)).await.unwrap();
        assert_eq!(draft[0].weight.value(), 20.0);
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let (store, cycle_id, track_id, _) = setup().await;
        let handler = UpdateCycleRubricHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(UpdateCycleRubricCommand {
                cycle_id,
                track_id,
                criterion_id: CriterionId::from_raw(999),
                weight: 10.0,
                is_active: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RubricEntryNotFound);
    }
}
