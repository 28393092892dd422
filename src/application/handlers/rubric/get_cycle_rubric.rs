//! GetCycleRubricHandler - the rubric frozen into a cycle.

use std::sync::Arc;

use crate::domain::foundation::{CycleId, DomainError};
use crate::domain::rubric::RubricView;
use crate::ports::{CycleRepository, RubricRepository};

use super::super::cycle::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct GetCycleRubricQuery {
    pub cycle_id: CycleId,
}

pub struct GetCycleRubricHandler {
    rubric: Arc<dyn RubricRepository>,
    cycles: Arc<dyn CycleRepository>,
}

impl GetCycleRubricHandler {
    pub fn new(rubric: Arc<dyn RubricRepository>, cycles: Arc<dyn CycleRepository>) -> Self {
        Self { rubric, cycles }
    }

    /// An empty view when the cycle was created from an empty draft.
    pub async fn handle(&self, query: GetCycleRubricQuery) -> Result<RubricView, DomainError> {
        let cycle = load_cycle(self.cycles.as_ref(), query.cycle_id).await?;
        Ok(RubricView::from_lines(self.rubric.snapshot_lines(cycle.id()).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::foundation::{ErrorCode, Timestamp, Weight};
    use crate::domain::rubric::TrackCriterionWeight;

    #[tokio::test]
    async fn snapshot_is_unaffected_by_later_draft_edits() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let pillar = store.add_pillar("Delivery").await;
        let criterion = store.add_criterion(pillar.id, "Ownership").await;
        store
            .upsert_draft(&[TrackCriterionWeight::new(
                track.id,
                criterion.id,
                Weight::try_new(20.0).unwrap(),
                true,
            )])
            .await
            .unwrap();
        let now = Timestamp::now();
        let window = CycleWindow::new(now, now.plus_days(30)).unwrap();
        let cycle = store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();

        store.delete_draft(track.id, criterion.id).await.unwrap();

        let rubric = GetCycleRubricHandler::new(Arc::new(store.clone()), Arc::new(store))
            .handle(GetCycleRubricQuery { cycle_id: cycle.id() })
            .await
            .unwrap();
        let track_rubric = rubric.track(track.id).unwrap();
        let weights: Vec<f64> = track_rubric.criteria().map(|c| c.weight.value()).collect();
        assert_eq!(weights, vec![20.0]);
    }

    #[tokio::test]
    async fn unknown_cycle_is_not_found() {
        let store = InMemoryStore::new();
        let err = GetCycleRubricHandler::new(Arc::new(store.clone()), Arc::new(store))
            .handle(GetCycleRubricQuery { cycle_id: CycleId::from_raw(5) })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }
}
