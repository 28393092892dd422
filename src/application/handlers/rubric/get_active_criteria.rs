//! GetActiveCriteriaHandler - the active draft rubric of one track.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TrackId};
use crate::domain::rubric::{RubricView, TrackRubric};
use crate::ports::RubricRepository;

use super::load_track;

#[derive(Debug, Clone)]
pub struct GetActiveCriteriaQuery {
    pub track_id: TrackId,
}

pub struct GetActiveCriteriaHandler {
    rubric: Arc<dyn RubricRepository>,
}

impl GetActiveCriteriaHandler {
    pub fn new(rubric: Arc<dyn RubricRepository>) -> Self {
        Self { rubric }
    }

    /// Pillars and criteria sorted by name; inactive rows are left out.
    pub async fn handle(&self, query: GetActiveCriteriaQuery) -> Result<TrackRubric, DomainError> {
        let track = load_track(self.rubric.as_ref(), query.track_id).await?;
        let view = RubricView::from_lines(self.rubric.draft_lines(Some(track.id)).await?).active_only();

        Ok(view.track(track.id).cloned().unwrap_or(TrackRubric {
            track_id: track.id,
            name: track.name,
            pillars: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, Weight};
    use crate::domain::rubric::TrackCriterionWeight;

    #[tokio::test]
    async fn lists_only_active_criteria_sorted_by_name() {
        let store = InMemoryStore::new();
        let track = store.add_track("Backend").await;
        let delivery = store.add_pillar("Delivery").await;
        let culture = store.add_pillar("Culture").await;
        let quality = store.add_criterion(delivery.id, "Quality").await;
        let ownership = store.add_criterion(delivery.id, "Ownership").await;
        let feedback = store.add_criterion(culture.id, "Feedback").await;
        let w = |v: f64| Weight::try_new(v).unwrap();
        store
            .upsert_draft(&[
                TrackCriterionWeight::new(track.id, quality.id, w(30.0), true),
                TrackCriterionWeight::new(track.id, ownership.id, w(20.0), true),
                TrackCriterionWeight::new(track.id, feedback.id, w(10.0), false),
            ])
            .await
            .unwrap();

        let rubric = GetActiveCriteriaHandler::new(Arc::new(store))
            .handle(GetActiveCriteriaQuery { track_id: track.id })
            .await
            .unwrap();

        assert_eq!(rubric.pillars.len(), 1);
        let names: Vec<&str> = rubric.criteria().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ownership", "Quality"]);
    }

    #[tokio::test]
    async fn track_without_rows_yields_empty_rubric() {
        let store = InMemoryStore::new();
        let track = store.add_track("Data").await;

        let rubric = GetActiveCriteriaHandler::new(Arc::new(store))
            .handle(GetActiveCriteriaQuery { track_id: track.id })
            .await
            .unwrap();

        assert_eq!(rubric.name, "Data");
        assert!(rubric.pillars.is_empty());
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        let err = GetActiveCriteriaHandler::new(Arc::new(InMemoryStore::new()))
            .handle(GetActiveCriteriaQuery { track_id: TrackId::from_raw(9) })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TrackNotFound);
    }
}
