use async_trait::async_trait;

use super::{InMemoryStore, State};
use crate::domain::foundation::{CriterionId, CycleId, DomainError, PillarId, TrackId, Weight};
use crate::domain::rubric::{
    Criterion, CycleRubricRow, Pillar, RubricLine, Track, TrackCriterionWeight,
};
use crate::ports::RubricRepository;

impl State {
    /// Joins a rubric row with taxonomy names; rows with dangling references are skipped.
    fn line(&self, track_id: TrackId, criterion_id: CriterionId, weight: Weight, is_active: bool) -> Option<RubricLine> {
        let track = self.tracks.get(&track_id)?;
        let criterion = self.criteria.get(&criterion_id)?;
        let pillar = self.pillars.get(&criterion.pillar_id)?;
        Some(RubricLine {
            track: track.clone(),
            pillar: pillar.clone(),
            criterion_id,
            criterion_name: criterion.name.clone(),
            weight,
            is_active,
        })
    }
}

#[async_trait]
impl RubricRepository for InMemoryStore {
    async fn find_track(&self, id: TrackId) -> Result<Option<Track>, DomainError> {
        Ok(self.state.read().await.tracks.get(&id).cloned())
    }

    async fn find_pillar(&self, id: PillarId) -> Result<Option<Pillar>, DomainError> {
        Ok(self.state.read().await.pillars.get(&id).cloned())
    }

    async fn find_criterion(&self, id: CriterionId) -> Result<Option<Criterion>, DomainError> {
        Ok(self.state.read().await.criteria.get(&id).cloned())
    }

    async fn criteria_of_pillar(&self, id: PillarId) -> Result<Vec<Criterion>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .criteria
            .values()
            .filter(|c| c.belongs_to(id))
            .cloned()
            .collect())
    }

    async fn upsert_draft(&self, rows: &[TrackCriterionWeight]) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        for row in rows {
            state.draft.insert(row.key(), row.clone());
        }
        Ok(())
    }

    async fn delete_draft(&self, track_id: TrackId, criterion_id: CriterionId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.draft.remove(&(track_id, criterion_id)).is_some())
    }

    async fn list_draft(&self, track_id: Option<TrackId>) -> Result<Vec<TrackCriterionWeight>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .draft
            .values()
            .filter(|row| track_id.map_or(true, |t| row.track_id == t))
            .cloned()
            .collect())
    }

    async fn draft_lines(&self, track_id: Option<TrackId>) -> Result<Vec<RubricLine>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .draft
            .values()
            .filter(|row| track_id.map_or(true, |t| row.track_id == t))
            .filter_map(|row| state.line(row.track_id, row.criterion_id, row.weight, row.is_active))
            .collect())
    }

    async fn snapshot_lines(&self, cycle_id: CycleId) -> Result<Vec<RubricLine>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .snapshot
            .values()
            .filter(|row| row.cycle_id == cycle_id)
            .filter_map(|row| state.line(row.track_id, row.criterion_id, row.weight, row.is_active))
            .collect())
    }

    async fn snapshot_rows(&self, cycle_id: CycleId) -> Result<Vec<CycleRubricRow>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .snapshot
            .values()
            .filter(|row| row.cycle_id == cycle_id)
            .cloned()
            .collect())
    }

    async fn update_snapshot_row(&self, row: &CycleRubricRow) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.snapshot.get_mut(&row.key()) {
            Some(stored) => {
                stored.weight = row.weight;
                stored.is_active = row.is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
