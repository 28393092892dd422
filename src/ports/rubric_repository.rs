//! Rubric repository port.
//!
//! Covers the read-only taxonomy, the mutable draft rubric, and the frozen
//! per-cycle rows. Creating the frozen rows happens inside
//! [`CycleRepository::create_with_snapshot`](super::CycleRepository).

use async_trait::async_trait;

use crate::domain::foundation::{CriterionId, CycleId, DomainError, PillarId, TrackId};
use crate::domain::rubric::{
    Criterion, CycleRubricRow, Pillar, RubricLine, Track, TrackCriterionWeight,
};

#[async_trait]
pub trait RubricRepository: Send + Sync {
    async fn find_track(&self, id: TrackId) -> Result<Option<Track>, DomainError>;

    async fn find_pillar(&self, id: PillarId) -> Result<Option<Pillar>, DomainError>;

    async fn find_criterion(&self, id: CriterionId) -> Result<Option<Criterion>, DomainError>;

    /// Criteria whose pillar is `id`.
    async fn criteria_of_pillar(&self, id: PillarId) -> Result<Vec<Criterion>, DomainError>;

    /// Inserts or replaces draft rows keyed by (track, criterion).
    async fn upsert_draft(&self, rows: &[TrackCriterionWeight]) -> Result<(), DomainError>;

    /// Deletes one draft row. Returns `false` when it did not exist.
    async fn delete_draft(&self, track_id: TrackId, criterion_id: CriterionId) -> Result<bool, DomainError>;

    /// Draft rows of a track, or of every track when `None`.
    async fn list_draft(&self, track_id: Option<TrackId>) -> Result<Vec<TrackCriterionWeight>, DomainError>;

    /// Draft rows joined with names.
    async fn draft_lines(&self, track_id: Option<TrackId>) -> Result<Vec<RubricLine>, DomainError>;

    /// Frozen rows of a cycle joined with names.
    async fn snapshot_lines(&self, cycle_id: CycleId) -> Result<Vec<RubricLine>, DomainError>;

    /// Frozen rows of a cycle.
    async fn snapshot_rows(&self, cycle_id: CycleId) -> Result<Vec<CycleRubricRow>, DomainError>;

    /// Updates weight and activation of one frozen row. Returns `false` when it did not exist.
    async fn update_snapshot_row(&self, row: &CycleRubricRow) -> Result<bool, DomainError>;
}
