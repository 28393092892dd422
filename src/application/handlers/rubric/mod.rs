//! Rubric command and query handlers.
//!
//! Draft edits are refused while a cycle is active; frozen cycle rows are
//! edited through `UpdateCycleRubricHandler` only.

mod get_active_criteria;
mod get_cycle_rubric;
mod remove_track_config;
mod update_cycle_rubric;
mod upsert_track_config;

pub use get_active_criteria::{GetActiveCriteriaHandler, GetActiveCriteriaQuery};
pub use get_cycle_rubric::{GetCycleRubricHandler, GetCycleRubricQuery};
pub use remove_track_config::{RemoveTrackConfigCommand, RemoveTrackConfigHandler};
pub use update_cycle_rubric::{UpdateCycleRubricCommand, UpdateCycleRubricHandler};
pub use upsert_track_config::{
    UpsertTrackConfigCommand, UpsertTrackConfigHandler, UpsertTrackConfigResult,
};

use crate::domain::foundation::{DomainError, ErrorCode, PillarId, TrackId};
use crate::domain::rubric::{Pillar, Track};
use crate::ports::RubricRepository;

async fn load_track(rubric: &dyn RubricRepository, id: TrackId) -> Result<Track, DomainError> {
    rubric
        .find_track(id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::TrackNotFound, format!("Track not found: {}", id)))
}

async fn load_pillar(rubric: &dyn RubricRepository, id: PillarId) -> Result<Pillar, DomainError> {
    rubric
        .find_pillar(id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::PillarNotFound, format!("Pillar not found: {}", id)))
}
