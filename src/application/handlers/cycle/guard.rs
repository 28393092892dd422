//! Active-cycle lookups shared by several handlers.

use crate::domain::cycle::CycleConfig;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp};
use crate::ports::CycleRepository;

/// The active cycle with the latest start date, if any.
pub async fn find_active(
    cycles: &dyn CycleRepository,
    now: Timestamp,
) -> Result<Option<CycleConfig>, DomainError> {
    // `list` is ordered newest start first.
    Ok(cycles.list().await?.into_iter().find(|c| c.is_active(now)))
}

/// Fails with `CycleActive` naming the active cycle, if there is one.
pub async fn validate_not_active(cycles: &dyn CycleRepository, now: Timestamp) -> Result<(), DomainError> {
    match find_active(cycles, now).await? {
        Some(active) => {
            tracing::warn!(cycle_id = %active.id(), "Rubric change rejected while a cycle is active");
            Err(DomainError::new(
                ErrorCode::CycleActive,
                format!("Cycle '{}' is active; the rubric cannot change", active.name()),
            )
            .with_detail("cycle_id", active.id().to_string()))
        }
        None => Ok(()),
    }
}

/// Loads a cycle or fails with `CycleNotFound`.
pub async fn load_cycle(cycles: &dyn CycleRepository, id: CycleId) -> Result<CycleConfig, DomainError> {
    cycles.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
            .with_detail("cycle_id", id.to_string())
    })
}

/// The given cycle, or the active one when `id` is `None`.
///
/// Fails with `CycleNotActive` when no id is given and nothing is active.
pub async fn explicit_or_active(
    cycles: &dyn CycleRepository,
    id: Option<CycleId>,
    now: Timestamp,
) -> Result<CycleConfig, DomainError> {
    match id {
        Some(id) => load_cycle(cycles, id).await,
        None => find_active(cycles, now)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::CycleNotActive, "No cycle is active")),
    }
}
