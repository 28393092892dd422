use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::cycle::{CycleConfig, NewCycle};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp};
use crate::domain::rubric::{snapshot_rows, TrackCriterionWeight};
use crate::ports::{CancelledCycle, CycleRepository};

fn duplicate_name(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateCycleName,
        format!("A cycle named '{}' already exists", name),
    )
    .with_detail("name", name)
}

fn not_found(id: CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
        .with_detail("cycle_id", id.to_string())
}

#[async_trait]
impl CycleRepository for InMemoryStore {
    async fn create_with_snapshot(&self, new: NewCycle, now: Timestamp) -> Result<CycleConfig, DomainError> {
        let mut state = self.state.write().await;
        if state.cycles.values().any(|c| c.name() == new.name) {
            return Err(duplicate_name(&new.name));
        }

        let id = CycleId::from_raw(state.next_id());
        let cycle = CycleConfig::create(id, new, now);
        let draft: Vec<TrackCriterionWeight> = state.draft.values().cloned().collect();
        for row in snapshot_rows(id, &draft) {
            state.snapshot.insert(row.key(), row);
        }
        state.cycles.insert(id, cycle.clone());
        Ok(cycle)
    }

    async fn update(&self, cycle: &CycleConfig) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.cycles.contains_key(&cycle.id()) {
            return Err(not_found(cycle.id()));
        }
        if state
            .cycles
            .values()
            .any(|c| c.id() != cycle.id() && c.name() == cycle.name())
        {
            return Err(duplicate_name(cycle.name()));
        }
        state.cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CycleId) -> Result<Option<CycleConfig>, DomainError> {
        Ok(self.state.read().await.cycles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CycleConfig>, DomainError> {
        let state = self.state.read().await;
        Ok(state.cycles.values().find(|c| c.name() == name).cloned())
    }

    async fn list(&self) -> Result<Vec<CycleConfig>, DomainError> {
        let state = self.state.read().await;
        let mut cycles: Vec<CycleConfig> = state.cycles.values().cloned().collect();
        cycles.sort_by(|a, b| {
            b.start_date()
                .cmp(&a.start_date())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(cycles)
    }

    async fn cancel(&self, id: CycleId) -> Result<CancelledCycle, DomainError> {
        let mut state = self.state.write().await;
        if !state.cycles.contains_key(&id) {
            return Err(not_found(id));
        }

        let equalizations_before = state.equalizations.len();
        state.equalizations.retain(|_, e| e.cycle_id != id);
        let tables = &mut *state;
        tables
            .amendments
            .retain(|a| tables.equalizations.contains_key(&a.equalization_id));
        let evaluations_before = state.evaluations.len();
        state.evaluations.retain(|_, r| r.header.cycle_id() != id);
        let rows_before = state.snapshot.len();
        state.snapshot.retain(|_, row| row.cycle_id != id);
        state.cycles.remove(&id);

        Ok(CancelledCycle {
            cycle_id: id,
            evaluations_removed: (evaluations_before - state.evaluations.len()) as u64,
            equalizations_removed: (equalizations_before - state.equalizations.len()) as u64,
            rubric_rows_removed: (rows_before - state.snapshot.len()) as u64,
        })
    }
}
