//! In-memory adapters.
//!
//! A single [`InMemoryStore`] implements every persistence port over one
//! shared state guarded by a `tokio::sync::RwLock`. Each mutating call holds
//! the write guard for its whole duration, which gives the same all-or-nothing
//! behavior the Postgres adapter gets from transactions.
//!
//! Useful for testing and local development.

mod cycles;
mod directory;
mod equalizations;
mod evaluations;
mod rubric;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::cycle::CycleConfig;
use crate::domain::equalization::{Equalization, EqualizationAmendment};
use crate::domain::evaluation::EvaluationRecord;
use crate::domain::foundation::{
    CriterionId, CycleId, EqualizationId, EvaluationId, PillarId, TrackId, UserId,
};
use crate::domain::people::{Role, UserProfile};
use crate::domain::rubric::{Criterion, CycleRubricRow, Pillar, Track, TrackCriterionWeight};

pub(crate) const CURRENT_CYCLE_KEY: &str = "current_cycle";

#[derive(Debug, Default)]
struct State {
    tracks: BTreeMap<TrackId, Track>,
    pillars: BTreeMap<PillarId, Pillar>,
    criteria: BTreeMap<CriterionId, Criterion>,
    draft: BTreeMap<(TrackId, CriterionId), TrackCriterionWeight>,
    snapshot: BTreeMap<(CycleId, TrackId, CriterionId), CycleRubricRow>,
    cycles: BTreeMap<CycleId, CycleConfig>,
    evaluations: BTreeMap<EvaluationId, EvaluationRecord>,
    equalizations: BTreeMap<EqualizationId, Equalization>,
    amendments: Vec<EqualizationAmendment>,
    users: BTreeMap<UserId, UserProfile>,
    settings: HashMap<String, String>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory implementation of all persistence ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────────────────────────────────────────────
    // Seeding helpers
    // ───────────────────────────────────────────────────────────────

    pub async fn add_track(&self, name: &str) -> Track {
        let mut state = self.state.write().await;
        let track = Track {
            id: TrackId::from_raw(state.next_id()),
            name: name.to_string(),
        };
        state.tracks.insert(track.id, track.clone());
        track
    }

    pub async fn add_pillar(&self, name: &str) -> Pillar {
        let mut state = self.state.write().await;
        let pillar = Pillar {
            id: PillarId::from_raw(state.next_id()),
            name: name.to_string(),
        };
        state.pillars.insert(pillar.id, pillar.clone());
        pillar
    }

    pub async fn add_criterion(&self, pillar_id: PillarId, name: &str) -> Criterion {
        let mut state = self.state.write().await;
        let criterion = Criterion {
            id: CriterionId::from_raw(state.next_id()),
            pillar_id,
            name: name.to_string(),
            description: None,
        };
        state.criteria.insert(criterion.id, criterion.clone());
        criterion
    }

    pub async fn add_user(&self, name: &str, roles: &[Role]) -> UserProfile {
        let mut state = self.state.write().await;
        let id = UserId::from_raw(state.next_id());
        let user = UserProfile {
            id,
            name: name.to_string(),
            email: format!("user{}@example.com", id),
            position: None,
            track: None,
            current_project: None,
            roles: roles.to_vec(),
        };
        state.users.insert(id, user.clone());
        user
    }

    /// Applies `change` to a stored user and returns the result.
    pub async fn update_user(
        &self,
        id: UserId,
        change: impl FnOnce(&mut UserProfile),
    ) -> Option<UserProfile> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(&id)?;
        change(user);
        Some(user.clone())
    }

    /// Number of evaluation headers stored.
    pub async fn evaluation_count(&self) -> usize {
        self.state.read().await.evaluations.len()
    }

    /// Number of equalizations stored.
    pub async fn equalization_count(&self) -> usize {
        self.state.read().await.equalizations.len()
    }
}
