//! Read model for cycles, with activity computed at read time.

use serde::Serialize;

use crate::domain::foundation::{CycleId, Timestamp};
use crate::domain::rubric::RubricView;

use super::{CycleConfig, CyclePhase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleView {
    pub id: CycleId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub done: bool,
    pub is_active: bool,
    pub phase: CyclePhase,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Frozen rubric; `None` when not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric: Option<RubricView>,
}

impl CycleView {
    pub fn of(cycle: &CycleConfig, now: Timestamp) -> Self {
        Self {
            id: cycle.id(),
            name: cycle.name().to_string(),
            description: cycle.description().map(str::to_string),
            start_date: cycle.start_date(),
            end_date: cycle.end_date(),
            done: cycle.is_done(),
            is_active: cycle.is_active(now),
            phase: cycle.phase(now),
            created_at: cycle.created_at(),
            updated_at: cycle.updated_at(),
            rubric: None,
        }
    }

    pub fn with_rubric(mut self, rubric: RubricView) -> Self {
        self.rubric = Some(rubric);
        self
    }
}
