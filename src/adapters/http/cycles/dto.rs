//! Request and response bodies for cycle endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, CycleId, TrackId};
use crate::ports::CancelledCycle;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Dates are calendar days in the organization's offset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCycleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtendCycleRequest {
    pub new_end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetCurrentCycleRequest {
    pub cycle_id: Option<CycleId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCycleRubricRequest {
    pub track_id: TrackId,
    pub criterion_id: CriterionId,
    pub weight: f64,
    pub is_active: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelCycleResponse {
    pub cycle_id: CycleId,
    pub evaluations_removed: u64,
    pub equalizations_removed: u64,
    pub rubric_rows_removed: u64,
}

impl From<CancelledCycle> for CancelCycleResponse {
    fn from(c: CancelledCycle) -> Self {
        Self {
            cycle_id: c.cycle_id,
            evaluations_removed: c.evaluations_removed,
            equalizations_removed: c.equalizations_removed,
            rubric_rows_removed: c.rubric_rows_removed,
        }
    }
}
