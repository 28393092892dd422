//! Request bodies for draft rubric endpoints.

use serde::Deserialize;

use crate::domain::foundation::{CriterionId, PillarId};

/// Either a criterion-level edit (`criterion_id` set) or a pillar-level
/// activation toggle (`pillar_id` only).
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTrackConfigRequest {
    #[serde(default)]
    pub pillar_id: Option<PillarId>,
    #[serde(default)]
    pub criterion_id: Option<CriterionId>,
    #[serde(default)]
    pub weight: Option<f64>,
    pub is_active: bool,
}
