use serde::Deserialize;

use crate::domain::foundation::{CycleId, UserId};

/// Body shared by save and edit.
#[derive(Debug, Clone, Deserialize)]
pub struct EqualizationRequest {
    pub cycle_id: CycleId,
    pub collaborator_id: UserId,
    pub score: f64,
    pub justification: String,
    /// Edit only.
    #[serde(default)]
    pub change_reason: Option<String>,
    /// Edit only.
    #[serde(default)]
    pub changed_by: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EqualizationParams {
    pub cycle_id: CycleId,
    pub collaborator_id: UserId,
}
