//! Per-collaborator summary for one cycle.

use serde::{Deserialize, Serialize};

use super::SourceAverages;
use crate::domain::equalization::Equalization;
use crate::domain::evaluation::EvaluationRecord;
use crate::domain::foundation::{CycleId, UserId};

/// Whether the three mandatory sources are all in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[serde(rename = "finalizado")]
    Finalized,
    #[serde(rename = "pendente")]
    Pending,
}

impl CompletionStatus {
    /// Finalized once self-assessment, peer and manager averages exist.
    pub fn of(averages: &SourceAverages) -> Self {
        if averages.self_assessment.is_some() && averages.peer.is_some() && averages.manager.is_some() {
            CompletionStatus::Finalized
        } else {
            CompletionStatus::Pending
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualizationSummary {
    pub score: f64,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorSummary {
    pub collaborator_id: UserId,
    pub cycle_id: CycleId,
    pub self_assessment_average: Option<f64>,
    pub peer_average: Option<f64>,
    pub mentoring_average: Option<f64>,
    pub manager_average: Option<f64>,
    pub leader_average: Option<f64>,
    pub equalization: Option<EqualizationSummary>,
    pub status: CompletionStatus,
}

impl CollaboratorSummary {
    pub fn build(
        collaborator_id: UserId,
        cycle_id: CycleId,
        records: &[EvaluationRecord],
        equalization: Option<&Equalization>,
    ) -> Self {
        let in_cycle = records.iter().filter(|r| r.header.cycle_id() == cycle_id);
        let averages = SourceAverages::for_evaluatee(collaborator_id, in_cycle);

        Self {
            collaborator_id,
            cycle_id,
            self_assessment_average: averages.self_assessment,
            peer_average: averages.peer,
            mentoring_average: averages.mentoring,
            manager_average: averages.manager,
            leader_average: averages.leader,
            equalization: equalization.map(|e| EqualizationSummary {
                score: e.score.value(),
                justification: e.justification.clone(),
            }),
            status: CompletionStatus::of(&averages),
        }
    }
}
