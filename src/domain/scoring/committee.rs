//! Committee overview: who is equalized and who is still pending.

use std::collections::HashMap;

use serde::Serialize;

use super::{round_to, CycleLabel, SourceAverages};
use crate::domain::cycle::CycleConfig;
use crate::domain::equalization::Equalization;
use crate::domain::evaluation::EvaluationRecord;
use crate::domain::foundation::{Percentage, Timestamp, UserId};
use crate::domain::people::UserProfile;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeRow {
    pub collaborator_id: UserId,
    pub name: String,
    pub position: Option<String>,
    pub track: Option<String>,
    /// Averages rounded to one decimal.
    pub averages: SourceAverages,
    pub equalization_score: Option<f64>,
    pub equalized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeOverview {
    pub cycle: Option<CycleLabel>,
    pub collaborators: Vec<CommitteeRow>,
    pub equalized: usize,
    pub pending: usize,
    pub completion_percentage: Percentage,
    /// Whole days left until the end date, rounded up; never negative.
    pub days_to_deadline: Option<i64>,
}

impl CommitteeOverview {
    pub fn empty() -> Self {
        Self {
            cycle: None,
            collaborators: Vec::new(),
            equalized: 0,
            pending: 0,
            completion_percentage: Percentage::ZERO,
            days_to_deadline: None,
        }
    }

    pub fn build(
        cycle: &CycleConfig,
        collaborators: &[UserProfile],
        records: &[EvaluationRecord],
        equalizations: &[Equalization],
        now: Timestamp,
    ) -> Self {
        let by_collaborator: HashMap<UserId, &Equalization> = equalizations
            .iter()
            .filter(|e| e.cycle_id == cycle.id())
            .map(|e| (e.collaborator_id, e))
            .collect();
        let in_cycle: Vec<&EvaluationRecord> = records
            .iter()
            .filter(|r| r.header.cycle_id() == cycle.id())
            .collect();

        let rows: Vec<CommitteeRow> = collaborators
            .iter()
            .map(|user| {
                let raw = SourceAverages::for_evaluatee(user.id, in_cycle.iter().copied());
                let equalization = by_collaborator.get(&user.id);
                CommitteeRow {
                    collaborator_id: user.id,
                    name: user.name.clone(),
                    position: user.position.clone(),
                    track: user.track.as_ref().map(|t| t.name.clone()),
                    averages: rounded(raw),
                    equalization_score: equalization.map(|e| e.score.value()),
                    equalized: equalization.is_some(),
                }
            })
            .collect();

        let equalized = rows.iter().filter(|r| r.equalized).count();
        Self {
            cycle: Some(CycleLabel {
                id: cycle.id(),
                name: cycle.name().to_string(),
            }),
            equalized,
            pending: rows.len() - equalized,
            completion_percentage: Percentage::of(equalized, rows.len()),
            days_to_deadline: Some(days_until(now, cycle.end_date())),
            collaborators: rows,
        }
    }
}

/// Days from `now` to `deadline`, rounded up and floored at zero.
pub fn days_until(now: Timestamp, deadline: Timestamp) -> i64 {
    let millis = deadline.duration_since(&now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

fn rounded(averages: SourceAverages) -> SourceAverages {
    let r = |v: Option<f64>| v.map(|x| round_to(x, 1));
    SourceAverages {
        self_assessment: r(averages.self_assessment),
        peer: r(averages.peer),
        mentoring: r(averages.mentoring),
        manager: r(averages.manager),
        leader: r(averages.leader),
    }
}
