//! Completion statistics over evaluation headers.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::evaluation::{EvaluationRecord, SourceKind};
use crate::domain::foundation::{CycleId, Percentage, UserId};
use crate::domain::people::{Role, UserProfile};

/// Completed vs pending counts with their rounded share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_percentage: Percentage,
}

impl CompletionCounts {
    pub fn record(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        } else {
            self.pending += 1;
        }
        self.completion_percentage = Percentage::of(self.completed, self.total);
    }

    pub fn from_totals(total: usize, completed: usize) -> Self {
        let completed = completed.min(total);
        Self {
            total,
            completed,
            pending: total - completed,
            completion_percentage: Percentage::of(completed, total),
        }
    }

    pub fn tally<'a>(records: impl IntoIterator<Item = &'a EvaluationRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.record(record.is_completed());
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleLabel {
    pub id: CycleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// `None` when no cycle could be resolved.
    pub cycle: Option<CycleLabel>,
    pub cycle_completion: CompletionCounts,
    pub by_source: BTreeMap<SourceKind, CompletionCounts>,
    /// Across every cycle.
    pub overall: CompletionCounts,
}

impl DashboardStats {
    /// `overall` is computed by the caller across every cycle.
    pub fn compute(
        cycle: Option<CycleLabel>,
        cycle_records: &[EvaluationRecord],
        overall: CompletionCounts,
    ) -> Self {
        let mut by_source: BTreeMap<SourceKind, CompletionCounts> = SourceKind::all()
            .iter()
            .map(|k| (*k, CompletionCounts::default()))
            .collect();
        for record in cycle_records {
            by_source
                .entry(record.header.kind())
                .or_default()
                .record(record.is_completed());
        }

        Self {
            cycle,
            cycle_completion: CompletionCounts::tally(cycle_records),
            by_source,
            overall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCompletion {
    pub role: Role,
    #[serde(flatten)]
    pub counts: CompletionCounts,
}

/// Cross-tabulates completion by each active role of the evaluatee.
///
/// An evaluation counts once for every role its evaluatee holds. Evaluatees
/// without roles, or unknown to the directory, are skipped.
pub fn role_completion(
    records: &[EvaluationRecord],
    users: &HashMap<UserId, UserProfile>,
) -> Vec<RoleCompletion> {
    let mut by_role: BTreeMap<Role, CompletionCounts> = BTreeMap::new();

    for record in records {
        let Some(user) = users.get(&record.header.evaluatee_id()) else {
            continue;
        };
        for role in &user.roles {
            by_role.entry(*role).or_default().record(record.is_completed());
        }
    }

    by_role
        .into_iter()
        .map(|(role, counts)| RoleCompletion { role, counts })
        .collect()
}
