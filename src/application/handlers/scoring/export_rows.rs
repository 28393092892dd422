//! ExportRowsHandler - flat rows for the cycle export sheet.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::evaluation::SourceKind;
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::domain::scoring::{export_rows, ExportRow};
use crate::ports::{CycleRepository, EqualizationRepository, EvaluationRepository, UserDirectory};

use super::super::cycle::guard::load_cycle;

#[derive(Debug, Clone)]
pub struct ExportRowsQuery {
    pub cycle_id: CycleId,
}

pub struct ExportRowsHandler {
    cycles: Arc<dyn CycleRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    equalizations: Arc<dyn EqualizationRepository>,
    directory: Arc<dyn UserDirectory>,
}

impl ExportRowsHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        equalizations: Arc<dyn EqualizationRepository>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            cycles,
            evaluations,
            equalizations,
            directory,
        }
    }

    pub async fn handle(&self, query: ExportRowsQuery) -> Result<Vec<ExportRow>, DomainError> {
        let cycle = load_cycle(self.cycles.as_ref(), query.cycle_id).await?;
        let records = self.evaluations.list_by_cycle(cycle.id()).await?;
        let equalizations = self.equalizations.list_by_cycle(cycle.id()).await?;

        let collaborators: Vec<UserId> = records
            .iter()
            .filter(|r| r.header.kind() == SourceKind::SelfAssessment)
            .map(|r| r.header.evaluatee_id())
            .collect();
        let users: HashMap<UserId, _> = self
            .directory
            .find_many(&collaborators)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let rows = export_rows(&cycle, &records, &equalizations, &users);
        tracing::info!(cycle_id = %cycle.id(), rows = rows.len(), "Cycle exported");
        Ok(rows)
    }
}
