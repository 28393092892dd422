//! EvolutionHandler - self-assessment average across cycles.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::evaluation::SourceKind;
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::domain::scoring::Evolution;
use crate::ports::{CycleRepository, EvaluationRepository, UserDirectory};

use super::super::evaluation::load_user;

#[derive(Debug, Clone)]
pub struct EvolutionQuery {
    pub collaborator_id: UserId,
    /// Restricts the sequence to these cycles when present.
    pub cycle_ids: Option<Vec<CycleId>>,
}

pub struct EvolutionHandler {
    cycles: Arc<dyn CycleRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    directory: Arc<dyn UserDirectory>,
}

impl EvolutionHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            cycles,
            evaluations,
            directory,
        }
    }

    pub async fn handle(&self, query: EvolutionQuery) -> Result<Evolution, DomainError> {
        load_user(self.directory.as_ref(), query.collaborator_id).await?;

        let cycles: Vec<_> = self
            .cycles
            .list()
            .await?
            .into_iter()
            .filter(|c| {
                query
                    .cycle_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&c.id()))
            })
            .collect();

        let mut scores: HashMap<CycleId, Vec<f64>> = HashMap::new();
        for record in self
            .evaluations
            .list_for_evaluatee(query.collaborator_id, None)
            .await?
        {
            if record.header.kind() != SourceKind::SelfAssessment
                || record.header.evaluator_id() != query.collaborator_id
            {
                continue;
            }
            scores
                .entry(record.header.cycle_id())
                .or_default()
                .extend(record.scores());
        }

        Ok(Evolution::new(&cycles, scores))
    }
}
