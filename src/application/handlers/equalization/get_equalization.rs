//! GetEqualizationHandler - the committee score for one collaborator, if any.

use std::sync::Arc;

use crate::domain::equalization::Equalization;
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::ports::{EqualizationRepository, EvaluationRepository};

use super::find_anchor;

#[derive(Debug, Clone)]
pub struct GetEqualizationQuery {
    pub collaborator_id: UserId,
    pub cycle_id: CycleId,
}

pub struct GetEqualizationHandler {
    equalizations: Arc<dyn EqualizationRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
}

impl GetEqualizationHandler {
    pub fn new(
        equalizations: Arc<dyn EqualizationRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
    ) -> Self {
        Self {
            equalizations,
            evaluations,
        }
    }

    pub async fn handle(&self, query: GetEqualizationQuery) -> Result<Option<Equalization>, DomainError> {
        let Some(anchor) =
            find_anchor(self.evaluations.as_ref(), query.collaborator_id, query.cycle_id).await?
        else {
            return Ok(None);
        };
        self.equalizations.find_by_evaluation(anchor.header.id).await
    }
}
