//! GetEqualizationHistoryHandler - edits of one collaborator's committee score.

use std::sync::Arc;

use crate::domain::equalization::EqualizationAmendment;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};
use crate::ports::{EqualizationRepository, EvaluationRepository};

use super::find_anchor;

#[derive(Debug, Clone)]
pub struct GetEqualizationHistoryQuery {
    pub collaborator_id: UserId,
    pub cycle_id: CycleId,
}

pub struct GetEqualizationHistoryHandler {
    equalizations: Arc<dyn EqualizationRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
}

impl GetEqualizationHistoryHandler {
    pub fn new(
        equalizations: Arc<dyn EqualizationRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
    ) -> Self {
        Self {
            equalizations,
            evaluations,
        }
    }

    /// Newest edit first; empty when the equalization was never edited.
    ///
    /// # Errors
    ///
    /// - `EqualizationNotFound` if nothing was saved for the collaborator
    pub async fn handle(
        &self,
        query: GetEqualizationHistoryQuery,
    ) -> Result<Vec<EqualizationAmendment>, DomainError> {
        let not_saved = || {
            DomainError::new(
                ErrorCode::EqualizationNotFound,
                format!(
                    "No equalization saved for collaborator {} in cycle {}",
                    query.collaborator_id, query.cycle_id
                ),
            )
            .with_detail("collaborator_id", query.collaborator_id.to_string())
        };

        let anchor = find_anchor(self.evaluations.as_ref(), query.collaborator_id, query.cycle_id)
            .await?
            .ok_or_else(not_saved)?;
        let equalization = self
            .equalizations
            .find_by_evaluation(anchor.header.id)
            .await?
            .ok_or_else(not_saved)?;

        self.equalizations.history(equalization.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::equalization::EqualizationInput;
    use crate::domain::evaluation::EvaluationKey;
    use crate::domain::foundation::Timestamp;

    fn query() -> GetEqualizationHistoryQuery {
        GetEqualizationHistoryQuery {
            collaborator_id: UserId::from_raw(7),
            cycle_id: CycleId::from_raw(1),
        }
    }

    #[tokio::test]
    async fn missing_equalization_is_not_found() {
        let store = InMemoryStore::new();
        let handler = GetEqualizationHistoryHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let err = handler.handle(query()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EqualizationNotFound);
    }

    #[tokio::test]
    async fn unedited_equalization_has_empty_history() {
        let store = InMemoryStore::new();
        let handler = GetEqualizationHistoryHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));
        let anchor = store
            .open(EvaluationKey::self_assessment(UserId::from_raw(7), CycleId::from_raw(1)), Timestamp::now())
            .await
            .unwrap();
        store
            .insert(&anchor.header, EqualizationInput::new(4.0, "ok").unwrap(), Timestamp::now())
            .await
            .unwrap();

        assert!(handler.handle(query()).await.unwrap().is_empty());
    }
}
