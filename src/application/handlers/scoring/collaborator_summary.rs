//! CollaboratorSummaryHandler - every source average for one person in one cycle.

use std::sync::Arc;

use crate::domain::evaluation::EvaluationKey;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::scoring::CollaboratorSummary;
use crate::ports::{EqualizationRepository, EvaluationRepository, UserDirectory};

use super::super::evaluation::load_user;
use super::{CycleRef, CycleResolver, ResolvedCycle};

#[derive(Debug, Clone)]
pub struct CollaboratorSummaryQuery {
    pub collaborator_id: UserId,
    pub cycle: Option<CycleRef>,
}

pub struct CollaboratorSummaryHandler {
    resolver: CycleResolver,
    evaluations: Arc<dyn EvaluationRepository>,
    equalizations: Arc<dyn EqualizationRepository>,
    directory: Arc<dyn UserDirectory>,
}

impl CollaboratorSummaryHandler {
    pub fn new(
        resolver: CycleResolver,
        evaluations: Arc<dyn EvaluationRepository>,
        equalizations: Arc<dyn EqualizationRepository>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            resolver,
            evaluations,
            equalizations,
            directory,
        }
    }

    pub async fn handle(&self, query: CollaboratorSummaryQuery) -> Result<CollaboratorSummary, DomainError> {
        load_user(self.directory.as_ref(), query.collaborator_id).await?;

        let cycle = match self.resolver.resolve(query.cycle.as_ref()).await? {
            ResolvedCycle::Cycle(cycle) => cycle,
            ResolvedCycle::NoData => {
                return Err(DomainError::new(ErrorCode::CycleNotFound, "No cycle to summarize"));
            }
        };

        let records = self
            .evaluations
            .list_for_evaluatee(query.collaborator_id, Some(cycle.id()))
            .await?;
        let equalization = match self
            .evaluations
            .find_by_key(&EvaluationKey::self_assessment(query.collaborator_id, cycle.id()))
            .await?
        {
            Some(anchor) => self.equalizations.find_by_evaluation(anchor.header.id).await?,
            None => None,
        };

        tracing::debug!(
            collaborator_id = %query.collaborator_id,
            cycle_id = %cycle.id(),
            records = records.len(),
            "Collaborator summary computed"
        );
        Ok(CollaboratorSummary::build(
            query.collaborator_id,
            cycle.id(),
            &records,
            equalization.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::equalization::EqualizationInput;
    use crate::domain::evaluation::{EvaluationPayload, PeerReview, SourceKind};
    use crate::domain::foundation::{Score, Timestamp};
    use crate::domain::people::Role;
    use crate::domain::scoring::CompletionStatus;
    use crate::ports::CycleRepository;

    fn handler(store: &InMemoryStore) -> CollaboratorSummaryHandler {
        let resolver = CycleResolver::new(Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store.clone()));
        CollaboratorSummaryHandler::new(resolver, Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn summary_includes_peer_average_and_equalization() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let window = CycleWindow::new(now.minus_days(1), now.plus_days(10)).unwrap();
        let cycle = store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();
        let ana = store.add_user("Ana", &[Role::Employer]).await;
        for (evaluator, score) in [(50, 4), (51, 2)] {
            let key = EvaluationKey::new(UserId::from_raw(evaluator), ana.id, cycle.id(), SourceKind::Peer360).unwrap();
            store
                .submit(
                    key,
                    EvaluationPayload::Peer360(PeerReview::new(Score::try_new(score).unwrap(), "a", "b").unwrap()),
                    now,
                )
                .await
                .unwrap();
        }
        let anchor = store
            .open(EvaluationKey::self_assessment(ana.id, cycle.id()), now)
            .await
            .unwrap();
        store
            .insert(&anchor.header, EqualizationInput::new(3.5, "calibrated").unwrap(), now)
            .await
            .unwrap();

        let summary = handler(&store)
            .handle(CollaboratorSummaryQuery {
                collaborator_id: ana.id,
                cycle: Some(CycleRef::Id(cycle.id())),
            })
            .await
            .unwrap();

        assert_eq!(summary.peer_average, Some(3.0));
        assert_eq!(summary.self_assessment_average, None);
        assert_eq!(summary.equalization.as_ref().map(|e| e.score), Some(3.5));
        assert_eq!(summary.status, CompletionStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_collaborator_is_not_found() {
        let store = InMemoryStore::new();
        let err = handler(&store)
            .handle(CollaboratorSummaryQuery {
                collaborator_id: UserId::from_raw(9),
                cycle: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn no_resolvable_cycle_is_not_found() {
        let store = InMemoryStore::new();
        let ana = store.add_user("Ana", &[]).await;
        let err = handler(&store)
            .handle(CollaboratorSummaryQuery {
                collaborator_id: ana.id,
                cycle: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }
}
