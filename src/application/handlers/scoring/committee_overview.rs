//! CommitteeOverviewHandler - equalization progress over employer collaborators.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::people::Role;
use crate::domain::scoring::CommitteeOverview;
use crate::ports::{Clock, EqualizationRepository, EvaluationRepository, UserDirectory};

use super::{CycleRef, CycleResolver, ResolvedCycle};

#[derive(Debug, Clone, Default)]
pub struct CommitteeOverviewQuery {
    pub cycle: Option<CycleRef>,
}

pub struct CommitteeOverviewHandler {
    resolver: CycleResolver,
    evaluations: Arc<dyn EvaluationRepository>,
    equalizations: Arc<dyn EqualizationRepository>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl CommitteeOverviewHandler {
    pub fn new(
        resolver: CycleResolver,
        evaluations: Arc<dyn EvaluationRepository>,
        equalizations: Arc<dyn EqualizationRepository>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver,
            evaluations,
            equalizations,
            directory,
            clock,
        }
    }

    pub async fn handle(&self, query: CommitteeOverviewQuery) -> Result<CommitteeOverview, DomainError> {
        let ResolvedCycle::Cycle(cycle) = self.resolver.resolve(query.cycle.as_ref()).await? else {
            return Ok(CommitteeOverview::empty());
        };

        let collaborators = self.directory.list_by_role(Role::Employer).await?;
        let records = self.evaluations.list_by_cycle(cycle.id()).await?;
        let equalizations = self.equalizations.list_by_cycle(cycle.id()).await?;

        let overview = CommitteeOverview::build(
            &cycle,
            &collaborators,
            &records,
            &equalizations,
            self.clock.now(),
        );
        tracing::debug!(
            cycle_id = %cycle.id(),
            equalized = overview.equalized,
            pending = overview.pending,
            "Committee overview computed"
        );
        Ok(overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::equalization::EqualizationInput;
    use crate::domain::evaluation::EvaluationKey;
    use crate::domain::foundation::Timestamp;
    use crate::ports::CycleRepository;

    #[tokio::test]
    async fn counts_equalized_employers_only() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let window = CycleWindow::new(now.minus_days(1), now.plus_days(3)).unwrap();
        let cycle = store
            .create_with_snapshot(NewCycle::new("2025.1", None, window).unwrap(), now)
            .await
            .unwrap();
        let ana = store.add_user("Ana", &[Role::Employer]).await;
        store.add_user("Bia", &[Role::Employer]).await;
        store.add_user("Rui", &[Role::Committee]).await;
        let anchor = store
            .open(EvaluationKey::self_assessment(ana.id, cycle.id()), now)
            .await
            .unwrap();
        store
            .insert(&anchor.header, EqualizationInput::new(4.0, "ok").unwrap(), now)
            .await
            .unwrap();
        let resolver = CycleResolver::new(Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store.clone()));
        let handler = CommitteeOverviewHandler::new(
            resolver,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(FixedClock::new(now)),
        );

        let overview = handler.handle(CommitteeOverviewQuery::default()).await.unwrap();

        assert_eq!(overview.collaborators.len(), 2);
        assert_eq!(overview.equalized, 1);
        assert_eq!(overview.pending, 1);
        assert_eq!(overview.completion_percentage.value(), 50);
        assert_eq!(overview.days_to_deadline, Some(3));
    }
}
