//! DashboardStatsHandler and RoleCompletionHandler - completion counts.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::scoring::{role_completion, DashboardStats, RoleCompletion};
use crate::ports::{EvaluationRepository, UserDirectory};

use super::{CycleRef, CycleResolver, ResolvedCycle};

#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub cycle: Option<CycleRef>,
}

pub struct DashboardStatsHandler {
    resolver: CycleResolver,
    evaluations: Arc<dyn EvaluationRepository>,
}

impl DashboardStatsHandler {
    pub fn new(resolver: CycleResolver, evaluations: Arc<dyn EvaluationRepository>) -> Self {
        Self { resolver, evaluations }
    }

    pub async fn handle(&self, query: DashboardQuery) -> Result<DashboardStats, DomainError> {
        let resolved = self.resolver.resolve(query.cycle.as_ref()).await?;
        let records = match &resolved {
            ResolvedCycle::Cycle(cycle) => self.evaluations.list_by_cycle(cycle.id()).await?,
            ResolvedCycle::NoData => Vec::new(),
        };
        let overall = self.evaluations.overall_completion().await?;

        Ok(DashboardStats::compute(resolved.label(), &records, overall))
    }
}

pub struct RoleCompletionHandler {
    resolver: CycleResolver,
    evaluations: Arc<dyn EvaluationRepository>,
    directory: Arc<dyn UserDirectory>,
}

impl RoleCompletionHandler {
    pub fn new(
        resolver: CycleResolver,
        evaluations: Arc<dyn EvaluationRepository>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            resolver,
            evaluations,
            directory,
        }
    }

    pub async fn handle(&self, query: DashboardQuery) -> Result<Vec<RoleCompletion>, DomainError> {
        let ResolvedCycle::Cycle(cycle) = self.resolver.resolve(query.cycle.as_ref()).await? else {
            return Ok(Vec::new());
        };
        let records = self.evaluations.list_by_cycle(cycle.id()).await?;

        let evaluatees: Vec<UserId> = records
            .iter()
            .map(|r| r.header.evaluatee_id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let users: HashMap<UserId, _> = self
            .directory
            .find_many(&evaluatees)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(role_completion(&records, &users))
    }
}
