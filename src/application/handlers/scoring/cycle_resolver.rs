//! Resolves which cycle a read operation targets.
//!
//! Order: explicit reference, configured `current_cycle` name, the most
//! recent cycle any evaluation points at. When none of those yields a cycle
//! the caller gets [`ResolvedCycle::NoData`] and answers with empty results.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::cycle::CycleConfig;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, ValidationError};
use crate::domain::scoring::CycleLabel;
use crate::ports::{CycleRepository, EvaluationRepository, SystemSettings};

use super::super::cycle::guard::load_cycle;

/// A cycle named by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleRef {
    Id(CycleId),
    Name(String),
}

impl FromStr for CycleRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("cycle"));
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(raw) => CycleRef::Id(CycleId::from_raw(raw)),
            Err(_) => CycleRef::Name(trimmed.to_string()),
        })
    }
}

impl fmt::Display for CycleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleRef::Id(id) => write!(f, "{}", id),
            CycleRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResolvedCycle {
    Cycle(CycleConfig),
    NoData,
}

impl ResolvedCycle {
    pub fn cycle(&self) -> Option<&CycleConfig> {
        match self {
            ResolvedCycle::Cycle(c) => Some(c),
            ResolvedCycle::NoData => None,
        }
    }

    pub fn label(&self) -> Option<CycleLabel> {
        self.cycle().map(|c| CycleLabel {
            id: c.id(),
            name: c.name().to_string(),
        })
    }
}

#[derive(Clone)]
pub struct CycleResolver {
    cycles: Arc<dyn CycleRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    settings: Arc<dyn SystemSettings>,
}

impl CycleResolver {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        settings: Arc<dyn SystemSettings>,
    ) -> Self {
        Self {
            cycles,
            evaluations,
            settings,
        }
    }

    /// Fails with `CycleNotFound` only when an explicit reference is unknown.
    pub async fn resolve(&self, reference: Option<&CycleRef>) -> Result<ResolvedCycle, DomainError> {
        if let Some(reference) = reference {
            let cycle = match reference {
                CycleRef::Id(id) => load_cycle(self.cycles.as_ref(), *id).await?,
                CycleRef::Name(name) => self.cycles.find_by_name(name).await?.ok_or_else(|| {
                    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", name))
                        .with_detail("cycle", name.clone())
                })?,
            };
            return Ok(ResolvedCycle::Cycle(cycle));
        }

        if let Some(name) = self.settings.current_cycle_name().await? {
            match self.cycles.find_by_name(&name).await? {
                Some(cycle) => return Ok(ResolvedCycle::Cycle(cycle)),
                None => tracing::warn!(cycle = %name, "Configured current cycle does not exist"),
            }
        }

        if let Some(id) = self.evaluations.latest_cycle_with_evaluations().await? {
            if let Some(cycle) = self.cycles.find_by_id(id).await? {
                return Ok(ResolvedCycle::Cycle(cycle));
            }
        }

        tracing::debug!("No cycle resolved");
        Ok(ResolvedCycle::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::cycle::{CycleWindow, NewCycle};
    use crate::domain::evaluation::EvaluationKey;
    use crate::domain::foundation::{Timestamp, UserId};

    async fn cycle(store: &InMemoryStore, name: &str, start_offset: i64) -> CycleConfig {
        let start = Timestamp::now().plus_days(start_offset);
        let window = CycleWindow::new(start, start.plus_days(10)).unwrap();
        store
            .create_with_snapshot(NewCycle::new(name, None, window).unwrap(), Timestamp::now())
            .await
            .unwrap()
    }

    fn resolver(store: &InMemoryStore) -> CycleResolver {
        CycleResolver::new(Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[test]
    fn parses_numeric_ids_and_names() {
        assert_eq!("42".parse::<CycleRef>().unwrap(), CycleRef::Id(CycleId::from_raw(42)));
        assert_eq!(" 2025.1 ".parse::<CycleRef>().unwrap(), CycleRef::Name("2025.1".to_string()));
        assert!("  ".parse::<CycleRef>().is_err());
    }

    #[tokio::test]
    async fn explicit_reference_wins() {
        let store = InMemoryStore::new();
        let first = cycle(&store, "2024.2", -200).await;
        cycle(&store, "2025.1", -1).await;
        store.set_current_cycle_name(Some("2025.1")).await.unwrap();

        let by_name = resolver(&store)
            .resolve(Some(&CycleRef::Name("2024.2".to_string())))
            .await
            .unwrap();
        let by_id = resolver(&store).resolve(Some(&CycleRef::Id(first.id()))).await.unwrap();

        assert_eq!(by_name.cycle().unwrap().id(), first.id());
        assert_eq!(by_id.cycle().unwrap().id(), first.id());
    }

    #[tokio::test]
    async fn unknown_explicit_reference_is_not_found() {
        let store = InMemoryStore::new();
        let err = resolver(&store)
            .resolve(Some(&CycleRef::Name("nope".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }

    #[tokio::test]
    async fn falls_back_to_configured_then_latest_evaluated() {
        let store = InMemoryStore::new();
        let old = cycle(&store, "2024.2", -200).await;
        let new = cycle(&store, "2025.1", -1).await;
        store
            .open(
                EvaluationKey::self_assessment(UserId::from_raw(1), old.id()),
                Timestamp::now(),
            )
            .await
            .unwrap();

        let latest = resolver(&store).resolve(None).await.unwrap();
        assert_eq!(latest.cycle().unwrap().id(), old.id());

        store.set_current_cycle_name(Some("2025.1")).await.unwrap();
        let configured = resolver(&store).resolve(None).await.unwrap();
        assert_eq!(configured.cycle().unwrap().id(), new.id());
    }

    #[tokio::test]
    async fn nothing_to_resolve_is_no_data() {
        let store = InMemoryStore::new();
        cycle(&store, "2025.1", -1).await;

        let resolved = resolver(&store).resolve(None).await.unwrap();

        assert!(matches!(resolved, ResolvedCycle::NoData));
        assert!(resolved.label().is_none());
    }
}
