use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::equalization::{Equalization, EqualizationAmendment, EqualizationInput};
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{
    CycleId, DomainError, EqualizationId, ErrorCode, EvaluationId, Timestamp,
};
use crate::ports::EqualizationRepository;

#[async_trait]
impl EqualizationRepository for InMemoryStore {
    async fn insert(
        &self,
        evaluation: &Evaluation,
        input: EqualizationInput,
        now: Timestamp,
    ) -> Result<Equalization, DomainError> {
        let mut state = self.state.write().await;
        if state
            .equalizations
            .values()
            .any(|e| e.evaluation_id == evaluation.id)
        {
            return Err(DomainError::new(
                ErrorCode::EqualizationExists,
                "An equalization already exists for this evaluation",
            )
            .with_detail("evaluation_id", evaluation.id.to_string()));
        }

        let equalization = Equalization {
            id: EqualizationId::from_raw(state.next_id()),
            evaluation_id: evaluation.id,
            cycle_id: evaluation.cycle_id(),
            collaborator_id: evaluation.evaluatee_id(),
            score: input.score,
            justification: input.justification,
            revision: 0,
            created_at: now,
            updated_at: now,
        };
        state.equalizations.insert(equalization.id, equalization.clone());
        Ok(equalization)
    }

    async fn find_by_evaluation(&self, evaluation_id: EvaluationId) -> Result<Option<Equalization>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .equalizations
            .values()
            .find(|e| e.evaluation_id == evaluation_id)
            .cloned())
    }

    async fn amend(
        &self,
        equalization: &Equalization,
        amendment: &EqualizationAmendment,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.equalizations.get_mut(&equalization.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::EqualizationNotFound,
                format!("Equalization not found: {}", equalization.id),
            )
        })?;
        if stored.revision + 1 != amendment.revision {
            return Err(stale(equalization, stored.revision));
        }

        *stored = equalization.clone();
        state.amendments.push(amendment.clone());
        Ok(())
    }

    async fn history(&self, equalization_id: EqualizationId) -> Result<Vec<EqualizationAmendment>, DomainError> {
        let state = self.state.read().await;
        let mut entries: Vec<_> = state
            .amendments
            .iter()
            .filter(|a| a.equalization_id == equalization_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.revision.cmp(&a.revision));
        Ok(entries)
    }

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<Equalization>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .equalizations
            .values()
            .filter(|e| e.cycle_id == cycle_id)
            .cloned()
            .collect())
    }
}

fn stale(equalization: &Equalization, stored_revision: u32) -> DomainError {
    DomainError::new(
        ErrorCode::EqualizationStale,
        format!("Equalization {} was changed by another edit", equalization.id),
    )
    .with_detail("stored_revision", stored_revision.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::EvaluationKey;
    use crate::domain::foundation::UserId;
    use std::sync::Arc;

    fn header() -> Evaluation {
        let key = EvaluationKey::self_assessment(UserId::from_raw(5), CycleId::from_raw(1));
        Evaluation::new(EvaluationId::from_raw(10), key, Timestamp::now())
    }

    #[tokio::test]
    async fn second_insert_is_rejected() {
        let store = InMemoryStore::new();
        let input = EqualizationInput::new(4.0, "agreed").unwrap();

        store.insert(&header(), input.clone(), Timestamp::now()).await.unwrap();
        let err = store.insert(&header(), input, Timestamp::now()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EqualizationExists);
    }

    #[tokio::test]
    async fn concurrent_inserts_create_exactly_one() {
        let store = Arc::new(InMemoryStore::new());
        let mut tasks = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let input = EqualizationInput::new(3.0 + (i as f64) / 10.0, "race").unwrap();
                store.insert(&header(), input, Timestamp::now()).await
            }));
        }

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.equalization_count().await, 1);
    }

    #[tokio::test]
    async fn amendments_are_listed_newest_first() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let mut eq = store
            .insert(&header(), EqualizationInput::new(3.0, "agreed").unwrap(), now)
            .await
            .unwrap();

        for score in [3.5, 4.0] {
            let amendment = eq
                .edit(EqualizationInput::new(score, "revised").unwrap(), None, None, now)
                .unwrap();
            store.amend(&eq, &amendment).await.unwrap();
        }

        let history = store.history(eq.id).await.unwrap();
        let revisions: Vec<u32> = history.iter().map(|a| a.revision).collect();
        assert_eq!(revisions, vec![2, 1]);
        assert_eq!(history[1].previous_score.value(), 3.0);
    }

    #[tokio::test]
    async fn edit_from_an_outdated_copy_is_stale() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let saved = store
            .insert(&header(), EqualizationInput::new(3.0, "agreed").unwrap(), now)
            .await
            .unwrap();

        let mut first = saved.clone();
        let mut second = saved;
        let a = first
            .edit(EqualizationInput::new(4.0, "first").unwrap(), None, None, now)
            .unwrap();
        let b = second
            .edit(EqualizationInput::new(2.0, "second").unwrap(), None, None, now)
            .unwrap();
        store.amend(&first, &a).await.unwrap();
        let err = store.amend(&second, &b).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EqualizationStale);
        let stored = store.find_by_evaluation(first.evaluation_id).await.unwrap().unwrap();
        assert_eq!(stored.score.value(), 4.0);
        assert_eq!(store.history(stored.id).await.unwrap().len(), 1);
    }
}
