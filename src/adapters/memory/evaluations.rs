use async_trait::async_trait;

use super::{InMemoryStore, State};
use crate::domain::evaluation::{
    Evaluation, EvaluationKey, EvaluationPayload, EvaluationRecord,
};
use crate::domain::foundation::{CycleId, DomainError, EvaluationId, Timestamp, UserId};
use crate::domain::scoring::CompletionCounts;
use crate::ports::EvaluationRepository;

impl State {
    fn find_record_id(&self, key: &EvaluationKey) -> Option<EvaluationId> {
        self.evaluations
            .values()
            .find(|r| r.header.key == *key)
            .map(|r| r.header.id)
    }

    fn open_record(&mut self, key: EvaluationKey, now: Timestamp) -> EvaluationId {
        if let Some(id) = self.find_record_id(&key) {
            return id;
        }
        let id = EvaluationId::from_raw(self.next_id());
        self.evaluations
            .insert(id, EvaluationRecord::pending(Evaluation::new(id, key, now)));
        id
    }

    fn records_where(&self, keep: impl Fn(&EvaluationRecord) -> bool) -> Vec<EvaluationRecord> {
        self.evaluations.values().filter(|r| keep(r)).cloned().collect()
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryStore {
    async fn find_by_key(&self, key: &EvaluationKey) -> Result<Option<EvaluationRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .find_record_id(key)
            .and_then(|id| state.evaluations.get(&id).cloned()))
    }

    async fn open(&self, key: EvaluationKey, now: Timestamp) -> Result<EvaluationRecord, DomainError> {
        let mut state = self.state.write().await;
        let id = state.open_record(key, now);
        Ok(state.evaluations[&id].clone())
    }

    async fn submit(
        &self,
        key: EvaluationKey,
        payload: EvaluationPayload,
        now: Timestamp,
    ) -> Result<EvaluationRecord, DomainError> {
        let mut state = self.state.write().await;
        let mut record = match state.find_record_id(&key) {
            Some(id) => state.evaluations[&id].clone(),
            None => {
                let id = EvaluationId::from_raw(state.next_id());
                EvaluationRecord::pending(Evaluation::new(id, key, now))
            }
        };
        record.attach(payload)?;
        state.evaluations.insert(record.header.id, record.clone());
        Ok(record)
    }

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<EvaluationRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state.records_where(|r| r.header.cycle_id() == cycle_id))
    }

    async fn list_for_evaluatee(
        &self,
        evaluatee: UserId,
        cycle_id: Option<CycleId>,
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state.records_where(|r| {
            r.header.evaluatee_id() == evaluatee
                && cycle_id.map_or(true, |c| r.header.cycle_id() == c)
        }))
    }

    async fn list_for_evaluator(
        &self,
        evaluator: UserId,
        cycle_id: CycleId,
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        let state = self.state.read().await;
        Ok(state.records_where(|r| {
            r.header.evaluator_id() == evaluator && r.header.cycle_id() == cycle_id
        }))
    }

    async fn overall_completion(&self) -> Result<CompletionCounts, DomainError> {
        let state = self.state.read().await;
        Ok(CompletionCounts::tally(state.evaluations.values()))
    }

    async fn latest_cycle_with_evaluations(&self) -> Result<Option<CycleId>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .evaluations
            .values()
            .max_by_key(|r| (r.header.created_at, r.header.id))
            .map(|r| r.header.cycle_id()))
    }
}
