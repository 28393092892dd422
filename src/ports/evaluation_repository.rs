//! Evaluation repository port.
//!
//! One header exists per (evaluator, evaluatee, cycle, kind). Payload writes
//! go through [`EvaluationRecord::attach`](crate::domain::evaluation::EvaluationRecord::attach)
//! semantics: per-criterion payloads are upserted, scalar payloads replaced,
//! and a payload of another kind is a conflict.

use async_trait::async_trait;

use crate::domain::evaluation::{EvaluationKey, EvaluationPayload, EvaluationRecord};
use crate::domain::foundation::{CycleId, DomainError, Timestamp, UserId};
use crate::domain::scoring::CompletionCounts;

#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn find_by_key(&self, key: &EvaluationKey) -> Result<Option<EvaluationRecord>, DomainError>;

    /// Finds or creates the header for `key` without touching its payload.
    async fn open(&self, key: EvaluationKey, now: Timestamp) -> Result<EvaluationRecord, DomainError>;

    /// Finds or creates the header and attaches `payload`, atomically.
    ///
    /// # Errors
    ///
    /// - `PayloadKindMismatch` if the payload kind differs from the header's
    async fn submit(
        &self,
        key: EvaluationKey,
        payload: EvaluationPayload,
        now: Timestamp,
    ) -> Result<EvaluationRecord, DomainError>;

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<EvaluationRecord>, DomainError>;

    /// Records about `evaluatee`, optionally restricted to one cycle.
    async fn list_for_evaluatee(
        &self,
        evaluatee: UserId,
        cycle_id: Option<CycleId>,
    ) -> Result<Vec<EvaluationRecord>, DomainError>;

    /// Records written by `evaluator` in a cycle.
    async fn list_for_evaluator(
        &self,
        evaluator: UserId,
        cycle_id: CycleId,
    ) -> Result<Vec<EvaluationRecord>, DomainError>;

    /// Completion counts across every cycle.
    async fn overall_completion(&self) -> Result<CompletionCounts, DomainError>;

    /// Cycle of the most recently created header, if any.
    async fn latest_cycle_with_evaluations(&self) -> Result<Option<CycleId>, DomainError>;
}
