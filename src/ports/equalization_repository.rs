//! Equalization repository port.

use async_trait::async_trait;

use crate::domain::equalization::{Equalization, EqualizationAmendment, EqualizationInput};
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{CycleId, DomainError, EqualizationId, EvaluationId, Timestamp};

#[async_trait]
pub trait EqualizationRepository: Send + Sync {
    /// Creates the equalization for `evaluation` unless one exists.
    ///
    /// The existence check and the insert are one atomic step.
    ///
    /// # Errors
    ///
    /// - `EqualizationExists` if the evaluation already has one
    async fn insert(
        &self,
        evaluation: &Evaluation,
        input: EqualizationInput,
        now: Timestamp,
    ) -> Result<Equalization, DomainError>;

    async fn find_by_evaluation(&self, evaluation_id: EvaluationId) -> Result<Option<Equalization>, DomainError>;

    /// Stores an edited equalization and appends `amendment` to its history.
    ///
    /// Both writes are one atomic step, applied only while the stored
    /// revision is still the one the edit started from.
    ///
    /// # Errors
    ///
    /// - `EqualizationNotFound` if it was removed meanwhile
    /// - `EqualizationStale` if another edit landed first
    async fn amend(
        &self,
        equalization: &Equalization,
        amendment: &EqualizationAmendment,
    ) -> Result<(), DomainError>;

    /// Edits of one equalization, newest first.
    async fn history(&self, equalization_id: EqualizationId) -> Result<Vec<EqualizationAmendment>, DomainError>;

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<Equalization>, DomainError>;
}
