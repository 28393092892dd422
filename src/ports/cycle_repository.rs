//! Cycle repository port.
//!
//! # Atomicity
//!
//! - `create_with_snapshot` inserts the cycle and copies every draft rubric
//!   row into it in a single transaction.
//! - `cancel` removes equalizations, payloads, headers, rubric rows and the
//!   cycle in a single transaction, in that order.

use async_trait::async_trait;

use crate::domain::cycle::{CycleConfig, NewCycle};
use crate::domain::foundation::{CycleId, DomainError, Timestamp};

/// What a cancellation removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelledCycle {
    pub cycle_id: CycleId,
    pub evaluations_removed: u64,
    pub equalizations_removed: u64,
    pub rubric_rows_removed: u64,
}

#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Creates the cycle and freezes the current draft rubric into it.
    ///
    /// # Errors
    ///
    /// - `DuplicateCycleName` if the name is taken
    /// - `DatabaseError` on persistence failure
    async fn create_with_snapshot(&self, new: NewCycle, now: Timestamp) -> Result<CycleConfig, DomainError>;

    /// Persists name, description, window and `done`.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the cycle doesn't exist
    /// - `DuplicateCycleName` if another cycle has the name
    async fn update(&self, cycle: &CycleConfig) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: CycleId) -> Result<Option<CycleConfig>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<CycleConfig>, DomainError>;

    /// All cycles, newest start date first.
    async fn list(&self) -> Result<Vec<CycleConfig>, DomainError>;

    /// Deletes the cycle and everything recorded in it.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the cycle doesn't exist
    async fn cancel(&self, id: CycleId) -> Result<CancelledCycle, DomainError>;
}
