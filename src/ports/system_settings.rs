//! Persisted key/value settings.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait SystemSettings: Send + Sync {
    /// Name stored under `current_cycle`, if set.
    async fn current_cycle_name(&self) -> Result<Option<String>, DomainError>;

    /// Stores or clears the current cycle name.
    async fn set_current_cycle_name(&self, name: Option<&str>) -> Result<(), DomainError>;
}
