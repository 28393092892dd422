//! Read-only access to user reference data.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::people::{Role, UserProfile};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find(&self, id: UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Profiles for the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError>;

    /// Users holding `role` as an active role, ordered by name.
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError>;
}
