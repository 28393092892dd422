use async_trait::async_trait;

use super::{InMemoryStore, CURRENT_CYCLE_KEY};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::people::{Role, UserProfile};
use crate::ports::{SystemSettings, UserDirectory};

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find(&self, id: UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError> {
        let state = self.state.read().await;
        let mut users: Vec<UserProfile> = state
            .users
            .values()
            .filter(|u| u.has_role(role))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

#[async_trait]
impl SystemSettings for InMemoryStore {
    async fn current_cycle_name(&self) -> Result<Option<String>, DomainError> {
        Ok(self.state.read().await.settings.get(CURRENT_CYCLE_KEY).cloned())
    }

    async fn set_current_cycle_name(&self, name: Option<&str>) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match name {
            Some(name) => state.settings.insert(CURRENT_CYCLE_KEY.to_string(), name.to_string()),
            None => state.settings.remove(CURRENT_CYCLE_KEY),
        };
        Ok(())
    }
}
