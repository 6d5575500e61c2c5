//! In-memory capability and group store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use capscope_auth::store::CapabilityStore;
use capscope_auth::types::{Capability, Group};
use capscope_auth::AuthResult;

/// In-memory capability definitions plus the groups linked to them.
#[derive(Default)]
pub struct MemoryCapabilityStore {
    capabilities: RwLock<HashMap<Uuid, Capability>>,
    groups: RwLock<HashMap<Uuid, Group>>,
}

impl MemoryCapabilityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions a capability (administrative operation).
    pub async fn insert(&self, capability: Capability) -> Capability {
        let mut capabilities = self.capabilities.write().await;
        capabilities.insert(capability.id, capability.clone());
        capability
    }

    /// Provisions a group (administrative operation).
    pub async fn insert_group(&self, group: Group) -> Group {
        let mut groups = self.groups.write().await;
        groups.insert(group.id, group.clone());
        group
    }

    /// Removes a capability (administrative operation). Tokens already
    /// issued with its slug become unresolvable and degrade to deny.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.capabilities.write().await.remove(&id).is_some()
    }
}

#[async_trait]
impl CapabilityStore for MemoryCapabilityStore {
    async fn find_by_slug(&self, slug: &str) -> AuthResult<Option<Capability>> {
        let capabilities = self.capabilities.read().await;
        Ok(capabilities.values().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Capability>> {
        Ok(self.capabilities.read().await.get(&id).cloned())
    }

    async fn list_default(&self) -> AuthResult<Vec<Capability>> {
        let capabilities = self.capabilities.read().await;
        Ok(capabilities.values().filter(|c| c.default).cloned().collect())
    }

    async fn groups_for(&self, slug: &str) -> AuthResult<Vec<Group>> {
        let Some(capability) = self.find_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        let groups = self.groups.read().await;
        Ok(capability
            .group_ids
            .iter()
            .filter_map(|id| groups.get(id).cloned())
            .collect())
    }
}
