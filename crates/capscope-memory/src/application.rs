//! In-memory application store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use capscope_auth::secret::verify_client_secret;
use capscope_auth::store::ApplicationStore;
use capscope_auth::types::Application;
use capscope_auth::{AuthError, AuthResult};

/// In-memory OAuth client registrations.
#[derive(Default)]
pub struct MemoryApplicationStore {
    applications: RwLock<HashMap<Uuid, Application>>,
}

impl MemoryApplicationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Application>> {
        let applications = self.applications.read().await;
        Ok(applications
            .values()
            .find(|a| a.client_id == client_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Application>> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn create(&self, application: &Application) -> AuthResult<Application> {
        let mut applications = self.applications.write().await;
        if applications
            .values()
            .any(|a| a.client_id == application.client_id)
        {
            return Err(AuthError::storage(format!(
                "Client id already registered: {}",
                application.client_id
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn verify_secret(&self, client_id: &str, secret: &str) -> AuthResult<bool> {
        let applications = self.applications.read().await;
        let Some(application) = applications.values().find(|a| a.client_id == client_id) else {
            return Ok(false);
        };
        let Some(hash) = application.client_secret_hash.as_deref() else {
            return Ok(false);
        };
        Ok(verify_client_secret(secret, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capscope_auth::secret::hash_client_secret;
    use capscope_auth::types::GrantType;

    fn app_with_secret(client_id: &str, secret: &str) -> Application {
        let hash = hash_client_secret(secret).unwrap();
        Application::new(client_id, "Test App", GrantType::AuthorizationCode)
            .with_secret_hash(hash)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryApplicationStore::new();
        let app = store
            .create(&app_with_secret("client-1", "s3cret"))
            .await
            .unwrap();

        let found = store.find_by_client_id("client-1").await.unwrap().unwrap();
        assert_eq!(found.id, app.id);
        assert!(store.find_by_client_id("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_client_id_rejected() {
        let store = MemoryApplicationStore::new();
        store
            .create(&app_with_secret("client-1", "a"))
            .await
            .unwrap();
        assert!(store.create(&app_with_secret("client-1", "b")).await.is_err());
    }

    #[tokio::test]
    async fn test_verify_secret() {
        let store = MemoryApplicationStore::new();
        store
            .create(&app_with_secret("client-1", "s3cret"))
            .await
            .unwrap();

        assert!(store.verify_secret("client-1", "s3cret").await.unwrap());
        assert!(!store.verify_secret("client-1", "wrong").await.unwrap());
        assert!(!store.verify_secret("unknown", "s3cret").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_secret_without_hash() {
        let store = MemoryApplicationStore::new();
        store
            .create(&Application::new(
                "public-client",
                "Public App",
                GrantType::AuthorizationCode,
            ))
            .await
            .unwrap();

        assert!(!store.verify_secret("public-client", "anything").await.unwrap());
    }
}
