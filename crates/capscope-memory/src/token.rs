//! In-memory access token store.
//!
//! `insert_for_application` holds the write lock across the revoke and the
//! insert, so concurrent issuance for the same application always settles on
//! exactly one surviving token.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use capscope_auth::store::TokenStore;
use capscope_auth::types::AccessToken;
use capscope_auth::AuthResult;

/// In-memory issued access tokens, keyed by record id.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<Uuid, AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert_for_application(&self, token: &AccessToken) -> AuthResult<AccessToken> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.application_id != token.application_id);
        let revoked = before - tokens.len();
        if revoked > 0 {
            tracing::debug!(
                application_id = %token.application_id,
                revoked,
                "Revoked prior tokens before issuing replacement"
            );
        }
        tokens.insert(token.id, token.clone());
        Ok(token.clone())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<AccessToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<AccessToken>> {
        Ok(self.tokens.read().await.get(&id).cloned())
    }

    async fn list_for_application(&self, application_id: Uuid) -> AuthResult<Vec<AccessToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.application_id == application_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> AuthResult<bool> {
        Ok(self.tokens.write().await.remove(&id).is_some())
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        let now = OffsetDateTime::now_utc();
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.expires_at > now);
        Ok((before - tokens.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn token_for(application_id: Uuid, value: &str, lifetime: Duration) -> AccessToken {
        AccessToken {
            id: Uuid::new_v4(),
            token: value.to_string(),
            user_id: Uuid::new_v4(),
            application_id,
            expires_at: OffsetDateTime::now_utc() + lifetime,
            scope: "capability-a".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_replaces_prior_token() {
        let store = MemoryTokenStore::new();
        let app = Uuid::new_v4();

        let first = token_for(app, "first", Duration::hours(1));
        let second = token_for(app, "second", Duration::hours(1));
        store.insert_for_application(&first).await.unwrap();
        store.insert_for_application(&second).await.unwrap();

        assert!(store.find_by_token("first").await.unwrap().is_none());
        assert!(store.find_by_token("second").await.unwrap().is_some());
        assert_eq!(store.list_for_application(app).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_leaves_other_applications_alone() {
        let store = MemoryTokenStore::new();
        let app_a = Uuid::new_v4();
        let app_b = Uuid::new_v4();

        store
            .insert_for_application(&token_for(app_a, "a", Duration::hours(1)))
            .await
            .unwrap();
        store
            .insert_for_application(&token_for(app_b, "b", Duration::hours(1)))
            .await
            .unwrap();

        assert!(store.find_by_token("a").await.unwrap().is_some());
        assert!(store.find_by_token("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryTokenStore::new();
        let token = token_for(Uuid::new_v4(), "t", Duration::hours(1));
        store.insert_for_application(&token).await.unwrap();

        assert!(store.delete(token.id).await.unwrap());
        assert!(!store.delete(token.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let store = MemoryTokenStore::new();
        store
            .insert_for_application(&token_for(Uuid::new_v4(), "live", Duration::hours(1)))
            .await
            .unwrap();
        store
            .insert_for_application(&token_for(Uuid::new_v4(), "dead", Duration::hours(-1)))
            .await
            .unwrap();

        assert_eq!(store.delete_expired().await.unwrap(), 1);
        assert!(store.find_by_token("live").await.unwrap().is_some());
        assert!(store.find_by_token("dead").await.unwrap().is_none());
    }
}
