//! In-memory authorization code sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use capscope_auth::store::{AuthorizationSession, SessionStore};
use capscope_auth::AuthResult;

/// In-memory pending authorization codes.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, AuthorizationSession>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: AuthorizationSession) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.code.clone(), session);
        Ok(())
    }

    async fn consume(&self, code: &str) -> AuthResult<Option<AuthorizationSession>> {
        // remove() under the write lock makes the code one-time use.
        Ok(self.sessions.write().await.remove(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    fn session(code: &str) -> AuthorizationSession {
        AuthorizationSession {
            code: code.to_string(),
            client_id: "client-1".to_string(),
            redirect_uri: "https://app.example.com/cb".to_string(),
            user_id: Uuid::new_v4(),
            scope: "capability-a".to_string(),
            token_lifetime: Duration::hours(10),
            expires_at: OffsetDateTime::now_utc() + Duration::minutes(10),
        }
    }

    #[tokio::test]
    async fn test_consume_is_one_time() {
        let store = MemorySessionStore::new();
        store.insert(session("abc")).await.unwrap();

        assert!(store.consume("abc").await.unwrap().is_some());
        assert!(store.consume("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_unknown_code() {
        let store = MemorySessionStore::new();
        assert!(store.consume("nope").await.unwrap().is_none());
    }
}
