//! Authorization code session storage.
//!
//! An authorization session binds a one-time code to the client, redirect
//! URI, resource owner, and the scope string narrowed at consent time. The
//! code is consumed atomically on exchange.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AuthResult;

/// A pending authorization code awaiting exchange at the token endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizationSession {
    /// The one-time authorization code.
    pub code: String,

    /// The client the code was issued to.
    pub client_id: String,

    /// The redirect URI the code was issued for; must match exactly at
    /// exchange time.
    pub redirect_uri: String,

    /// The resource owner who approved the grant.
    pub user_id: Uuid,

    /// The narrowed scope string the eventual token will carry.
    pub scope: String,

    /// The access token lifetime the user picked on the consent form.
    pub token_lifetime: time::Duration,

    /// When the code itself stops being exchangeable.
    pub expires_at: OffsetDateTime,
}

impl AuthorizationSession {
    /// Whether the code has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

/// Storage operations for authorization code sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn insert(&self, session: AuthorizationSession) -> AuthResult<()>;

    /// Atomically removes and returns the session for `code`.
    ///
    /// Returns `None` for unknown or already-consumed codes, making codes
    /// one-time use.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn consume(&self, code: &str) -> AuthResult<Option<AuthorizationSession>>;
}
