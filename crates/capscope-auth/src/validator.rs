//! Token issuance and validation.
//!
//! The validator replaces the usual multiple-concurrent-tokens model with a
//! single-active-token-per-application policy: issuing a new token revokes
//! the previous one. This trades concurrent use of one client registration
//! for a simpler security model (one device/session per registration).

use std::sync::Arc;

use rand::{Rng, distributions::Alphanumeric};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::AuthResult;
use crate::error::AuthError;
use crate::scopes::{CapabilityScopes, ScopeSet};
use crate::store::TokenStore;
use crate::types::{AccessToken, Application, User};

/// Length of generated opaque token strings.
const TOKEN_LENGTH: usize = 30;

/// Issues and validates access tokens.
pub struct TokenValidator {
    /// Token persistence.
    tokens: Arc<dyn TokenStore>,

    /// Scopes backend used to narrow requested scopes at issuance.
    scopes: Arc<CapabilityScopes>,
}

impl TokenValidator {
    /// Creates a new token validator.
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenStore>, scopes: Arc<CapabilityScopes>) -> Self {
        Self { tokens, scopes }
    }

    /// Issues a new access token for `(user, application)`.
    ///
    /// The requested scopes are narrowed to the application's available
    /// scopes before issuance, so a token can never carry a capability the
    /// application was not granted. Any existing token for the application is
    /// revoked atomically by the store as part of the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store fails.
    pub async fn issue_token(
        &self,
        user: &User,
        application: &Application,
        requested: &ScopeSet,
        lifetime: Duration,
    ) -> AuthResult<AccessToken> {
        let available = self.scopes.available_scopes(application).await?;
        let granted = available.intersection(requested);

        let token = AccessToken {
            id: Uuid::new_v4(),
            token: generate_token_string(),
            user_id: user.id,
            application_id: application.id,
            expires_at: OffsetDateTime::now_utc() + lifetime,
            scope: granted.to_scope_string(),
        };

        let token = self.tokens.insert_for_application(&token).await?;

        tracing::info!(
            client_id = %application.client_id,
            scope = %token.scope,
            expires_at = %token.expires_at,
            "Access token issued"
        );

        Ok(token)
    }

    /// Resolves a presented token string to a live access token.
    ///
    /// Unknown and expired tokens are indistinguishable to callers: both
    /// yield `Unauthorized`. Scope sufficiency for a particular operation is
    /// decided by [`crate::access::AccessMatrix`], not here.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for unknown or expired tokens, or a storage
    /// error if the lookup fails.
    pub async fn validate_token(&self, token: &str) -> AuthResult<AccessToken> {
        match self.tokens.find_by_token(token).await? {
            Some(found) if !found.is_expired() => Ok(found),
            _ => Err(AuthError::unauthorized("Invalid or expired access token")),
        }
    }
}

/// Generates an opaque, unguessable token string.
#[must_use]
pub fn generate_token_string() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_token_string();
        let b = generate_token_string();
        assert_eq!(a.len(), TOKEN_LENGTH);
        assert_ne!(a, b);
    }
}
