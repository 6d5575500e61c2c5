//! Access token storage trait.
//!
//! The token store is where the single-active-token policy is made atomic:
//! [`TokenStore::insert_for_application`] must delete any prior token for the
//! same application and insert the new one as one indivisible operation, so a
//! racing pair of issuance requests cannot leave two simultaneously valid
//! tokens. The in-memory backend holds its write lock across delete+insert; a
//! relational backend would run both statements in a single transaction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::AccessToken;

/// Storage operations for issued access tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Atomically revokes any existing token for `token.application_id` and
    /// inserts `token`.
    ///
    /// After this call exactly one token exists for the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn insert_for_application(&self, token: &AccessToken) -> AuthResult<AccessToken>;

    /// Finds a token by its opaque token string.
    ///
    /// Returns `None` for unknown strings. Expiry is not evaluated here;
    /// callers treat expired tokens as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<AccessToken>>;

    /// Finds a token by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<AccessToken>>;

    /// Lists tokens issued to an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_for_application(&self, application_id: Uuid) -> AuthResult<Vec<AccessToken>>;

    /// Deletes a token by record id.
    ///
    /// Returns `true` if a token was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete(&self, id: Uuid) -> AuthResult<bool>;

    /// Removes all expired tokens, returning how many were deleted.
    ///
    /// Expiry is evaluated lazily at validation time, so this exists only as
    /// a housekeeping operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete_expired(&self) -> AuthResult<u64>;
}
