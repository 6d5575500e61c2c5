//! Application storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::Application;

/// Storage operations for OAuth 2.0 client applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Finds an application by its OAuth `client_id`.
    ///
    /// Returns `None` if the application doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Application>>;

    /// Finds an application by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Application>>;

    /// Creates a new application registration.
    ///
    /// # Errors
    ///
    /// Returns an error if a registration with the same `client_id` already
    /// exists or the storage operation fails.
    async fn create(&self, application: &Application) -> AuthResult<Application>;

    /// Verifies a client secret against the stored Argon2 hash.
    ///
    /// Returns `Ok(false)` if the secret doesn't match, the application is
    /// unknown, or the application has no secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn verify_secret(&self, client_id: &str, secret: &str) -> AuthResult<bool>;
}
