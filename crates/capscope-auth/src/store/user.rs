//! User storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::User;

/// Storage operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by username.
    ///
    /// Returns `None` for unknown usernames.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Finds a user by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the storage operation
    /// fails.
    async fn create(&self, user: &User) -> AuthResult<User>;
}
