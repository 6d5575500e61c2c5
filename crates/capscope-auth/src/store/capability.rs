//! Capability storage trait.
//!
//! Capabilities are created administratively and read-only at serving time,
//! so this trait exposes lookups only. Resolution is deliberately lenient: an
//! unknown slug in a token's scope string yields an empty rule set (deny for
//! that name) rather than an error, so one stale scope name degrades
//! gracefully instead of aborting request authorization.

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::{Capability, Group, ProtectedRule};

/// Read-only storage operations for capability definitions.
#[async_trait]
pub trait CapabilityStore: Send + Sync {
    /// Finds a capability by its scope slug.
    ///
    /// Returns `None` for unknown slugs.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_slug(&self, slug: &str) -> AuthResult<Option<Capability>>;

    /// Finds a capability by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Capability>>;

    /// Lists all capabilities flagged as default (implicitly granted to every
    /// application).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list_default(&self) -> AuthResult<Vec<Capability>>;

    /// Resolves the groups linked to a capability.
    ///
    /// Unknown slugs resolve to an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn groups_for(&self, slug: &str) -> AuthResult<Vec<Group>>;

    /// Resolves a slug to its protected-resource rules.
    ///
    /// Unknown slugs resolve to an empty rule set, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn rules_for(&self, slug: &str) -> AuthResult<Vec<ProtectedRule>> {
        Ok(self
            .find_by_slug(slug)
            .await?
            .map(|capability| capability.rules)
            .unwrap_or_default())
    }
}
