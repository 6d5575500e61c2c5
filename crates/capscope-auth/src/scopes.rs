//! Scope sets and the capability scopes backend.
//!
//! A scope string is the runtime representation of which capabilities a token
//! carries: a set of capability slugs, order-irrelevant with uniqueness
//! required. [`ScopeSet`] keeps slugs in a sorted set so every serialization
//! is canonical and scope-string equality checks are stable.
//!
//! # Example
//!
//! ```
//! use capscope_auth::scopes::ScopeSet;
//!
//! let scopes = ScopeSet::parse("write-scope read-scope read-scope");
//! assert_eq!(scopes.to_scope_string(), "read-scope write-scope");
//! assert!(scopes.contains("read-scope"));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::AuthResult;
use crate::store::CapabilityStore;
use crate::types::Application;

// =============================================================================
// Scope Set
// =============================================================================

/// A canonical set of capability slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a space-delimited scope string, deduplicating slugs.
    #[must_use]
    pub fn parse(scope: &str) -> Self {
        Self(
            scope
                .split_whitespace()
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Adds a slug to the set.
    pub fn insert(&mut self, slug: impl Into<String>) {
        self.0.insert(slug.into());
    }

    /// Whether the set contains `slug`.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of slugs in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates slugs in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The slugs present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Whether every slug in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Serializes to the canonical space-delimited scope string.
    #[must_use]
    pub fn to_scope_string(&self) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_scope_string())
    }
}

impl FromIterator<String> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(ToString::to_string).collect())
    }
}

// =============================================================================
// Capability Scopes Backend
// =============================================================================

/// Computes the scope set a client application is entitled to use.
///
/// An application's available scopes are the capabilities explicitly assigned
/// to it plus every capability flagged as default. There is no separate
/// auto-approved tier beyond the default flag, so [`default_scopes`] returns
/// the same set as [`available_scopes`].
///
/// [`available_scopes`]: CapabilityScopes::available_scopes
/// [`default_scopes`]: CapabilityScopes::default_scopes
pub struct CapabilityScopes {
    capabilities: Arc<dyn CapabilityStore>,
}

impl CapabilityScopes {
    /// Creates a scopes backend over a capability store.
    #[must_use]
    pub fn new(capabilities: Arc<dyn CapabilityStore>) -> Self {
        Self { capabilities }
    }

    /// The scope set the application is entitled to use: explicitly assigned
    /// capabilities plus all default-flagged capabilities.
    ///
    /// Assigned capability ids that no longer resolve are skipped; a deleted
    /// capability must degrade to a missing grant, not a failed request.
    ///
    /// # Errors
    ///
    /// Returns an error only if the capability store fails.
    pub async fn available_scopes(&self, application: &Application) -> AuthResult<ScopeSet> {
        let mut scopes = ScopeSet::new();
        for capability_id in &application.capability_ids {
            if let Some(capability) = self.capabilities.find_by_id(*capability_id).await? {
                scopes.insert(capability.slug);
            }
        }
        for capability in self.capabilities.list_default().await? {
            scopes.insert(capability.slug);
        }
        Ok(scopes)
    }

    /// The scopes granted when the client does not request a specific set.
    ///
    /// # Errors
    ///
    /// Returns an error only if the capability store fails.
    pub async fn default_scopes(&self, application: &Application) -> AuthResult<ScopeSet> {
        self.available_scopes(application).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dedups_and_sorts() {
        let scopes = ScopeSet::parse("  b a   b c ");
        assert_eq!(scopes.len(), 3);
        assert_eq!(scopes.to_scope_string(), "a b c");
    }

    #[test]
    fn test_parse_empty() {
        assert!(ScopeSet::parse("").is_empty());
        assert!(ScopeSet::parse("   ").is_empty());
    }

    #[test]
    fn test_canonical_serialization_is_order_independent() {
        let left = ScopeSet::parse("read-scope write-scope");
        let right = ScopeSet::parse("write-scope read-scope");
        assert_eq!(left, right);
        assert_eq!(left.to_scope_string(), right.to_scope_string());
    }

    #[test]
    fn test_intersection() {
        let available = ScopeSet::parse("a b c");
        let selected = ScopeSet::parse("b c d");
        let issued = available.intersection(&selected);
        assert_eq!(issued.to_scope_string(), "b c");
        assert!(issued.is_subset(&selected));
    }
}
