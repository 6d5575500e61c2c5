//! Capability domain types.
//!
//! A capability is a named scope that gates access to protected resources
//! through an ordered list of (HTTP method, URL pattern) rules. Capabilities
//! are created administratively and immutable at request time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Protected Rule
// =============================================================================

/// A single (HTTP method, URL pattern) access rule.
///
/// The pattern is a regular expression matched against the full request path.
/// Matching is anchored at both ends when compiled (see [`crate::access`]),
/// so `/v1/o/tokens/` does not match `/v1/o/tokens/5/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRule {
    /// Uppercase HTTP method (GET, POST, ...).
    pub method: String,

    /// URL regex pattern, matched against the full request path.
    pub path_pattern: String,
}

impl ProtectedRule {
    /// Creates a rule, normalizing the method to uppercase.
    #[must_use]
    pub fn new(method: impl Into<String>, path_pattern: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            path_pattern: path_pattern.into(),
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

/// A named capability gating access to protected resources.
///
/// The slug is the scope identifier carried in token scope strings. An empty
/// rule list means the capability grants no enforceable access (deny-all for
/// that name). Deleting a capability leaves tokens carrying its slug
/// unresolvable, which degrades to deny at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    /// Record id.
    pub id: Uuid,

    /// Human-readable display name.
    pub name: String,

    /// Scope identifier derived from the name (unique, lowercase, hyphenated).
    pub slug: String,

    /// Whether the capability is granted to every application implicitly.
    pub default: bool,

    /// Ordered protected-resource rules.
    pub rules: Vec<ProtectedRule>,

    /// Groups whose members are granted this capability.
    #[serde(default)]
    pub group_ids: Vec<Uuid>,
}

impl Capability {
    /// Creates a capability with a slug derived from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<ProtectedRule>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            default: false,
            rules,
            group_ids: Vec::new(),
        }
    }

    /// Marks the capability as granted to every application by default.
    #[must_use]
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Associates the capability with a group.
    #[must_use]
    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.group_ids.push(group_id);
        self
    }

    /// Whether the capability can gate any resource at all.
    #[must_use]
    pub fn is_enforceable(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// Derives a scope slug from a display name.
///
/// Lowercases the name and collapses runs of non-alphanumeric characters into
/// single hyphens, so "Capability A" becomes "capability-a". Underscores are
/// preserved ("token_management" stays "token_management").
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
