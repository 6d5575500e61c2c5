//! User and group domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account identity.
///
/// Users own applications and receive group-mediated capability grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record id.
    pub id: Uuid,

    /// Unique login name. The secondary authentication backend resolves the
    /// decoded `X-Authentication` assertion to this field.
    pub username: String,

    /// Organization metadata, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Groups this user belongs to.
    #[serde(default)]
    pub group_ids: Vec<Uuid>,
}

impl User {
    /// Creates a new user.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            organization: None,
            group_ids: Vec::new(),
        }
    }

    /// Sets the organization metadata.
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Adds the user to a group.
    #[must_use]
    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.group_ids.push(group_id);
        self
    }
}

/// A named collection of users.
///
/// A group grants its members all capabilities linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Record id.
    pub id: Uuid,

    /// Unique group name.
    pub name: String,

    /// Capabilities granted through this group.
    #[serde(default)]
    pub capability_ids: Vec<Uuid>,

    /// Member users.
    #[serde(default)]
    pub user_ids: Vec<Uuid>,
}

impl Group {
    /// Creates a new group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capability_ids: Vec::new(),
            user_ids: Vec::new(),
        }
    }
}
