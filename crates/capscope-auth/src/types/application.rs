//! OAuth 2.0 client application domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Grant Type
// =============================================================================

/// OAuth 2.0 grant types an application may be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization Code flow.
    AuthorizationCode,
    /// Implicit flow (token issued directly from the authorization endpoint).
    Implicit,
    /// Client Credentials flow (confidential clients only).
    ClientCredentials,
    /// Resource Owner Password Credentials flow.
    Password,
}

impl GrantType {
    /// Returns the OAuth 2.0 `grant_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Implicit => "implicit",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Application
// =============================================================================

/// An OAuth 2.0 client registration.
///
/// The application's scope is the set of capabilities explicitly assigned to
/// it; capabilities flagged as default are implicitly available to every
/// application regardless of assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Record id.
    pub id: Uuid,

    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Argon2 PHC hash of the client secret, if the client is confidential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret_hash: Option<String>,

    /// Human-readable display name.
    pub name: String,

    /// The grant flow this application is registered for.
    pub grant_type: GrantType,

    /// Allowed redirect URIs for the authorization code flow.
    #[serde(default)]
    pub redirect_uris: Vec<String>,

    /// Owning user, if registered by an end user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Capabilities explicitly assigned to this application.
    #[serde(default)]
    pub capability_ids: Vec<Uuid>,

    /// Registration metadata surfaced in the token management API.
    #[serde(default)]
    pub logo_uri: String,
    #[serde(default)]
    pub tos_uri: String,
    #[serde(default)]
    pub policy_uri: String,
    #[serde(default)]
    pub contacts: String,
}

impl Application {
    /// Creates a new application registration.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        name: impl Into<String>,
        grant_type: GrantType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.into(),
            client_secret_hash: None,
            name: name.into(),
            grant_type,
            redirect_uris: Vec::new(),
            user_id: None,
            capability_ids: Vec::new(),
            logo_uri: String::new(),
            tos_uri: String::new(),
            policy_uri: String::new(),
            contacts: String::new(),
        }
    }

    /// Sets the stored client secret hash.
    #[must_use]
    pub fn with_secret_hash(mut self, hash: impl Into<String>) -> Self {
        self.client_secret_hash = Some(hash.into());
        self
    }

    /// Registers an allowed redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uris.push(uri.into());
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub fn with_owner(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Assigns a capability to the application's scope.
    #[must_use]
    pub fn with_capability(mut self, capability_id: Uuid) -> Self {
        self.capability_ids.push(capability_id);
        self
    }

    /// Whether `uri` is one of the registered redirect URIs (exact match).
    #[must_use]
    pub fn redirect_uri_allowed(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|u| u == uri)
    }
}
