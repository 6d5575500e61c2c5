//! Axum HTTP surface for the authorization core.
//!
//! - `POST /authorize` - consent submission, issues an authorization code
//! - `POST /token` - exchanges a code for an access token
//! - `GET /v1/o/tokens/`, `DELETE /v1/o/tokens/{id}/` - token management API
//!   gated by the `token_management` capability
//!
//! Unwired methods on wired paths (for example `POST /v1/o/tokens/`) are
//! answered with 405 by the router itself.

pub mod authorize;
pub mod error;
pub mod gate;
pub mod token;
pub mod tokens_api;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::access::AccessMatrix;
use crate::config::AuthConfig;
use crate::scopes::CapabilityScopes;
use crate::sls::SlsAuthBackend;
use crate::store::{ApplicationStore, CapabilityStore, SessionStore, TokenStore, UserStore};
use crate::validator::TokenValidator;

pub use authorize::AuthorizeForm;
pub use token::{TokenForm, TokenResponse};

/// Shared state for the HTTP handlers and extractors.
///
/// All components are constructed explicitly at startup and wired through
/// this struct; nothing is resolved by name at runtime.
#[derive(Clone)]
pub struct AuthState {
    /// Capability definitions (read-only at serving time).
    pub capabilities: Arc<dyn CapabilityStore>,

    /// Application registrations.
    pub applications: Arc<dyn ApplicationStore>,

    /// User accounts.
    pub users: Arc<dyn UserStore>,

    /// Issued access tokens.
    pub tokens: Arc<dyn TokenStore>,

    /// Pending authorization codes.
    pub sessions: Arc<dyn SessionStore>,

    /// Scopes backend.
    pub scopes: Arc<CapabilityScopes>,

    /// Token issuance/validation.
    pub validator: Arc<TokenValidator>,

    /// Per-request capability matching.
    pub access: Arc<AccessMatrix>,

    /// Secondary authentication backend.
    pub sls: Arc<SlsAuthBackend>,

    /// Authorization server configuration.
    pub config: AuthConfig,
}

impl AuthState {
    /// Builds the auth state, constructing the derived components
    /// (scopes backend, validator, access matrix, SLS backend) over the
    /// given stores.
    #[must_use]
    pub fn new(
        capabilities: Arc<dyn CapabilityStore>,
        applications: Arc<dyn ApplicationStore>,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        sessions: Arc<dyn SessionStore>,
        config: AuthConfig,
    ) -> Self {
        let scopes = Arc::new(CapabilityScopes::new(capabilities.clone()));
        let validator = Arc::new(TokenValidator::new(tokens.clone(), scopes.clone()));
        let access = Arc::new(AccessMatrix::new(capabilities.clone()));
        let sls = Arc::new(SlsAuthBackend::new(users.clone()));
        Self {
            capabilities,
            applications,
            users,
            tokens,
            sessions,
            scopes,
            validator,
            access,
            sls,
            config,
        }
    }
}

/// Builds the router for the OAuth endpoints and the token management API.
#[must_use]
pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/authorize", post(authorize::authorize))
        .route("/token", post(token::token))
        .route("/v1/o/tokens/", get(tokens_api::list_tokens))
        .route(
            "/v1/o/tokens/{id}/",
            get(tokens_api::retrieve_token).delete(tokens_api::delete_token),
        )
        .with_state(state)
}
