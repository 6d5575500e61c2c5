//! # capscope-auth
//!
//! Capability-scoped OAuth2 authorization core.
//!
//! This crate provides:
//! - A capability data model: named scopes carrying (HTTP method, URL pattern)
//!   protected-resource rules, optionally granted to every application by default
//! - A scopes backend that computes the scope set an application is entitled to
//! - Consent narrowing: issued scopes are the intersection of what the
//!   application may use and what the end user explicitly selected
//! - A token validator enforcing a single active access token per application
//! - A per-request access matrix that matches method + path against the
//!   capabilities carried by a token's scope string
//! - A secondary authentication backend for externally issued identity headers
//!
//! ## Modules
//!
//! - [`config`] - Authorization server configuration
//! - [`types`] - Capability, Application, Group, User, and AccessToken types
//! - [`store`] - Storage traits for auth-related data
//! - [`scopes`] - Scope sets and the capability scopes backend
//! - [`consent`] - Consent narrowing at the authorization grant step
//! - [`validator`] - Token issuance and validation
//! - [`access`] - Per-request capability matching
//! - [`sls`] - Secondary authentication via the `X-Authentication` header
//! - [`extractors`] - Axum extractors for client and identity authentication
//! - [`http`] - Axum HTTP handlers for the OAuth endpoints

pub mod access;
pub mod config;
pub mod consent;
pub mod error;
pub mod extractors;
pub mod http;
pub mod scopes;
pub mod secret;
pub mod sls;
pub mod store;
pub mod types;
pub mod validator;

pub use access::AccessMatrix;
pub use config::AuthConfig;
pub use consent::narrow_scopes;
pub use error::AuthError;
pub use extractors::{BasicClientAuth, BearerToken, SlsAuth};
pub use http::{AuthState, router};
pub use scopes::{CapabilityScopes, ScopeSet};
pub use sls::SlsAuthBackend;
pub use store::{
    ApplicationStore, AuthorizationSession, CapabilityStore, SessionStore, TokenStore, UserStore,
};
pub use types::{AccessToken, Application, Capability, GrantType, Group, ProtectedRule, User};
pub use validator::TokenValidator;

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;
