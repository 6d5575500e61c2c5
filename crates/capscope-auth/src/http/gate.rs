//! Capability gate middleware for protected resources.
//!
//! Layered over any router that serves bearer-token-protected endpoints.
//! The middleware validates the presented token (401 for missing, unknown,
//! or expired tokens) and then asks the access matrix whether any capability
//! in the token's scope string covers the request's method and path (403
//! otherwise). The validated token is stored as a request extension for
//! downstream handlers.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use capscope_auth::http::gate::enforce_capabilities;
//!
//! let protected = Router::new()
//!     .route("/v1/fhir/Patient", get(patient_handler))
//!     .layer(middleware::from_fn_with_state(state.clone(), enforce_capabilities))
//!     .with_state(state);
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AuthError;
use crate::extractors::BearerToken;
use crate::scopes::ScopeSet;

use super::AuthState;

/// Validates the bearer token and enforces capability rules for the request.
pub async fn enforce_capabilities(
    State(state): State<AuthState>,
    BearerToken(token): BearerToken,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let scope = ScopeSet::parse(&token.scope);
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    if !state.access.allows(&method, &path, &scope).await? {
        return Err(AuthError::forbidden("No capability covers this resource"));
    }

    request.extensions_mut().insert(token);
    Ok(next.run(request).await)
}
