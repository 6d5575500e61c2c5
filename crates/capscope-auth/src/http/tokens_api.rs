//! Token management API.
//!
//! `GET /v1/o/tokens/` and `GET|DELETE /v1/o/tokens/{id}/`, gated by the
//! `token_management` capability. The caller authenticates its application
//! with Basic credentials and may additionally identify an end user with the
//! `X-Authentication` header; the capability check runs the application's
//! available scope set through the access matrix against the request's
//! method and path, so the same rules that protect any resource protect
//! these endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::AuthResult;
use crate::error::AuthError;
use crate::extractors::{BasicClientAuth, SlsAuth};
use crate::types::{AccessToken, Application};

use super::AuthState;

// =============================================================================
// Wire Types
// =============================================================================

/// Application registration metadata included with each token entry.
#[derive(Debug, Serialize)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub name: String,
    pub logo_uri: String,
    pub tos_uri: String,
    pub policy_uri: String,
    pub contacts: String,
}

impl ApplicationSummary {
    fn from_application(application: &Application) -> Self {
        Self {
            id: application.id,
            name: application.name.clone(),
            logo_uri: application.logo_uri.clone(),
            tos_uri: application.tos_uri.clone(),
            policy_uri: application.policy_uri.clone(),
            contacts: application.contacts.clone(),
        }
    }
}

/// A token as presented by the management API. The token string itself is
/// never echoed back.
#[derive(Debug, Serialize)]
pub struct TokenEntry {
    pub id: Uuid,
    pub user: Uuid,
    pub application: ApplicationSummary,
}

impl TokenEntry {
    fn new(token: &AccessToken, application: &Application) -> Self {
        Self {
            id: token.id,
            user: token.user_id,
            application: ApplicationSummary::from_application(application),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /v1/o/tokens/`
pub async fn list_tokens(
    State(state): State<AuthState>,
    BasicClientAuth(application): BasicClientAuth,
    SlsAuth(_user): SlsAuth,
) -> Result<Json<Vec<TokenEntry>>, AuthError> {
    check_capability(&state, &application, "GET", "/v1/o/tokens/").await?;

    let entries = state
        .tokens
        .list_for_application(application.id)
        .await?
        .iter()
        .filter(|token| !token.is_expired())
        .map(|token| TokenEntry::new(token, &application))
        .collect();

    Ok(Json(entries))
}

/// `GET /v1/o/tokens/{id}/`
pub async fn retrieve_token(
    State(state): State<AuthState>,
    Path(id): Path<String>,
    BasicClientAuth(application): BasicClientAuth,
    SlsAuth(_user): SlsAuth,
) -> Result<Json<TokenEntry>, AuthError> {
    check_capability(&state, &application, "GET", &format!("/v1/o/tokens/{id}/")).await?;

    let token = find_owned_token(&state, &application, &id).await?;
    Ok(Json(TokenEntry::new(&token, &application)))
}

/// `DELETE /v1/o/tokens/{id}/`
pub async fn delete_token(
    State(state): State<AuthState>,
    Path(id): Path<String>,
    BasicClientAuth(application): BasicClientAuth,
    SlsAuth(_user): SlsAuth,
) -> Result<StatusCode, AuthError> {
    check_capability(
        &state,
        &application,
        "DELETE",
        &format!("/v1/o/tokens/{id}/"),
    )
    .await?;

    let token = find_owned_token(&state, &application, &id).await?;
    state.tokens.delete(token.id).await?;

    tracing::info!(token_id = %token.id, client_id = %application.client_id, "Access token revoked");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Runs the caller's available scope set through the access matrix.
///
/// The capability check happens before any record lookup so that a caller
/// without the `token_management` capability learns nothing about which
/// token ids exist.
async fn check_capability(
    state: &AuthState,
    application: &Application,
    method: &str,
    path: &str,
) -> AuthResult<()> {
    let scope = state.scopes.available_scopes(application).await?;
    if state.access.allows(method, path, &scope).await? {
        Ok(())
    } else {
        Err(AuthError::forbidden(
            "No capability covers this resource",
        ))
    }
}

/// Resolves a path id to a live token owned by the caller's application.
///
/// Unparsable ids, unknown ids, expired tokens, and tokens belonging to other
/// applications are all reported identically as 404.
async fn find_owned_token(
    state: &AuthState,
    application: &Application,
    id: &str,
) -> AuthResult<AccessToken> {
    let not_found = || AuthError::not_found("No such token");

    let id: Uuid = id.parse().map_err(|_| not_found())?;
    let token = state.tokens.find_by_id(id).await?.ok_or_else(not_found)?;
    if token.application_id != application.id || token.is_expired() {
        return Err(not_found());
    }
    Ok(token)
}
