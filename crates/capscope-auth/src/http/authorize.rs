//! Authorization endpoint: consent submission.
//!
//! The consent form posts the client identity, the subset of scopes the user
//! checked, a token lifetime choice, and the allow flag. On success the
//! handler persists an authorization code bound to the *narrowed* scope
//! string and redirects back to the client with `code`; no capability beyond
//! what the user selected can ever reach the eventual token.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use time::OffsetDateTime;
use url::Url;

use crate::consent::narrow_scopes;
use crate::error::AuthError;
use crate::extractors::SlsAuth;
use crate::scopes::ScopeSet;
use crate::store::AuthorizationSession;
use crate::validator::generate_token_string;

use super::AuthState;

/// Consent form fields.
///
/// `scope` is a repeated field, one value per checked checkbox; absent means
/// the user checked nothing.
#[derive(Debug, Deserialize)]
pub struct AuthorizeForm {
    pub client_id: String,
    pub response_type: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scope: Vec<String>,
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub allow: bool,
}

/// `POST /authorize`
///
/// Validation failures that would leave the user on an attacker-chosen page
/// (unknown client, unregistered redirect URI) are reported directly as
/// OAuth2 error responses; everything after the redirect URI is validated is
/// reported by redirecting with an `error` query parameter per RFC 6749.
pub async fn authorize(
    State(state): State<AuthState>,
    SlsAuth(user): SlsAuth,
    Form(form): Form<AuthorizeForm>,
) -> Result<Response, AuthError> {
    let user = user.ok_or_else(|| {
        AuthError::unauthorized("Authentication required to authorize an application")
    })?;

    let application = state
        .applications
        .find_by_client_id(&form.client_id)
        .await?
        .ok_or_else(|| AuthError::invalid_client("Unknown client_id"))?;

    if !application.redirect_uri_allowed(&form.redirect_uri) {
        return Err(AuthError::invalid_request("Unregistered redirect_uri"));
    }

    if form.response_type != "code" {
        return error_redirect(&form.redirect_uri, "unsupported_response_type");
    }

    if !form.allow {
        tracing::info!(client_id = %form.client_id, username = %user.username, "Authorization denied by user");
        return error_redirect(&form.redirect_uri, "access_denied");
    }

    let available = state.scopes.available_scopes(&application).await?;
    let selected: ScopeSet = form.scope.iter().map(String::as_str).collect();
    let issued = narrow_scopes(&available, &selected);

    let code = generate_token_string();
    let session = AuthorizationSession {
        code: code.clone(),
        client_id: application.client_id.clone(),
        redirect_uri: form.redirect_uri.clone(),
        user_id: user.id,
        scope: issued.to_scope_string(),
        token_lifetime: state.config.resolve_expires_in(form.expires_in),
        expires_at: OffsetDateTime::now_utc() + state.config.code_lifetime(),
    };
    state.sessions.insert(session).await?;

    tracing::info!(
        client_id = %form.client_id,
        username = %user.username,
        scope = %issued,
        "Authorization code issued"
    );

    redirect_with(&form.redirect_uri, "code", &code)
}

/// 302 redirect to the client with an `error` query parameter.
fn error_redirect(redirect_uri: &str, error: &str) -> Result<Response, AuthError> {
    redirect_with(redirect_uri, "error", error)
}

/// 302 redirect to `redirect_uri` with one appended query parameter.
fn redirect_with(redirect_uri: &str, key: &str, value: &str) -> Result<Response, AuthError> {
    let mut url = Url::parse(redirect_uri)
        .map_err(|_| AuthError::invalid_request("Malformed redirect_uri"))?;
    url.query_pairs_mut().append_pair(key, value);

    let location = axum::http::HeaderValue::from_str(url.as_str())
        .map_err(|_| AuthError::invalid_request("Malformed redirect_uri"))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
