//! Token endpoint: authorization code exchange.

use axum::Json;
use axum::extract::{Form, State};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::scopes::ScopeSet;

use super::AuthState;

/// Token request form fields.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub grant_type: String,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Successful token response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub scope: String,
}

/// `POST /token`
///
/// Exchanges a one-time authorization code for an access token carrying the
/// scope string narrowed at consent time. Issuing the token revokes any
/// previous token for the same application.
pub async fn token(
    State(state): State<AuthState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, AuthError> {
    if form.grant_type != "authorization_code" {
        return Err(AuthError::unsupported_grant_type(&form.grant_type));
    }

    let code = form
        .code
        .as_deref()
        .ok_or_else(|| AuthError::invalid_request("Missing code parameter"))?;
    let client_id = form
        .client_id
        .as_deref()
        .ok_or_else(|| AuthError::invalid_request("Missing client_id parameter"))?;
    let redirect_uri = form
        .redirect_uri
        .as_deref()
        .ok_or_else(|| AuthError::invalid_request("Missing redirect_uri parameter"))?;

    let application = state
        .applications
        .find_by_client_id(client_id)
        .await?
        .ok_or_else(|| AuthError::invalid_client("Unknown client_id"))?;

    // Confidential clients must present their secret if they send one at all;
    // public clients exchange on possession of the code alone.
    if let Some(secret) = form.client_secret.as_deref()
        && !state.applications.verify_secret(client_id, secret).await?
    {
        return Err(AuthError::invalid_client("Invalid client credentials"));
    }

    // One-time use: the code is consumed atomically whatever happens next.
    let session = state
        .sessions
        .consume(code)
        .await?
        .ok_or_else(|| AuthError::invalid_grant("Invalid authorization code"))?;

    if session.is_expired() {
        return Err(AuthError::invalid_grant("Authorization code expired"));
    }
    if session.client_id != client_id {
        return Err(AuthError::invalid_grant(
            "Authorization code was issued to a different client",
        ));
    }
    if session.redirect_uri != redirect_uri {
        return Err(AuthError::invalid_grant(
            "Redirect URI does not match authorization request",
        ));
    }

    let user = state
        .users
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| AuthError::invalid_grant("Grant owner no longer exists"))?;

    let requested = ScopeSet::parse(&session.scope);
    let access_token = state
        .validator
        .issue_token(&user, &application, &requested, session.token_lifetime)
        .await?;

    Ok(Json(TokenResponse {
        access_token: access_token.token,
        token_type: "Bearer",
        expires_in: session.token_lifetime.whole_seconds(),
        scope: access_token.scope,
    }))
}
