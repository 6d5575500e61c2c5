//! HTTP Basic client authentication extractor.
//!
//! Authenticates the calling application via
//! `Authorization: Basic <base64(client_id:client_secret)>`.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::AuthError;
use crate::http::AuthState;
use crate::types::Application;

/// Axum extractor that authenticates an application with Basic credentials.
///
/// # Errors
///
/// Rejects with `Unauthorized`/`InvalidClient` (both 401) if the header is
/// missing, malformed, or the credentials do not verify.
pub struct BasicClientAuth(pub Application);

impl<S> FromRequestParts<S> for BasicClientAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::unauthorized("Missing Authorization header"))?;

        let (client_id, secret) = parse_basic_auth(header)?;

        if !auth_state
            .applications
            .verify_secret(&client_id, &secret)
            .await?
        {
            tracing::debug!(%client_id, "Basic client authentication failed");
            return Err(AuthError::invalid_client("Invalid client credentials"));
        }

        let application = auth_state
            .applications
            .find_by_client_id(&client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Invalid client credentials"))?;

        tracing::debug!(
            %client_id,
            endpoint = %parts.uri.path(),
            method = %parts.method,
            "Application authenticated via Basic Auth"
        );

        Ok(Self(application))
    }
}

/// Parses `Basic <base64(id:secret)>` into its credential pair.
fn parse_basic_auth(header: &str) -> Result<(String, String), AuthError> {
    let credentials = header
        .strip_prefix("Basic ")
        .ok_or_else(|| AuthError::unauthorized("Authorization header must use Basic scheme"))?;

    let decoded = STANDARD
        .decode(credentials.trim())
        .map_err(|_| AuthError::unauthorized("Invalid base64 in Authorization header"))?;

    let credentials = String::from_utf8(decoded)
        .map_err(|_| AuthError::unauthorized("Invalid UTF-8 in decoded credentials"))?;

    let (client_id, secret) = credentials
        .split_once(':')
        .ok_or_else(|| AuthError::unauthorized("Credentials must be 'client_id:secret'"))?;

    Ok((client_id.to_string(), secret.to_string()))
}
