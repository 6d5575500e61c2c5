//! Bearer token extractor for protected resources.
//!
//! Validates `Authorization: Bearer <token>` through the token validator.
//! Scope sufficiency for the requested method+path is a separate concern,
//! enforced by [`crate::http::gate`].

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::http::AuthState;
use crate::types::AccessToken;

/// Axum extractor that resolves a Bearer token to a live access token.
///
/// # Errors
///
/// Rejects with `Unauthorized` (401) if the header is missing or malformed,
/// or the token is unknown or expired.
pub struct BearerToken(pub AccessToken);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthorized("Missing Bearer token"))?;

        let access_token = auth_state.validator.validate_token(token).await?;
        Ok(Self(access_token))
    }
}
