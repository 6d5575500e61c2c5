//! Optional secondary-authentication extractor.
//!
//! Wraps [`crate::sls::SlsAuthBackend`] as an axum extractor. This extractor
//! never rejects: a missing or unresolvable `X-Authentication` header yields
//! `SlsAuth(None)` and the request proceeds anonymously.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::http::AuthState;
use crate::sls::X_AUTHENTICATION;
use crate::types::User;

/// The user identified by the `X-Authentication` header, if any.
pub struct SlsAuth(pub Option<User>);

impl<S> FromRequestParts<S> for SlsAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let Some(header) = parts
            .headers
            .get(X_AUTHENTICATION)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(Self(None));
        };

        Ok(Self(auth_state.sls.authenticate(header).await))
    }
}
