//! Secondary authentication via the `X-Authentication` header.
//!
//! Programmatic API calls cannot carry a browser session, so an external
//! identity system (SLS) hands the caller an opaque assertion which the
//! client forwards as `X-Authentication: SLS <base64(username)>`. This
//! backend trusts that the value decodes to a username and looks up a local
//! user by it; cryptographic verification of the assertion lives outside
//! this trust boundary.
//!
//! Every failure mode (absent header, wrong scheme, bad base64, unknown
//! username) yields `None` so the request falls through to other
//! authentication mechanisms or proceeds anonymously. It never errors.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::store::UserStore;
use crate::types::User;

/// Header carrying the externally issued identity assertion.
pub const X_AUTHENTICATION: &str = "x-authentication";

/// Scheme prefix expected in the header value.
const SLS_SCHEME: &str = "SLS ";

/// Resolves `X-Authentication` header values to local users.
pub struct SlsAuthBackend {
    users: Arc<dyn UserStore>,
}

impl SlsAuthBackend {
    /// Creates a backend over a user store.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Resolves a header value to a local user, or `None`.
    pub async fn authenticate(&self, header_value: &str) -> Option<User> {
        let username = decode_username(header_value)?;
        match self.users.find_by_username(&username).await {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!(%username, "SLS assertion for unknown user, treating as anonymous");
                }
                user
            }
            Err(error) => {
                tracing::warn!(%error, "User lookup failed during SLS authentication");
                None
            }
        }
    }
}

/// Decodes `SLS <base64(username)>` to the username.
///
/// Returns `None` for any malformed value.
#[must_use]
pub fn decode_username(header_value: &str) -> Option<String> {
    let encoded = header_value.strip_prefix(SLS_SCHEME)?.trim();
    let bytes = STANDARD.decode(encoded).ok()?;
    let username = String::from_utf8(bytes).ok()?;
    if username.is_empty() {
        return None;
    }
    Some(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        let value = format!("SLS {}", STANDARD.encode("anna"));
        assert_eq!(decode_username(&value).as_deref(), Some("anna"));
    }

    #[test]
    fn test_decode_rejects_wrong_scheme() {
        let value = format!("Bearer {}", STANDARD.encode("anna"));
        assert!(decode_username(&value).is_none());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_username("SLS !!!not-base64!!!").is_none());
    }

    #[test]
    fn test_decode_rejects_empty_username() {
        assert!(decode_username("SLS ").is_none());
        let value = format!("SLS {}", STANDARD.encode(""));
        assert!(decode_username(&value).is_none());
    }
}
