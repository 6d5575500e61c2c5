//! Authorization server configuration.
//!
//! Configuration is an explicit struct handed to component constructors at
//! startup. Recognized options and their effects are documented per field.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Access token lifetimes offered on the consent form, in seconds.
///
/// 1 day, 1 week, 1 year, and effectively forever. These are presentation
/// options only, not protocol-level constraints.
pub const DEFAULT_EXPIRES_IN_CHOICES: [u64; 4] = [86_400, 604_800, 31_536_000, 3_153_600_000];

/// Root configuration for the capability-scoped authorization core.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// issuer = "https://auth.example.com"
/// access_token_lifetime = "10h"
/// authorization_code_lifetime = "10m"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Public base URL of the authorization server.
    pub issuer: String,

    /// Access token lifetime used when the consent form does not pick one.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Authorization code lifetime. Codes are short-lived and one-time use.
    #[serde(with = "humantime_serde")]
    pub authorization_code_lifetime: Duration,

    /// Token lifetimes (seconds) the consent form may request via `expires_in`.
    /// Values outside this list fall back to `access_token_lifetime`.
    pub expires_in_choices: Vec<u64>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080".to_string(),
            access_token_lifetime: Duration::from_secs(36_000), // 10 hours
            authorization_code_lifetime: Duration::from_secs(600),
            expires_in_choices: DEFAULT_EXPIRES_IN_CHOICES.to_vec(),
        }
    }
}

impl AuthConfig {
    /// Resolves the `expires_in` value submitted on the consent form to a
    /// token lifetime.
    ///
    /// Unlisted or non-positive values fall back to the configured default
    /// lifetime rather than erroring, since the choices are a presentation
    /// concern.
    #[must_use]
    pub fn resolve_expires_in(&self, requested: Option<i64>) -> time::Duration {
        if let Some(seconds) = requested
            && seconds > 0
            && self.expires_in_choices.contains(&(seconds as u64))
        {
            return time::Duration::seconds(seconds);
        }
        self.default_token_lifetime()
    }

    /// The default access token lifetime as a `time::Duration`.
    #[must_use]
    pub fn default_token_lifetime(&self) -> time::Duration {
        time::Duration::try_from(self.access_token_lifetime)
            .unwrap_or_else(|_| time::Duration::hours(10))
    }

    /// The authorization code lifetime as a `time::Duration`.
    #[must_use]
    pub fn code_lifetime(&self) -> time::Duration {
        time::Duration::try_from(self.authorization_code_lifetime)
            .unwrap_or_else(|_| time::Duration::minutes(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_lifetime, Duration::from_secs(36_000));
        assert_eq!(config.expires_in_choices.len(), 4);
    }

    #[test]
    fn test_resolve_expires_in_listed_choice() {
        let config = AuthConfig::default();
        assert_eq!(
            config.resolve_expires_in(Some(86_400)),
            time::Duration::days(1)
        );
    }

    #[test]
    fn test_resolve_expires_in_unlisted_falls_back() {
        let config = AuthConfig::default();
        assert_eq!(
            config.resolve_expires_in(Some(1234)),
            config.default_token_lifetime()
        );
        assert_eq!(
            config.resolve_expires_in(Some(-5)),
            config.default_token_lifetime()
        );
        assert_eq!(
            config.resolve_expires_in(None),
            config.default_token_lifetime()
        );
    }
}
