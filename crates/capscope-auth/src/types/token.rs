//! Access token domain type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// An issued access token.
///
/// The scope string is the final, narrowed set of capability slugs granted to
/// this specific token, serialized in canonical (sorted) space-delimited form.
/// At most one non-expired token exists per application at a time; issuing a
/// new token revokes the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Record id.
    pub id: Uuid,

    /// Opaque, unguessable token string presented by clients.
    pub token: String,

    /// The resource owner the token was issued on behalf of.
    pub user_id: Uuid,

    /// The application the token was issued to.
    pub application_id: Uuid,

    /// Expiry timestamp; evaluated by wall-clock comparison at validation.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,

    /// Space-delimited capability slugs, canonical sorted order.
    pub scope: String,
}

impl AccessToken {
    /// Whether the token has expired. Expired tokens are treated exactly like
    /// nonexistent ones by every caller.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}
