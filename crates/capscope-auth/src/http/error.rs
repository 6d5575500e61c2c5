//! Error response handling.
//!
//! Maps [`AuthError`] to OAuth2-style JSON error bodies with the RFC 6749
//! error-code vocabulary, plus a `WWW-Authenticate` challenge on 401. No
//! stack traces or internals reach the response body.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

/// Realm reported in `WWW-Authenticate` challenges.
const REALM: &str = "capscope";

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let oauth_error = self.oauth_error_code();

        let description = if self.is_server_error() {
            tracing::error!(error = %self, "Request failed with server error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": oauth_error,
            "error_description": description,
        });

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED {
            let challenge = build_www_authenticate_header(oauth_error, &description);
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(body)).into_response()
    }
}

/// HTTP status for each error variant.
fn status_code(error: &AuthError) -> StatusCode {
    match error {
        AuthError::InvalidClient { .. }
        | AuthError::InvalidToken { .. }
        | AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AuthError::InvalidScope { .. }
        | AuthError::Forbidden { .. }
        | AuthError::AccessDenied { .. } => StatusCode::FORBIDDEN,
        AuthError::NotFound { .. } => StatusCode::NOT_FOUND,
        AuthError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        AuthError::InvalidGrant { .. }
        | AuthError::InvalidRequest { .. }
        | AuthError::UnsupportedResponseType { .. }
        | AuthError::UnsupportedGrantType { .. } => StatusCode::BAD_REQUEST,
        AuthError::Storage { .. } | AuthError::Configuration { .. } | AuthError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Builds the `WWW-Authenticate` header value for 401 responses.
fn build_www_authenticate_header(error: &str, description: &str) -> String {
    let escaped = description.replace('"', "\\\"");
    format!("Bearer realm=\"{REALM}\", error=\"{error}\", error_description=\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = AuthError::unauthorized("Missing Bearer token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let www_auth = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(www_auth.contains("realm=\"capscope\""));
        assert!(www_auth.contains("error=\"unauthorized\""));
    }

    #[tokio::test]
    async fn test_forbidden_response_has_no_challenge() {
        let response = AuthError::forbidden("Insufficient capability").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = AuthError::not_found("No such token").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_hides_internals() {
        let response = AuthError::storage("connection refused to db-host:5432").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "server_error");
        assert_eq!(json["error_description"], "Internal server error");
    }

    #[tokio::test]
    async fn test_error_body_uses_oauth_vocabulary() {
        let response = AuthError::invalid_grant("Code already consumed").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_grant");
    }
}
