#![allow(dead_code)]

//! Shared fixture: a seeded in-memory backend and the auth router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use base64::{Engine, engine::general_purpose::STANDARD};
use tower::ServiceExt;

use capscope_auth::secret::hash_client_secret;
use capscope_auth::store::{ApplicationStore, UserStore};
use capscope_auth::types::{Application, Capability, GrantType, ProtectedRule, User};
use capscope_auth::{AuthConfig, AuthState};
use capscope_memory::MemoryBackend;

pub const CLIENT_SECRET: &str = "s3cret";
pub const REDIRECT_URI: &str = "https://app.example.com/cb";

/// A fully provisioned test environment.
pub struct Fixture {
    pub backend: MemoryBackend,
    pub state: AuthState,
    pub user: User,
    /// Registered with capability-a, capability-b, and token_management.
    pub app: Application,
    /// Registered with capability-a only.
    pub limited_app: Application,
}

impl Fixture {
    pub fn router(&self) -> Router {
        capscope_auth::router(self.state.clone())
    }
}

/// Seeds two capabilities guarding a FHIR-ish resource, the
/// `token_management` capability, one user, and two applications.
pub async fn fixture() -> Fixture {
    let backend = MemoryBackend::new();

    let cap_a = backend
        .capabilities
        .insert(Capability::new(
            "Capability A",
            vec![ProtectedRule::new("GET", "/v1/fhir/Patient(/.*)?")],
        ))
        .await;
    let cap_b = backend
        .capabilities
        .insert(Capability::new(
            "Capability B",
            vec![ProtectedRule::new("POST", "/v1/fhir/Patient")],
        ))
        .await;
    let cap_mgmt = backend
        .capabilities
        .insert(Capability::new(
            "token_management",
            vec![
                ProtectedRule::new("GET", "/v1/o/tokens(/.*)?"),
                ProtectedRule::new("DELETE", "/v1/o/tokens(/.*)?"),
            ],
        ))
        .await;

    let user = backend
        .users
        .create(&User::new("anna"))
        .await
        .expect("seed user");

    let hash = hash_client_secret(CLIENT_SECRET).expect("hash secret");
    let app = backend
        .applications
        .create(
            &Application::new("app-one", "App One", GrantType::AuthorizationCode)
                .with_secret_hash(hash.clone())
                .with_redirect_uri(REDIRECT_URI)
                .with_owner(user.id)
                .with_capability(cap_a.id)
                .with_capability(cap_b.id)
                .with_capability(cap_mgmt.id),
        )
        .await
        .expect("seed app");

    let limited_app = backend
        .applications
        .create(
            &Application::new("app-two", "App Two", GrantType::AuthorizationCode)
                .with_secret_hash(hash)
                .with_redirect_uri(REDIRECT_URI)
                .with_owner(user.id)
                .with_capability(cap_a.id),
        )
        .await
        .expect("seed limited app");

    let state = backend.auth_state(AuthConfig::default());
    Fixture {
        backend,
        state,
        user,
        app,
        limited_app,
    }
}

pub fn sls_header(username: &str) -> String {
    format!("SLS {}", STANDARD.encode(username))
}

pub fn basic_header(client_id: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{client_id}:{secret}")))
}

/// Sends a form-encoded POST through the router.
pub async fn post_form(
    router: Router,
    path: &str,
    body: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    router
        .oneshot(request.body(Body::from(body.to_string())).expect("request"))
        .await
        .expect("response")
}

/// Sends a bodyless request through the router.
pub async fn send(
    router: Router,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(path);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    router
        .oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Extracts a query parameter from a redirect's Location header.
pub fn location_param(response: &Response<Body>, key: &str) -> Option<String> {
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)?
        .to_str()
        .ok()?
        .to_string();
    let url = url::Url::parse(&location).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Runs the full consent + exchange flow and returns the token response JSON.
pub async fn obtain_token(fixture: &Fixture, scopes: &[&str], expires_in: Option<i64>) -> serde_json::Value {
    let mut form = format!(
        "client_id=app-one&response_type=code&redirect_uri={}&allow=true",
        urlencoded(REDIRECT_URI)
    );
    for scope in scopes {
        form.push_str(&format!("&scope={scope}"));
    }
    if let Some(seconds) = expires_in {
        form.push_str(&format!("&expires_in={seconds}"));
    }

    let response = post_form(
        fixture.router(),
        "/authorize",
        &form,
        &[("x-authentication", &sls_header("anna"))],
    )
    .await;
    let code = location_param(&response, "code").expect("authorization code");

    let exchange = format!(
        "grant_type=authorization_code&code={code}&client_id=app-one&client_secret={CLIENT_SECRET}&redirect_uri={}",
        urlencoded(REDIRECT_URI)
    );
    let response = post_form(fixture.router(), "/token", &exchange, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Minimal percent-encoding for form values used in these tests.
pub fn urlencoded(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace(':', "%3A")
        .replace('/', "%2F")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace(' ', "%20")
}
