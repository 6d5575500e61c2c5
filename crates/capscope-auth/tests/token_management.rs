//! Token management API behavior.

mod common;

use axum::http::{StatusCode, header};
use capscope_auth::store::{ApplicationStore, CapabilityStore};
use common::{
    CLIENT_SECRET, basic_header, body_json, fixture, obtain_token, send, sls_header,
};

#[tokio::test]
async fn list_returns_live_tokens_with_application_metadata() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let response = send(
        fx.router(),
        "GET",
        "/v1/o/tokens/",
        &[("authorization", &auth), ("x-authentication", &sls_header("anna"))],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry["user"], fx.user.id.to_string());
    assert_eq!(entry["application"]["name"], "App One");
    assert!(entry["application"]["logo_uri"].is_string());
    assert!(entry["application"]["tos_uri"].is_string());
    assert!(entry["application"]["policy_uri"].is_string());
    assert!(entry["application"]["contacts"].is_string());
    // The opaque token string must never appear in management responses.
    assert!(entry.get("token").is_none());
}

#[tokio::test]
async fn retrieve_returns_a_single_entry() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let list = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    let body = body_json(list).await;
    let id = body[0]["id"].as_str().expect("token id").to_string();

    let response = send(
        fx.router(),
        "GET",
        &format!("/v1/o/tokens/{id}/"),
        &[("authorization", &auth)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry = body_json(response).await;
    assert_eq!(entry["id"], id);
}

#[tokio::test]
async fn delete_revokes_and_second_delete_is_not_found() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let list = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    let body = body_json(list).await;
    let id = body[0]["id"].as_str().expect("token id").to_string();

    let path = format!("/v1/o/tokens/{id}/");
    let first = send(fx.router(), "DELETE", &path, &[("authorization", &auth)]).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = send(fx.router(), "DELETE", &path, &[("authorization", &auth)]).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unassigned_capability_is_forbidden() {
    let fx = fixture().await;
    let auth = basic_header("app-two", CLIENT_SECRET);
    let response = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bad_client_credentials_are_unauthorized() {
    let fx = fixture().await;
    let auth = basic_header("app-one", "wrong");
    let response = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn missing_credentials_are_unauthorized() {
    let fx = fixture().await;
    let response = send(fx.router(), "GET", "/v1/o/tokens/", &[]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_sls_user_degrades_to_anonymous() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let response = send(
        fx.router(),
        "GET",
        "/v1/o/tokens/",
        &[("authorization", &auth), ("x-authentication", &sls_header("nobody"))],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn collection_rejects_post() {
    let fx = fixture().await;
    let auth = basic_header("app-one", CLIENT_SECRET);
    let response = send(fx.router(), "POST", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn detail_rejects_put() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let list = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    let body = body_json(list).await;
    let id = body[0]["id"].as_str().expect("token id").to_string();

    let response = send(
        fx.router(),
        "PUT",
        &format!("/v1/o/tokens/{id}/"),
        &[("authorization", &auth)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn foreign_tokens_are_invisible() {
    let fx = fixture().await;
    obtain_token(&fx, &["capability-a"], None).await;

    let auth = basic_header("app-one", CLIENT_SECRET);
    let list = send(fx.router(), "GET", "/v1/o/tokens/", &[("authorization", &auth)]).await;
    let body = body_json(list).await;
    let id = body[0]["id"].as_str().expect("token id").to_string();

    // app-two authenticates fine but the token belongs to app-one; grant
    // app-two the management capability so the 404 is about ownership.
    let mgmt = fx
        .backend
        .capabilities
        .find_by_slug("token_management")
        .await
        .unwrap()
        .expect("capability");
    let mut app_two = fx.limited_app.clone();
    app_two.capability_ids.push(mgmt.id);
    // Re-provision a third registration carrying the extra grant.
    app_two.id = uuid::Uuid::new_v4();
    app_two.client_id = "app-three".to_string();
    fx.backend.applications.create(&app_two).await.unwrap();

    let auth = basic_header("app-three", CLIENT_SECRET);
    let response = send(
        fx.router(),
        "GET",
        &format!("/v1/o/tokens/{id}/"),
        &[("authorization", &auth)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparsable_token_id_is_not_found() {
    let fx = fixture().await;
    let auth = basic_header("app-one", CLIENT_SECRET);
    let response = send(
        fx.router(),
        "GET",
        "/v1/o/tokens/not-a-uuid/",
        &[("authorization", &auth)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
