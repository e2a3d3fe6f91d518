// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heatmap API client tests against a mock API.

use docker_heatmap_web::error::{ApiError, GENERIC_ERROR_MESSAGE};
use docker_heatmap_web::models::{ConnectDockerRequest, ThemesResponse};
use docker_heatmap_web::services::{ApiClient, CredentialStore, SessionController, SessionStore};
use reqwest::Method;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

/// Client whose session has already resolved `token`.
async fn signed_in_client(server: &MockServer, token: &str) -> (ApiClient, Arc<SessionStore>) {
    common::mount_current_user(server, token, "octocat").await;

    let store = Arc::new(SessionStore::new(CredentialStore::new_mock_with(token)));
    let api = ApiClient::new(server.uri(), store.clone());
    let controller = SessionController::new(api.clone(), store.clone());
    controller.bootstrap().await;
    assert!(store.is_authenticated().await);
    (api, store)
}

fn anonymous_client(server: &MockServer) -> ApiClient {
    let store = Arc::new(SessionStore::new(CredentialStore::new_mock()));
    ApiClient::new(server.uri(), store)
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/themes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "themes": [{
                "id": "github",
                "name": "GitHub",
                "bg_color": "#ffffff",
                "text_color": "#24292f",
                "colors": ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = anonymous_client(&server);
    let themes: ThemesResponse = api.themes().await.unwrap();
    assert_eq!(themes.themes[0].id, "github");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_session_credential_is_sent_as_bearer() {
    let server = MockServer::start().await;
    let (api, _) = signed_in_client(&server, "session-token").await;

    Mock::given(method("POST"))
        .and(path("/docker/sync"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "Sync started" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = api.sync_docker().await.unwrap();
    assert_eq!(resp.message, "Sync started");
}

#[tokio::test]
async fn test_error_message_from_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/docker/sync"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({ "error": "Sync already in progress" })),
        )
        .mount(&server)
        .await;

    let err = anonymous_client(&server).sync_docker().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 409,
            message: "Sync already in progress".to_string()
        }
    );
    assert_eq!(err.status(), Some(409));
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn test_error_message_falls_back_to_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docker/account"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not here" })),
        )
        .mount(&server)
        .await;

    let err = anonymous_client(&server).docker_account().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: "Not here".to_string()
        }
    );
}

#[tokio::test]
async fn test_unparseable_error_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/themes"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = anonymous_client(&server).themes().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 502,
            message: GENERIC_ERROR_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    // Nothing listens on port 9 locally
    let store = Arc::new(SessionStore::new(CredentialStore::new_mock()));
    let api = ApiClient::new("http://127.0.0.1:9", store);

    let err = api.themes().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_connect_sends_json_body() {
    let server = MockServer::start().await;
    let (api, _) = signed_in_client(&server, "tok").await;

    Mock::given(method("POST"))
        .and(path("/docker/connect"))
        .and(body_json(serde_json::json!({
            "docker_username": "alice",
            "access_token": "dckr_pat_1234567890"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Docker account connected successfully",
            "account": { "id": 9, "docker_username": "alice", "is_active": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = api
        .connect_docker(&ConnectDockerRequest {
            docker_username: "alice".to_string(),
            access_token: "dckr_pat_1234567890".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(resp.account.docker_username, "alice");
}

#[tokio::test]
async fn test_activity_passes_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activity/alice"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": "alice",
            "days": 30,
            "totals": { "activities": 0, "pushes": 0, "pulls": 0, "builds": 0 },
            "activity": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = anonymous_client(&server).activity("alice", 30).await.unwrap();
    assert_eq!(resp.days, 30);
    assert!(resp.activity.is_empty());
}

#[tokio::test]
async fn test_generic_request_with_explicit_verb() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/docker/disconnect"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "gone" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp: serde_json::Value = anonymous_client(&server)
        .request::<_, ()>(Method::DELETE, "/docker/disconnect", None)
        .await
        .unwrap();
    assert_eq!(resp["message"], "gone");
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/github"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "x" })))
        .mount(&server)
        .await;

    let err = anonymous_client(&server).auth_url().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unauthorized_does_not_touch_session() {
    let server = MockServer::start().await;
    let (api, store) = signed_in_client(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/docker/account"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "error": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let err = api.docker_account().await.unwrap_err();
    assert!(err.is_unauthorized());

    // A bare client call leaves the session alone; the controller decides
    assert_eq!(store.credential().await.as_deref(), Some("tok"));
    assert!(store.is_authenticated().await);
}

#[tokio::test]
async fn test_server_rendered_embed_codes() {
    let server = MockServer::start().await;
    let (api, _) = signed_in_client(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/user/embed"))
        .and(query_param("docker_username", "alice smith"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "svg_url": "https://api.example.com/api/heatmap/alice%20smith.svg",
            "json_url": "https://api.example.com/api/activity/alice%20smith.json",
            "markdown": "![Docker Activity](https://api.example.com/api/heatmap/alice%20smith.svg)",
            "html": "<img src=\"https://api.example.com/api/heatmap/alice%20smith.svg\" alt=\"Docker Activity Heatmap\" />",
            "html_link": "<a href=\"https://heatmap.example.com/profile/alice%20smith\"><img /></a>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let codes = api.embed_codes("alice smith").await.unwrap();
    assert!(codes.svg_url.ends_with("/heatmap/alice%20smith.svg"));
}
