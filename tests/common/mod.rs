// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use docker_heatmap_web::config::Config;
use docker_heatmap_web::routes::create_router;
use docker_heatmap_web::services::{
    ApiClient, CredentialStore, ResourceUrls, SessionController, SessionStore,
};
use docker_heatmap_web::AppState;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A user as the heatmap API returns it.
#[allow(dead_code)]
pub fn user_json(login: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "github_id": 583231,
        "github_username": login,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231",
        "name": "The Octocat",
        "public_profile": true,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-03-01T12:30:00Z"
    })
}

/// Make `/user/me` accept `token` and resolve it to `login`.
#[allow(dead_code)]
pub async fn mount_current_user(server: &MockServer, token: &str, login: &str) {
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": user_json(login) })),
        )
        .mount(server)
        .await;
}

/// Make `/user/me` reject every credential.
#[allow(dead_code)]
pub async fn mount_rejecting_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "error": "Unauthorized" })),
        )
        .mount(server)
        .await;
}

/// Session controller wired to a mock API.
#[allow(dead_code)]
pub fn test_controller(api_url: &str, credentials: CredentialStore) -> SessionController {
    let store = Arc::new(SessionStore::new(credentials));
    let api = ApiClient::new(api_url, store.clone());
    SessionController::new(api, store)
}

/// Create a test app talking to a mock API.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(api_url: &str, credentials: CredentialStore) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        api_url: api_url.to_string(),
        ..Config::test_default()
    };

    let store = Arc::new(SessionStore::new(credentials));
    let api = ApiClient::new(api_url, store.clone());
    let session = SessionController::new(api.clone(), store);

    let state = Arc::new(AppState {
        urls: ResourceUrls::new(api_url),
        config,
        api,
        session,
    });

    (create_router(state.clone()), state)
}
