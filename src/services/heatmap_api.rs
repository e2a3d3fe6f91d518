// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heatmap API client.
//!
//! Handles:
//! - Bearer auth from the current session (never from the caller)
//! - JSON request/response bodies
//! - Mapping non-success responses to [`ApiError::Status`]
//!
//! The client never retries and never touches session state; deciding what
//! a 401 means is the session controller's job.

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::models::{
    AccountEnvelope, ActivityResponse, AuthUrlResponse, ConnectDockerRequest,
    ConnectDockerResponse, EmbedCodes, MessageResponse, ProfileData, ThemesResponse,
    UpdateProfileRequest, UpdateProfileResponse, UserEnvelope,
};
use crate::services::session::SessionStore;
use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

/// Error body returned by the API on failure.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Heatmap API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for the API at `base_url` acting for `session`.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Send a request to `path` (relative to the base URL) and decode the
    /// JSON response as `T`.
    ///
    /// The session credential, when there is one, goes in the
    /// `Authorization` header; anonymous requests carry no header at all.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, path, "Heatmap API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(credential) = self.session.credential().await {
            request = request.bearer_auth(credential);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// GET `path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| {
                    body.error
                        .filter(|m| !m.is_empty())
                        .or(body.message.filter(|m| !m.is_empty()))
                })
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

            tracing::debug!(status = status.as_u16(), message = %message, "Heatmap API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ─── Auth ────────────────────────────────────────────────────────────

    /// GitHub authorization URL to send the browser to.
    pub async fn auth_url(&self) -> Result<AuthUrlResponse, ApiError> {
        self.get("/auth/github").await
    }

    /// Resolve the session credential to the signed-in user.
    pub async fn current_user(&self) -> Result<UserEnvelope, ApiError> {
        self.get("/user/me").await
    }

    /// Ask the API to drop any server-side session state.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.request::<_, ()>(Method::POST, "/auth/logout", None)
            .await
    }

    // ─── User ────────────────────────────────────────────────────────────

    pub async fn update_profile(
        &self,
        update: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ApiError> {
        self.request(Method::PUT, "/user/me", Some(update)).await
    }

    /// Embed snippets as rendered by the API (URLs on the API's own host).
    pub async fn embed_codes(&self, docker_username: &str) -> Result<EmbedCodes, ApiError> {
        self.get(&format!(
            "/user/embed?docker_username={}",
            urlencoding::encode(docker_username)
        ))
        .await
    }

    // ─── Docker Hub account ──────────────────────────────────────────────

    pub async fn docker_account(&self) -> Result<AccountEnvelope, ApiError> {
        self.get("/docker/account").await
    }

    pub async fn connect_docker(
        &self,
        req: &ConnectDockerRequest,
    ) -> Result<ConnectDockerResponse, ApiError> {
        self.request(Method::POST, "/docker/connect", Some(req))
            .await
    }

    pub async fn disconnect_docker(&self) -> Result<MessageResponse, ApiError> {
        self.request::<_, ()>(Method::DELETE, "/docker/disconnect", None)
            .await
    }

    /// Start a background sync of Docker Hub activity.
    pub async fn sync_docker(&self) -> Result<MessageResponse, ApiError> {
        self.request::<_, ()>(Method::POST, "/docker/sync", None)
            .await
    }

    // ─── Public ──────────────────────────────────────────────────────────

    pub async fn themes(&self) -> Result<ThemesResponse, ApiError> {
        self.get("/themes").await
    }

    pub async fn profile(&self, docker_username: &str) -> Result<ProfileData, ApiError> {
        self.get(&format!("/profile/{}", urlencoding::encode(docker_username)))
            .await
    }

    pub async fn activity(
        &self,
        docker_username: &str,
        days: u32,
    ) -> Result<ActivityResponse, ApiError> {
        self.get(&format!(
            "/activity/{}?days={}",
            urlencoding::encode(docker_username),
            days
        ))
        .await
    }
}
