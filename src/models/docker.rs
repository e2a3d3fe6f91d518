// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Linked Docker Hub account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Docker Hub account linked to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerAccount {
    pub id: u64,
    /// Docker Hub username whose activity is tracked
    pub docker_username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub auto_refresh: bool,
    /// Last successful sync
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
    /// Error from the last failed sync, if any
    #[serde(default)]
    pub last_sync_error: Option<String>,
    #[serde(default)]
    pub sync_in_progress: bool,
}

/// `{ "account": ... }` envelope used by `/docker/account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEnvelope {
    pub account: DockerAccount,
}

/// Request to link a Docker Hub account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectDockerRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub docker_username: String,
    /// Docker Hub personal access token; handed straight to the API
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,
}

/// Response to a connect request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectDockerResponse {
    pub account: DockerAccount,
    pub message: String,
}
