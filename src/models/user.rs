// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed-in user identity as returned by the heatmap API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile.
///
/// Resolved from the session credential on every start; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Heatmap service user ID
    pub id: u64,
    /// GitHub account ID (immutable)
    pub github_id: i64,
    /// GitHub login, unique on GitHub
    pub github_username: String,
    /// Email address (may be absent if not shared)
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Short biography
    #[serde(default)]
    pub bio: Option<String>,
    /// Whether the public profile page is visible
    pub public_profile: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{ "user": ... }` envelope used by `/user/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: Identity,
}

/// Partial profile update; `None` fields are left untouched by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_profile: Option<bool>,
}

/// Response to a profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: Identity,
    pub message: String,
}

/// Response carrying the GitHub authorization URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Plain `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
