// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON routes: session state, embed URLs, and calls forwarded to the
//! heatmap API.

use crate::error::Result;
use crate::models::{
    AccountEnvelope, ActivityResponse, ConnectDockerRequest, ConnectDockerResponse, EmbedCodes,
    MessageResponse, ProfileData, ThemesResponse, UpdateProfileRequest, UpdateProfileResponse,
};
use crate::services::{HeatmapOptions, SessionSnapshot, DEFAULT_DAYS};
use crate::AppState;
use axum::{
    extract::{Path, Query, RawQuery, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Routes open to everyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/embed/{handle}", get(get_embed_codes))
        .route("/api/themes", get(get_themes))
        .route("/api/profile/{handle}", get(get_profile))
        .route("/api/activity/{handle}", get(get_activity))
}

/// Routes that need a signed-in session.
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/me", put(update_profile))
        .route("/api/docker/account", get(get_docker_account))
        .route("/api/docker/connect", post(connect_docker))
        .route("/api/docker/disconnect", delete(disconnect_docker))
        .route("/api/docker/sync", post(sync_docker))
}

// ─── Session ─────────────────────────────────────────────────

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

// ─── Embeds ──────────────────────────────────────────────────

/// Embed URLs and snippets for `handle`; the query string is read as
/// heatmap options (`?theme=dracula&radius=0`).
async fn get_embed_codes(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
    RawQuery(query): RawQuery,
) -> Json<EmbedCodes> {
    let options = HeatmapOptions::from_query(query.as_deref().unwrap_or_default());
    Json(
        state
            .urls
            .embed_codes(&handle, &state.config.public_url, Some(&options)),
    )
}

// ─── Public data ─────────────────────────────────────────────

async fn get_themes(State(state): State<Arc<AppState>>) -> Result<Json<ThemesResponse>> {
    Ok(Json(state.api.themes().await?))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileData>> {
    Ok(Json(state.api.profile(&handle).await?))
}

#[derive(Deserialize)]
struct ActivityQuery {
    days: Option<u32>,
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>> {
    let days = query.days.unwrap_or(DEFAULT_DAYS);
    Ok(Json(state.api.activity(&handle, days).await?))
}

// ─── Profile ─────────────────────────────────────────────────

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(update): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>> {
    Ok(Json(state.session.update_profile(&update).await?))
}

// ─── Docker Hub account ──────────────────────────────────────

async fn get_docker_account(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccountEnvelope>> {
    let account = state
        .session
        .call(|| state.api.docker_account())
        .await?;
    Ok(Json(account))
}

async fn connect_docker(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectDockerRequest>,
) -> Result<Json<ConnectDockerResponse>> {
    req.validate()?;

    tracing::info!(docker_username = %req.docker_username, "Connecting Docker Hub account");
    let response = state
        .session
        .call(|| state.api.connect_docker(&req))
        .await?;
    Ok(Json(response))
}

async fn disconnect_docker(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>> {
    let response = state
        .session
        .call(|| state.api.disconnect_docker())
        .await?;
    Ok(Json(response))
}

async fn sync_docker(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>> {
    let response = state
        .session
        .call(|| state.api.sync_docker())
        .await?;
    Ok(Json(response))
}
