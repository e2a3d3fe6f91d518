// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub sign-in routes.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AuthErrorCode, Result};
use crate::services::Navigation;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/error", get(auth_error))
        .route("/auth/logout", post(logout))
}

/// Turn a transition result into a response.
fn navigate(navigation: Navigation) -> Response {
    match navigation.location() {
        Some(location) => Redirect::to(&location).into_response(),
        None => Redirect::to(crate::services::lifecycle::LANDING_PATH).into_response(),
    }
}

/// Start sign-in - redirect to GitHub.
async fn login(State(state): State<Arc<AppState>>) -> Result<Response> {
    let navigation = state.session.login().await?;
    Ok(navigate(navigation))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    token: Option<String>,
}

/// Return leg of the sign-in: the API redirects here with `?token=`.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let navigation = state
        .session
        .complete_sign_in(params.token.as_deref())
        .await;
    navigate(navigation)
}

#[derive(Deserialize)]
pub struct AuthErrorParams {
    #[serde(default)]
    message: Option<String>,
}

/// Sign-in failure surface.
#[derive(Serialize)]
pub struct AuthErrorResponse {
    pub error: String,
    pub message: String,
}

async fn auth_error(Query(params): Query<AuthErrorParams>) -> Json<AuthErrorResponse> {
    let code = AuthErrorCode::from_param(params.message.as_deref());
    Json(AuthErrorResponse {
        error: code.to_string(),
        message: code.message().to_string(),
    })
}

/// Sign out and go back to the landing page.
async fn logout(State(state): State<Arc<AppState>>) -> Response {
    navigate(state.session.logout().await)
}
