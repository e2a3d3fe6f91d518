// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires a resolved session.
///
/// There is one session per process; a request is allowed when that session
/// has an identity.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !state.session.store().is_authenticated().await {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
