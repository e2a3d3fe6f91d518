// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types: the heatmap API error taxonomy, sign-in failure reason
//! codes, and application errors with consistent JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Message used when the API gives us nothing better.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error returned by the heatmap API client.
///
/// Callers branch on [`ApiError::status`], never on the message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// A success response whose body was not the expected JSON.
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API rejected the session credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Machine-readable reason codes for the sign-in failure surface.
///
/// The set is closed so `/auth/error?message=...` links stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    MissingParams,
    InvalidState,
    AuthFailed,
    TokenFailed,
    NoToken,
    Default,
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::MissingParams => "missing_params",
            AuthErrorCode::InvalidState => "invalid_state",
            AuthErrorCode::AuthFailed => "auth_failed",
            AuthErrorCode::TokenFailed => "token_failed",
            AuthErrorCode::NoToken => "no_token",
            AuthErrorCode::Default => "default",
        }
    }

    /// Human-readable text shown on the failure surface.
    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorCode::MissingParams => {
                "Missing required parameters. Please try signing in again."
            }
            AuthErrorCode::InvalidState => "Invalid OAuth state. The link may have expired.",
            AuthErrorCode::AuthFailed => "Authentication with GitHub failed. Please try again.",
            AuthErrorCode::TokenFailed => "Failed to generate authentication token.",
            AuthErrorCode::NoToken => "No authentication token received.",
            AuthErrorCode::Default => "An unexpected error occurred during authentication.",
        }
    }

    /// Parse a code from the query string; anything unknown becomes `Default`.
    pub fn from_param(param: Option<&str>) -> Self {
        param
            .and_then(|p| p.parse().ok())
            .unwrap_or(AuthErrorCode::Default)
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthErrorCode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "missing_params" => Ok(AuthErrorCode::MissingParams),
            "invalid_state" => Ok(AuthErrorCode::InvalidState),
            "auth_failed" => Ok(AuthErrorCode::AuthFailed),
            "token_failed" => Ok(AuthErrorCode::TokenFailed),
            "no_token" => Ok(AuthErrorCode::NoToken),
            "default" => Ok(AuthErrorCode::Default),
            _ => Err(()),
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The heatmap API rejected the request with a message meant for the user.
    #[error("Heatmap API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Heatmap API unavailable: {0}")]
    Unavailable(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401, .. } => AppError::Unauthorized,
            ApiError::Status { status, message } => AppError::Upstream { status, message },
            ApiError::Transport(msg) | ApiError::Decode(msg) => AppError::Unavailable(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "api_error",
                Some(message.clone()),
            ),
            AppError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Heatmap API unavailable");
                (StatusCode::BAD_GATEWAY, "api_unavailable", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
