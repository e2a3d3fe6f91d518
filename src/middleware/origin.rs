// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Origin checks.
//!
//! The session is process-wide, so every request that reaches a handler acts
//! as the signed-in user. Only this server's own origins may read responses
//! cross-origin or send state-changing requests.

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use reqwest::Url;
use std::sync::Arc;

/// Origins allowed to talk to this server, compared exactly on scheme, host
/// and port.
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// `PUBLIC_URL` plus the loopback origins on this server's port.
    pub fn from_config(config: &Config) -> Self {
        let candidates = [
            config.public_url.clone(),
            format!("http://localhost:{}", config.port),
            format!("http://127.0.0.1:{}", config.port),
            format!("http://[::1]:{}", config.port),
        ];

        let mut origins = Vec::new();
        for candidate in candidates {
            match normalize(&candidate) {
                Some(origin) if !origins.contains(&origin) => origins.push(origin),
                Some(_) => {}
                None => tracing::warn!(origin = %candidate, "Ignoring unparseable origin"),
            }
        }
        Self { origins }
    }

    pub fn allows(&self, origin: &str) -> bool {
        normalize(origin).is_some_and(|o| self.origins.contains(&o))
    }

    pub fn allows_header(&self, origin: &HeaderValue) -> bool {
        origin.to_str().is_ok_and(|o| self.allows(o))
    }
}

/// `scheme://host[:port]` with default ports dropped; `None` for opaque
/// origins such as `null`.
fn normalize(origin: &str) -> Option<String> {
    let url = Url::parse(origin).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Middleware that rejects cross-site state-changing requests.
///
/// A browser request carries `Origin` or `Sec-Fetch-Site`; when present they
/// must name an allowed origin. Requests with neither (curl, scripts) pass.
pub async fn reject_cross_site(
    State(allowed): State<Arc<AllowedOrigins>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let method = request.method();
    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        return Ok(next.run(request).await);
    }

    let headers = request.headers();
    let permitted = match headers.get(header::ORIGIN) {
        Some(origin) => allowed.allows_header(origin),
        None => match headers.get("sec-fetch-site").and_then(|v| v.to_str().ok()) {
            Some(site) => site == "same-origin" || site == "none",
            None => true,
        },
    };

    if !permitted {
        tracing::warn!(
            method = %method,
            path = %request.uri().path(),
            origin = ?headers.get(header::ORIGIN),
            "Rejected cross-site request"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
