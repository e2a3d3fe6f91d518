// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Docker Heatmap web companion server.
//!
//! Holds one signed-in session against the heatmap API and serves sign-in,
//! session and embed-URL routes locally.

use docker_heatmap_web::{
    config::Config,
    services::{ApiClient, CredentialStore, ResourceUrls, SessionController, SessionStore},
    AppState,
};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        api_url = %config.api_url,
        "Starting Docker Heatmap web companion"
    );

    // Session store backed by the credential file
    let credential_path = config.credential_path();
    tracing::info!(path = %credential_path.display(), "Using credential file");
    let store = Arc::new(SessionStore::new(CredentialStore::file(credential_path)));

    let api = ApiClient::new(config.api_url.clone(), store.clone());
    let session = SessionController::new(api.clone(), store);

    // Hydrate the session once, before serving anything
    let session_state = session.bootstrap().await;
    tracing::info!(state = ?session_state, "Session bootstrapped");

    // Build shared state
    let state = Arc::new(AppState {
        urls: ResourceUrls::new(config.api_url.clone()),
        config: config.clone(),
        api,
        session,
    });

    // Build router
    let app = docker_heatmap_web::routes::create_router(state);

    // Local companion: bind loopback only
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docker_heatmap_web=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
