// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Docker Heatmap web companion.
//!
//! This crate provides the client side of the Docker Heatmap service: the
//! session lifecycle against the heatmap API (GitHub sign-in handoff,
//! hydration, logout) and the embeddable heatmap URL contract.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ApiClient, ResourceUrls, SessionController};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionController,
    pub urls: ResourceUrls,
}
