// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session lifecycle, API client and URL building.

pub mod credential_store;
pub mod heatmap_api;
pub mod heatmap_url;
pub mod lifecycle;
pub mod session;

pub use credential_store::CredentialStore;
pub use heatmap_api::ApiClient;
pub use heatmap_url::{HeatmapOptions, ResourceUrls, DEFAULT_DAYS};
pub use lifecycle::{Navigation, SessionController, SessionSnapshot, SessionState};
pub use session::SessionStore;
