// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the heatmap API (everything hangs off this, e.g. `/user/me`)
    pub api_url: String,
    /// Public origin of this server, used for CORS and embed snippets
    pub public_url: String,
    /// Server port
    pub port: u16,
    /// Directory holding the persisted session credential
    pub state_dir: PathBuf,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            public_url: "http://localhost:3000".to_string(),
            port: 3000,
            state_dir: PathBuf::from(".docker-heatmap-test"),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("HEATMAP_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "HEATMAP_API_URL",
                value: api_url,
            });
        }

        let port = match env::var("PORT") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            Err(_) => 3000,
        };

        Ok(Self {
            api_url,
            public_url: env::var("PUBLIC_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            port,
            state_dir: env::var("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".docker-heatmap")),
        })
    }

    /// Path of the file holding the persisted credential.
    pub fn credential_path(&self) -> PathBuf {
        self.state_dir.join(crate::services::credential_store::CREDENTIAL_KEY)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
