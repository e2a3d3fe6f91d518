// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable storage for the session credential.
//!
//! Exactly one opaque string is kept, under a fixed key. Nothing else about
//! the session is written to disk.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fixed key (file name) the credential is stored under.
pub const CREDENTIAL_KEY: &str = "token";

/// Credential storage backend.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    File(PathBuf),
    Memory {
        slot: Arc<Mutex<Option<String>>>,
        /// Simulated disk latency on writes.
        write_delay: Duration,
    },
}

impl CredentialStore {
    /// Store the credential in a file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(path.into()),
        }
    }

    /// In-memory store for testing.
    pub fn new_mock() -> Self {
        Self::memory(None)
    }

    /// In-memory store pre-seeded with a credential.
    pub fn new_mock_with(credential: &str) -> Self {
        Self::memory(Some(credential.to_string()))
    }

    fn memory(initial: Option<String>) -> Self {
        Self {
            backend: Backend::Memory {
                slot: Arc::new(Mutex::new(initial)),
                write_delay: Duration::ZERO,
            },
        }
    }

    /// Make every write to an in-memory store take `delay`.
    #[cfg(test)]
    pub(crate) fn with_write_delay(mut self, delay: Duration) -> Self {
        if let Backend::Memory { write_delay, .. } = &mut self.backend {
            *write_delay = delay;
        }
        self
    }

    /// Read the stored credential. A missing or blank entry is `None`.
    pub async fn load(&self) -> io::Result<Option<String>> {
        let value = match &self.backend {
            Backend::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(contents) => Some(contents),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e),
            },
            Backend::Memory { slot, .. } => lock(slot)?.clone(),
        };

        Ok(value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    /// Persist `credential`, replacing any previous one.
    pub async fn save(&self, credential: &str) -> io::Result<()> {
        match &self.backend {
            Backend::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, credential).await?;
                restrict_permissions(path).await
            }
            Backend::Memory { slot, write_delay } => {
                if !write_delay.is_zero() {
                    tokio::time::sleep(*write_delay).await;
                }
                *lock(slot)? = Some(credential.to_string());
                Ok(())
            }
        }
    }

    /// Remove the stored credential. Clearing an empty store is fine.
    pub async fn clear(&self) -> io::Result<()> {
        match &self.backend {
            Backend::File(path) => match tokio::fs::remove_file(path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e),
            },
            Backend::Memory { slot, write_delay } => {
                if !write_delay.is_zero() {
                    tokio::time::sleep(*write_delay).await;
                }
                *lock(slot)? = None;
                Ok(())
            }
        }
    }
}

fn lock(slot: &Mutex<Option<String>>) -> io::Result<std::sync::MutexGuard<'_, Option<String>>> {
    slot.lock()
        .map_err(|_| io::Error::other("credential store lock poisoned"))
}

#[cfg(unix)]
async fn restrict_permissions(path: &std::path::Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &std::path::Path) -> io::Result<()> {
    Ok(())
}
