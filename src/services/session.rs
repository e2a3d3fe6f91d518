// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process session state: the bearer credential and the identity it
//! resolved to.
//!
//! Anyone may read; only the session controller writes (the mutators are
//! crate-private). The credential is mirrored to the [`CredentialStore`] on
//! every write so it survives restarts. Writers serialize on `persist` and do
//! their disk I/O before taking the state lock, so readers never wait on disk.

use crate::models::Identity;
use crate::services::credential_store::CredentialStore;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug)]
struct SessionInner {
    credential: Option<String>,
    identity: Option<Identity>,
    loading: bool,
}

/// Credential and identity, kept mutually consistent.
pub struct SessionStore {
    inner: RwLock<SessionInner>,
    credentials: CredentialStore,
    /// Held across a write's disk I/O and state update.
    persist: Mutex<()>,
}

impl SessionStore {
    /// Empty store backed by `credentials`. Starts out loading until the
    /// controller has bootstrapped.
    pub fn new(credentials: CredentialStore) -> Self {
        Self {
            inner: RwLock::new(SessionInner {
                credential: None,
                identity: None,
                loading: true,
            }),
            credentials,
            persist: Mutex::new(()),
        }
    }

    /// Current bearer credential, if any.
    pub async fn credential(&self) -> Option<String> {
        self.inner.read().await.credential.clone()
    }

    /// Resolved identity, if the session is authenticated.
    pub async fn identity(&self) -> Option<Identity> {
        self.inner.read().await.identity.clone()
    }

    /// Authenticated means an identity is held, not merely a credential.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.identity.is_some()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    // ─── Mutators (session controller only) ─────────────────────────────

    /// Load the persisted credential into memory. Identity stays unset.
    pub(crate) async fn restore(&self) -> Option<String> {
        let stored = match self.credentials.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored credential, starting signed out");
                None
            }
        };

        let mut inner = self.inner.write().await;
        inner.credential = stored.clone();
        inner.identity = None;
        stored
    }

    /// Adopt a freshly handed-off credential ahead of resolving it.
    pub(crate) async fn set_credential(&self, credential: &str) {
        let _persist = self.persist.lock().await;
        self.save(credential).await;

        let mut inner = self.inner.write().await;
        inner.credential = Some(credential.to_string());
        inner.identity = None;
    }

    /// Set credential and identity together.
    pub(crate) async fn set_session(&self, credential: &str, identity: Identity) {
        let _persist = self.persist.lock().await;
        if self.credential().await.as_deref() != Some(credential) {
            self.save(credential).await;
        }

        let mut inner = self.inner.write().await;
        inner.credential = Some(credential.to_string());
        inner.identity = Some(identity);
    }

    async fn save(&self, credential: &str) {
        if let Err(e) = self.credentials.save(credential).await {
            tracing::warn!(error = %e, "Failed to persist credential, session will not survive restart");
        }
    }

    /// Replace the identity of an authenticated session (after a profile
    /// update). Ignored when signed out.
    pub(crate) async fn set_identity(&self, identity: Identity) {
        let mut inner = self.inner.write().await;
        if inner.credential.is_some() {
            inner.identity = Some(identity);
        }
    }

    /// Drop credential and identity, in memory and on disk.
    pub(crate) async fn clear(&self) {
        let _persist = self.persist.lock().await;
        self.clear_locked().await;
    }

    /// Clear the session only if `rejected` is still its credential. A
    /// credential replaced since the rejected request was sent is kept.
    /// Returns whether the session was cleared.
    pub(crate) async fn clear_if_current(&self, rejected: &str) -> bool {
        let _persist = self.persist.lock().await;
        if self.credential().await.as_deref() != Some(rejected) {
            return false;
        }
        self.clear_locked().await;
        true
    }

    /// Caller holds `persist`.
    async fn clear_locked(&self) {
        if let Err(e) = self.credentials.clear().await {
            tracing::warn!(error = %e, "Failed to remove stored credential");
        }

        let mut inner = self.inner.write().await;
        inner.credential = None;
        inner.identity = None;
    }

    pub(crate) async fn set_loading(&self, loading: bool) {
        self.inner.write().await.loading = loading;
    }
}
