// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: bootstrap, sign-in handoff, login and logout.
//!
//! ```text
//! Unresolved ──bootstrap──▶ Resolving ──ok──▶ Authenticated
//!     │                        │
//!     └──no credential──▶ Anonymous ◀──any failure──┘
//! ```
//!
//! Login and the sign-in callback are separate entry points: the process may
//! restart between them, and only the persisted credential carries over.
//! At most one resolution runs at a time; a second bootstrap or callback
//! while one is in flight is ignored rather than raced.

use crate::error::{ApiError, AuthErrorCode};
use crate::models::{Identity, UpdateProfileRequest, UpdateProfileResponse};
use crate::services::heatmap_api::ApiClient;
use crate::services::session::SessionStore;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where the signed-in user lands after the handoff.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Default landing surface.
pub const LANDING_PATH: &str = "/";
/// Sign-in failure surface.
pub const AUTH_ERROR_PATH: &str = "/auth/error";

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unresolved,
    Resolving,
    Authenticated,
    Anonymous,
}

/// What the presentation layer should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full navigation away to another site (the identity provider).
    External(String),
    /// Full reload of an application path; nothing cached survives.
    Reload(String),
    /// Sign-in failure surface with a fixed reason code.
    AuthError(AuthErrorCode),
    /// Nothing to do.
    Stay,
}

impl Navigation {
    /// Location to redirect to, if any.
    pub fn location(&self) -> Option<String> {
        match self {
            Navigation::External(url) | Navigation::Reload(url) => Some(url.clone()),
            Navigation::AuthError(code) => Some(format!("{}?message={}", AUTH_ERROR_PATH, code)),
            Navigation::Stay => None,
        }
    }
}

/// Read-only view of the session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub authenticated: bool,
    pub loading: bool,
    pub user: Option<Identity>,
}

/// Holds the in-flight flag for a resolution; clears it on drop.
struct ResolutionGuard<'a>(&'a AtomicBool);

impl<'a> ResolutionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives the session state machine. The only writer of [`SessionStore`].
pub struct SessionController {
    api: ApiClient,
    store: Arc<SessionStore>,
    state: RwLock<SessionState>,
    /// Set on the first bootstrap and never reset.
    bootstrapped: AtomicBool,
    /// Set while a credential is being resolved.
    resolving: AtomicBool,
}

impl SessionController {
    pub fn new(api: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(SessionState::Unresolved),
            bootstrapped: AtomicBool::new(false),
            resolving: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let user = self.store.identity().await;
        SessionSnapshot {
            state: self.state().await,
            authenticated: user.is_some(),
            loading: self.store.is_loading().await,
            user,
        }
    }

    async fn set_state(&self, state: SessionState) {
        *self.state.write().await = state;
    }

    // ─── Bootstrap ───────────────────────────────────────────────────────

    /// Cold-start hydration. Runs once per process; later calls return the
    /// current state without doing anything.
    pub async fn bootstrap(&self) -> SessionState {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session bootstrap already ran, ignoring");
            return self.state().await;
        }

        let Some(_guard) = ResolutionGuard::acquire(&self.resolving) else {
            tracing::debug!("Session resolution already in flight, skipping bootstrap");
            return self.state().await;
        };

        let Some(credential) = self.store.restore().await else {
            tracing::info!("No stored credential, starting signed out");
            self.set_state(SessionState::Anonymous).await;
            self.store.set_loading(false).await;
            return SessionState::Anonymous;
        };

        self.resolve(&credential).await
    }

    // ─── Login ───────────────────────────────────────────────────────────

    /// Ask the API for the GitHub authorization URL and navigate there.
    ///
    /// Already signed in goes straight to the dashboard. On failure the error
    /// is returned and the session is untouched.
    pub async fn login(&self) -> Result<Navigation, ApiError> {
        if self.state().await == SessionState::Authenticated {
            return Ok(Navigation::Reload(DASHBOARD_PATH.to_string()));
        }

        let response = self.api.auth_url().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to get GitHub authorization URL");
            e
        })?;

        tracing::info!("Starting GitHub sign-in");
        Ok(Navigation::External(response.auth_url))
    }

    // ─── Sign-in handoff ─────────────────────────────────────────────────

    /// Handle the identity provider's redirect back, carrying the one-time
    /// credential in `token`.
    pub async fn complete_sign_in(&self, token: Option<&str>) -> Navigation {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::warn!("Sign-in callback without a token");
            return Navigation::AuthError(AuthErrorCode::NoToken);
        };

        let Some(_guard) = ResolutionGuard::acquire(&self.resolving) else {
            tracing::warn!("Session resolution already in flight, ignoring sign-in callback");
            return Navigation::Stay;
        };

        self.store.set_credential(token).await;

        match self.resolve(token).await {
            SessionState::Authenticated => Navigation::Reload(DASHBOARD_PATH.to_string()),
            _ => Navigation::Reload(LANDING_PATH.to_string()),
        }
    }

    /// Resolve `credential` (already in the store) to an identity. Caller
    /// holds the resolution guard.
    async fn resolve(&self, credential: &str) -> SessionState {
        self.set_state(SessionState::Resolving).await;
        self.store.set_loading(true).await;

        let state = match self.api.current_user().await {
            Ok(envelope) => {
                tracing::info!(user = %envelope.user.github_username, "Session resolved");
                self.store.set_session(credential, envelope.user).await;
                SessionState::Authenticated
            }
            Err(e) => {
                // Outages sign the user out too; only the log tells them apart.
                if e.is_unauthorized() {
                    tracing::info!("Stored credential rejected, signing out");
                } else {
                    tracing::warn!(error = %e, "Could not resolve session, signing out");
                }
                self.store.clear().await;
                SessionState::Anonymous
            }
        };

        self.set_state(state).await;
        self.store.set_loading(false).await;
        state
    }

    // ─── Logout ──────────────────────────────────────────────────────────

    /// Sign out. The API is told first, best effort; local state is cleared
    /// whatever it says.
    pub async fn logout(&self) -> Navigation {
        if let Err(e) = self.api.logout().await {
            tracing::debug!(error = %e, "Logout notification failed, clearing session anyway");
        }

        self.store.clear().await;
        self.set_state(SessionState::Anonymous).await;
        tracing::info!("Signed out");

        Navigation::Reload(LANDING_PATH.to_string())
    }

    // ─── Authenticated calls ─────────────────────────────────────────────

    /// Make an authenticated API call, signing out if the API rejects the
    /// credential the call went out with.
    pub async fn call<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let used = self.store.credential().await;
        let result = call().await;
        self.observe(used.as_deref(), result).await
    }

    /// Pass an API result through. A 401 signs out only while `used` (the
    /// credential the request carried) is still the session's credential; a
    /// late rejection of a replaced credential is ignored.
    pub async fn observe<T>(
        &self,
        used: Option<&str>,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let unauthorized = matches!(&result, Err(e) if e.is_unauthorized());
        let Some(used) = used.filter(|_| unauthorized) else {
            return result;
        };

        if self.store.clear_if_current(used).await {
            tracing::info!("Credential rejected by API, signing out");
            self.set_state(SessionState::Anonymous).await;
        } else {
            tracing::debug!("Ignoring rejection of a credential that was already replaced");
        }
        result
    }

    /// Update the profile and keep the held identity in step.
    pub async fn update_profile(
        &self,
        update: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ApiError> {
        let response = self.call(|| self.api.update_profile(update)).await?;
        self.store.set_identity(response.user.clone()).await;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_locations() {
        assert_eq!(
            Navigation::AuthError(AuthErrorCode::NoToken).location().as_deref(),
            Some("/auth/error?message=no_token")
        );
        assert_eq!(
            Navigation::Reload("/dashboard".to_string()).location().as_deref(),
            Some("/dashboard")
        );
        assert_eq!(Navigation::Stay.location(), None);
    }

    #[test]
    fn test_resolution_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = ResolutionGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(ResolutionGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(ResolutionGuard::acquire(&flag).is_some());
    }
}
