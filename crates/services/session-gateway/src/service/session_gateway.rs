//! Session gateway - Owns the current session and its lifecycle.
//!
//! Wraps the auth provider: resolves the persisted session on first use,
//! refreshes expired tokens, persists every change and notifies listeners.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::{AuthProvider, GoTrueClient};
use crate::config::SessionGatewayConfig;
use crate::storage::{FileStorage, SessionStorage};
use crate::store::{SessionHandler, SessionStore, Subscription};
use common::{AppResult, AuthError, TokenSource};
use domain::{check_password, AuthChangeEvent, Session, SignUpOutcome, UserMetadata};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session gateway trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Current session; the first call resolves the persisted one
    async fn current_session(&self) -> AppResult<Option<Session>>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Register a new account
    async fn sign_up(&self, email: &str, password: &str, full_name: &str)
        -> AppResult<SignUpOutcome>;

    /// End the session; a no-op when signed out
    async fn sign_out(&self) -> AppResult<()>;

    /// Re-read the user record of the current session
    async fn reload_user(&self) -> AppResult<Option<Session>>;

    /// Register a listener for session changes
    fn on_session_change(&self, handler: SessionHandler) -> Subscription;
}

/// Concrete implementation of SessionGateway over an auth provider.
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    storage: Arc<dyn SessionStorage>,
    store: SessionStore,
    leeway: Duration,
    /// Serializes resolution and refresh so a refresh token is spent once
    resolving: Mutex<()>,
}

impl SessionManager {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        storage: Arc<dyn SessionStorage>,
        leeway: Duration,
    ) -> Self {
        Self {
            provider,
            storage,
            store: SessionStore::new(),
            leeway,
            resolving: Mutex::new(()),
        }
    }

    /// Build the HTTP-backed gateway with file persistence.
    pub fn from_config(config: &SessionGatewayConfig) -> Self {
        Self::new(
            Arc::new(GoTrueClient::new(config.backend.clone())),
            Arc::new(FileStorage::new(config.session_file.clone())),
            config.refresh_leeway(),
        )
    }

    /// The observable store backing this gateway
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    async fn persist(&self, session: &Session) {
        if let Err(e) = self.storage.save(session).await {
            warn!("Failed to persist session: {}", e);
        }
    }

    async fn forget(&self) {
        if let Err(e) = self.storage.clear().await {
            warn!("Failed to clear persisted session: {}", e);
        }
    }

    /// Held session, loading it from storage on first use
    async fn held_session(&self) -> Option<Session> {
        if let Some(held) = self.store.snapshot() {
            return held;
        }
        match self.storage.load().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to load persisted session: {}", e);
                None
            }
        }
    }

    /// Publish `session` under `event`, or just resolve the store when
    /// nobody has seen a value yet.
    fn publish(&self, first: bool, event: AuthChangeEvent, session: Option<Session>) {
        if first && event == AuthChangeEvent::SignedOut {
            self.store.resolve(session);
        } else {
            self.store.set(event, session);
        }
    }
}

#[async_trait]
impl SessionGateway for SessionManager {
    async fn current_session(&self) -> AppResult<Option<Session>> {
        let _guard = self.resolving.lock().await;
        let first = !self.store.is_resolved();

        let session = match self.held_session().await {
            Some(session) => session,
            None => {
                if first {
                    self.store.resolve(None);
                }
                return Ok(None);
            }
        };

        if !session.is_expired(Utc::now(), self.leeway) {
            if first {
                debug!(user_id = %session.user_id(), "Resolved persisted session");
                self.store.resolve(Some(session.clone()));
            }
            return Ok(Some(session));
        }

        match self.provider.refresh(&session.refresh_token).await {
            Ok(fresh) => {
                info!(user_id = %fresh.user_id(), "Session refreshed");
                self.persist(&fresh).await;
                self.store.set(AuthChangeEvent::TokenRefreshed, Some(fresh.clone()));
                Ok(Some(fresh))
            }
            Err(e @ (AuthError::Network(_) | AuthError::Decode(_))) => {
                warn!(code = e.code(), "Session refresh failed");
                Err(e.into())
            }
            Err(e) => {
                info!(code = e.code(), "Refresh rejected, signing out");
                self.forget().await;
                self.publish(first, AuthChangeEvent::SignedOut, None);
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let session = self.provider.sign_in_with_password(email, password).await?;

        info!(user_id = %session.user_id(), "Signed in");
        self.persist(&session).await;
        self.store.set(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<SignUpOutcome> {
        check_password(password)?;

        let full_name = full_name.trim();
        let metadata = UserMetadata {
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
        };
        let outcome = self.provider.sign_up(email, password, &metadata).await?;

        match &outcome {
            SignUpOutcome::Confirmed(session) => {
                info!(user_id = %session.user_id(), "Signed up and signed in");
                self.persist(session).await;
                self.store.set(AuthChangeEvent::SignedIn, Some(session.clone()));
            }
            SignUpOutcome::PendingConfirmation { user } => {
                info!(user_id = %user.id, "Signed up, awaiting email confirmation");
            }
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let _guard = self.resolving.lock().await;
        let first = !self.store.is_resolved();

        let Some(session) = self.held_session().await else {
            if first {
                self.store.resolve(None);
            }
            return Ok(());
        };

        if let Err(e) = self.provider.sign_out(&session.access_token).await {
            warn!(code = e.code(), "Remote sign-out failed, clearing local session");
        }
        self.forget().await;

        info!(user_id = %session.user_id(), "Signed out");
        self.store.set(AuthChangeEvent::SignedOut, None);
        Ok(())
    }

    async fn reload_user(&self) -> AppResult<Option<Session>> {
        let Some(mut session) = self.current_session().await? else {
            return Ok(None);
        };

        session.user = self.provider.get_user(&session.access_token).await?;
        self.persist(&session).await;
        self.store.set(AuthChangeEvent::UserUpdated, Some(session.clone()));
        Ok(Some(session))
    }

    fn on_session_change(&self, handler: SessionHandler) -> Subscription {
        self.store.subscribe(handler)
    }
}

#[async_trait]
impl TokenSource for SessionManager {
    async fn access_token(&self) -> Option<String> {
        match self.current_session().await {
            Ok(session) => session.map(|s| s.access_token),
            Err(e) => {
                warn!(code = e.code(), "No access token available");
                None
            }
        }
    }
}
