//! In-process auth provider for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use common::{AuthError, AuthResult};
use domain::{check_password, Session, SessionUser, SignUpOutcome, UserMetadata};

use super::AuthProvider;

struct Account {
    user: SessionUser,
    password: String,
    confirmed: bool,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    /// access token → user email
    access: HashMap<String, String>,
    /// refresh token → user email
    refresh: HashMap<String, String>,
}

/// Auth provider that keeps accounts in memory.
///
/// New accounts are confirmed immediately unless built with
/// [`MemoryAuthProvider::requiring_confirmation`].
pub struct MemoryAuthProvider {
    state: Mutex<State>,
    confirm_on_sign_up: bool,
    token_ttl: Duration,
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            confirm_on_sign_up: true,
            token_ttl: Duration::hours(1),
        }
    }

    /// Sign-ups stay pending until [`confirm`](Self::confirm) is called
    pub fn requiring_confirmation() -> Self {
        Self {
            confirm_on_sign_up: false,
            ..Self::new()
        }
    }

    /// Issue sessions that expire after `ttl`
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Register a confirmed account directly
    pub fn with_user(self, email: &str, password: &str, full_name: Option<&str>) -> Self {
        {
            let mut state = self.lock();
            state.accounts.insert(
                email.to_string(),
                Account {
                    user: SessionUser {
                        id: Uuid::new_v4(),
                        email: email.to_string(),
                        user_metadata: UserMetadata {
                            full_name: full_name.map(String::from),
                        },
                    },
                    password: password.to_string(),
                    confirmed: true,
                },
            );
        }
        self
    }

    /// Mark a pending account as confirmed
    pub fn confirm(&self, email: &str) {
        if let Some(account) = self.lock().accounts.get_mut(email) {
            account.confirmed = true;
        }
    }

    /// Id of the account registered under `email`
    pub fn user_id(&self, email: &str) -> Option<Uuid> {
        self.lock().accounts.get(email).map(|a| a.user.id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-update
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn issue(&self, state: &mut State, user: SessionUser) -> Session {
        let access_token = format!("access-{}", Uuid::new_v4());
        let refresh_token = format!("refresh-{}", Uuid::new_v4());
        state.access.insert(access_token.clone(), user.email.clone());
        state.refresh.insert(refresh_token.clone(), user.email.clone());

        Session {
            access_token,
            refresh_token,
            expires_at: Utc::now() + self.token_ttl,
            user,
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let mut state = self.lock();
        let user = match state.accounts.get(email) {
            Some(account) if account.password == password => {
                if !account.confirmed {
                    return Err(AuthError::EmailNotConfirmed);
                }
                account.user.clone()
            }
            _ => return Err(AuthError::InvalidCredentials),
        };

        Ok(self.issue(&mut state, user))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> AuthResult<SignUpOutcome> {
        check_password(password).map_err(|e| AuthError::WeakPassword(e.to_string()))?;

        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = SessionUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            user_metadata: metadata.clone(),
        };
        state.accounts.insert(
            email.to_string(),
            Account {
                user: user.clone(),
                password: password.to_string(),
                confirmed: self.confirm_on_sign_up,
            },
        );

        if self.confirm_on_sign_up {
            Ok(SignUpOutcome::Confirmed(self.issue(&mut state, user)))
        } else {
            Ok(SignUpOutcome::PendingConfirmation { user })
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        let mut state = self.lock();
        let email = state
            .refresh
            .remove(refresh_token)
            .ok_or(AuthError::SessionExpired)?;
        let user = state
            .accounts
            .get(&email)
            .map(|a| a.user.clone())
            .ok_or(AuthError::SessionExpired)?;

        Ok(self.issue(&mut state, user))
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let mut state = self.lock();
        if let Some(email) = state.access.remove(access_token) {
            state.refresh.retain(|_, owner| *owner != email);
        }
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> AuthResult<SessionUser> {
        let state = self.lock();
        state
            .access
            .get(access_token)
            .and_then(|email| state.accounts.get(email))
            .map(|a| a.user.clone())
            .ok_or(AuthError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let provider = MemoryAuthProvider::new().with_user("ada@example.com", "secret1", None);

        assert!(provider.sign_in_with_password("ada@example.com", "secret1").await.is_ok());
        assert_eq!(
            provider
                .sign_in_with_password("ada@example.com", "wrong")
                .await
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_pending_sign_up_blocks_sign_in() {
        let provider = MemoryAuthProvider::requiring_confirmation();
        let outcome = provider
            .sign_up("ada@example.com", "secret1", &UserMetadata::default())
            .await
            .unwrap();
        assert!(matches!(outcome, SignUpOutcome::PendingConfirmation { .. }));

        assert_eq!(
            provider
                .sign_in_with_password("ada@example.com", "secret1")
                .await
                .unwrap_err(),
            AuthError::EmailNotConfirmed
        );

        provider.confirm("ada@example.com");
        assert!(provider.sign_in_with_password("ada@example.com", "secret1").await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_token_is_single_use() {
        let provider = MemoryAuthProvider::new().with_user("ada@example.com", "secret1", None);
        let session = provider
            .sign_in_with_password("ada@example.com", "secret1")
            .await
            .unwrap();

        let refreshed = provider.refresh(&session.refresh_token).await.unwrap();
        assert_ne!(refreshed.access_token, session.access_token);
        assert_eq!(
            provider.refresh(&session.refresh_token).await.unwrap_err(),
            AuthError::SessionExpired
        );
    }
}
