//! Auth provider clients.

mod gotrue;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

use async_trait::async_trait;

use common::AuthResult;
use domain::{Session, SessionUser, SignUpOutcome, UserMetadata};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use gotrue::GoTrueClient;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryAuthProvider;

/// Operations the gateway needs from the hosted auth provider.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange email and password for a session
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Register a new account carrying `metadata`
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> AuthResult<SignUpOutcome>;

    /// Exchange a refresh token for a fresh session
    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session>;

    /// Revoke the session owning `access_token`
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;

    /// Fetch the user behind `access_token`
    async fn get_user(&self, access_token: &str) -> AuthResult<SessionUser>;
}
